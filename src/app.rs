use chrono::Utc;
use std::io::{Write, stdout};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use padel_slots::config::Config;
use padel_slots::data_fetcher::processors::{date_string, parse_date};
use padel_slots::data_fetcher::{CourtNameResolver, SlotAggregator, UpstreamClient};
use padel_slots::display::{ListOptions, render_skip_notice, render_slot_list};
use padel_slots::error::AppError;
use padel_slots::preferences::{PreferencesStore, apply, skip_reason};
use padel_slots::server::{self, AppState};

use crate::cli::Args;

/// Runs the HTTP service until Ctrl+C.
pub async fn run_server(args: &Args, config: &Config) -> Result<(), AppError> {
    let bind_address = bind_address(&config.bind_address, args.port)?;
    let state = AppState::from_config(config)?;
    info!(
        "Starting {} {} on {bind_address}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    server::serve(state, &bind_address).await
}

/// Fetches one date, filters it with saved preferences and prints it.
///
/// Skips the fetch entirely when preferences rule the date out.
pub async fn run_once(args: &Args, config: &Config) -> Result<(), AppError> {
    let criteria = args.filter_criteria()?;
    let date = match &args.date {
        Some(date) => {
            parse_date(date)?;
            date.clone()
        }
        None => date_string(Utc::now(), 0),
    };

    let prefs = PreferencesStore::default().load().await;

    if !criteria.show_all {
        if let Some(reason) = skip_reason(parse_date(&date)?, criteria.duration, &prefs) {
            info!("Skipping fetch for {date}: {reason}");
            let mut out = stdout().lock();
            if args.json {
                writeln!(out, "[]")?;
            } else {
                render_skip_notice(&mut out, &date, reason)?;
            }
            return Ok(());
        }
    }

    let upstream = UpstreamClient::from_config(config)?;
    let aggregator = SlotAggregator::new(upstream, Arc::new(CourtNameResolver::new()));
    let slots = aggregator.fetch_slots_for_date(&date).await;
    let filtered = apply(&slots, &prefs, &criteria, Utc::now());
    info!("{} of {} slots pass the filters", filtered.len(), slots.len());

    let mut out = stdout().lock();
    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&filtered)?)?;
    } else {
        render_slot_list(
            &mut out,
            &date,
            &filtered,
            ListOptions {
                show_links: args.links,
            },
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Configured bind address with the port replaced by `port`, if given.
fn bind_address(configured: &str, port: Option<u16>) -> Result<String, AppError> {
    let Some(port) = port else {
        return Ok(configured.to_string());
    };
    let mut addr: SocketAddr = configured.parse().map_err(|e| {
        AppError::config_error(format!("Invalid bind address '{configured}': {e}"))
    })?;
    addr.set_port(port);
    Ok(addr.to_string())
}
