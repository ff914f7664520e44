use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

use padel_slots::data_fetcher::models::Region;
use padel_slots::error::AppError;
use padel_slots::preferences::{
    DurationFilter, FilterCriteria, PreferenceChanges, TimeRange, parse_weekday,
};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Returns true when the arguments only touch the configuration file.
pub fn is_config_command(args: &Args) -> bool {
    args.set_api_url.is_some()
        || args.set_fallback_api_url.is_some()
        || args.set_log_file.is_some()
        || args.clear_log_file
        || args.list_config
}

/// Returns true when the arguments edit saved preferences.
pub fn is_preferences_command(args: &Args) -> bool {
    args.set_day.is_some()
        || !args.enable_day.is_empty()
        || !args.disable_day.is_empty()
        || !args.select_club.is_empty()
        || args.clear_clubs
}

/// Returns true when the HTTP service should run, which is the default.
pub fn is_server_mode(args: &Args) -> bool {
    !args.once && !is_config_command(args) && !is_preferences_command(args)
}

/// Padel court availability for Ubud and Sanur
///
/// Aggregates bookable padel slots from every Playtomic club around Ubud and
/// Sanur, Bali. By default runs an HTTP service exposing `/slots`, `/clubs`,
/// `/tenants`, `/availability`, `/resources`, `/discover-courts` and `/health`.
///
/// With --once, fetches a single date, applies your saved preferences and
/// the filters below, prints the list and exits.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Fetch one date, print the slots and exit instead of serving HTTP.
    #[arg(short, long)]
    pub once: bool,

    /// Date to show in YYYY-MM-DD format. Defaults to today in Bali.
    #[arg(long = "date", short = 'd', help_heading = "Filters")]
    pub date: Option<String>,

    /// Game length: 60+ (an hour or longer), 60 or 90.
    #[arg(long = "duration", default_value = "60+", help_heading = "Filters")]
    pub duration: String,

    /// Only show one region: ubud or sanur.
    #[arg(long = "location", short = 'L', help_heading = "Filters")]
    pub location: Option<String>,

    /// Only show one club, by its exact name.
    #[arg(long = "club", help_heading = "Filters")]
    pub club: Option<String>,

    /// Ignore saved preferences (weekdays, time windows and clubs).
    #[arg(long = "show-all", short = 'a', help_heading = "Filters")]
    pub show_all: bool,

    /// Print the slots as JSON instead of a text list.
    #[arg(long = "json", help_heading = "Output")]
    pub json: bool,

    /// Print a booking link under each slot.
    #[arg(long = "links", help_heading = "Output")]
    pub links: bool,

    /// Port for the HTTP service, overriding the configured bind address port.
    #[arg(long = "port", short = 'p', help_heading = "Server")]
    pub port: Option<u16>,

    /// Replace one weekday's time windows. DAY is 0-6 (Sunday first) or a name like mon.
    /// Without --range the day accepts any time.
    #[arg(long = "set-day", help_heading = "Preferences", value_name = "DAY")]
    pub set_day: Option<String>,

    /// Time window for --set-day, e.g. 18:00-21:00. Repeat for several windows.
    #[arg(
        long = "range",
        requires = "set_day",
        help_heading = "Preferences",
        value_name = "HH:MM-HH:MM"
    )]
    pub range: Vec<String>,

    /// Show slots on this weekday again. Can be repeated.
    #[arg(long = "enable-day", help_heading = "Preferences", value_name = "DAY")]
    pub enable_day: Vec<String>,

    /// Hide every slot on this weekday. Can be repeated.
    #[arg(long = "disable-day", help_heading = "Preferences", value_name = "DAY")]
    pub disable_day: Vec<String>,

    /// Add a club, by exact name, to the clubs you play at. Can be repeated.
    #[arg(long = "select-club", help_heading = "Preferences", value_name = "NAME")]
    pub select_club: Vec<String>,

    /// Forget selected clubs so every club is shown again.
    #[arg(long = "clear-clubs", help_heading = "Preferences")]
    pub clear_clubs: bool,

    /// Update the primary Playtomic API base URL in config.
    #[arg(long = "set-api-url", help_heading = "Configuration", value_name = "URL")]
    pub set_api_url: Option<String>,

    /// Update the fallback Playtomic API base URL in config.
    #[arg(long = "set-fallback-api-url", help_heading = "Configuration", value_name = "URL")]
    pub set_fallback_api_url: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub set_log_file: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Also write logs to the terminal in --once mode.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

impl Args {
    /// Builds the slot filter from the filter flags.
    pub fn filter_criteria(&self) -> Result<FilterCriteria, AppError> {
        let duration: DurationFilter = self.duration.parse()?;
        let location = match self.location.as_deref() {
            None | Some("all") => None,
            Some(value) => Some(Region::from_query(value).ok_or_else(|| {
                AppError::invalid_parameter(format!(
                    "Invalid location '{value}', expected ubud or sanur"
                ))
            })?),
        };
        let club = self
            .club
            .as_deref()
            .map(str::trim)
            .filter(|club| !club.is_empty() && *club != "all")
            .map(str::to_string);

        Ok(FilterCriteria {
            duration,
            location,
            club,
            show_all: self.show_all,
        })
    }

    /// Collects the preference flags into one validated batch of edits.
    pub fn preference_changes(&self) -> Result<PreferenceChanges, AppError> {
        let set_day = match &self.set_day {
            Some(day) => {
                let ranges = self
                    .range
                    .iter()
                    .map(|range| range.parse::<TimeRange>())
                    .collect::<Result<Vec<_>, _>>()?;
                Some((parse_weekday(day)?, ranges))
            }
            None => None,
        };
        let parse_days = |days: &[String]| {
            days.iter()
                .map(|day| parse_weekday(day))
                .collect::<Result<Vec<_>, _>>()
        };

        let changes = PreferenceChanges {
            set_day,
            enable_days: parse_days(&self.enable_day)?,
            disable_days: parse_days(&self.disable_day)?,
            clear_clubs: self.clear_clubs,
            select_clubs: self.select_club.clone(),
        };
        changes.validate()?;
        Ok(changes)
    }
}
