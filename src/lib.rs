//! Padel court availability for Ubud and Sanur, Bali.
//!
//! This library aggregates bookable padel slots from the Playtomic API for
//! every club around two fixed regions, assigns each club to exactly one
//! region, resolves court names and filters the result with user preferences.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use padel_slots::config::Config;
//! use padel_slots::data_fetcher::{CourtNameResolver, SlotAggregator, UpstreamClient};
//! use padel_slots::error::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let upstream = UpstreamClient::from_config(&config)?;
//!     let aggregator = SlotAggregator::new(upstream, Arc::new(CourtNameResolver::new()));
//!
//!     for slot in aggregator.fetch_slots_for_date("2026-03-01").await {
//!         println!("{} {} {} {}", slot.time, slot.club, slot.court, slot.price);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod display;
pub mod error;
pub mod preferences;
pub mod server;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::api::{SlotAggregator, UpstreamClient};
pub use data_fetcher::models::{ClubSummary, Region, TimeSlot};
pub use error::AppError;
pub use preferences::{FilterCriteria, UserPreferences};
pub use server::{AppState, build_router};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
