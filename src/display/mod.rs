//! Human-readable output for the command line.

pub mod formatting;
pub mod links;
pub mod slot_list;

pub use formatting::{format_court_name, format_price};
pub use links::{booking_url, club_website, playtomic_tenant_url};
pub use slot_list::{ListOptions, render_skip_notice, render_slot_list};
