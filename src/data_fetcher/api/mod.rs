pub mod http_client;
pub mod orchestrator;
pub mod single_flight;
pub mod upstream;
pub mod urls;
mod fetch_utils;

// Re-export URL utilities
pub use urls::*;
// Re-export HTTP client utilities
pub use http_client::{create_http_client_with_timeout, default_headers};
// Re-export the fetch pipeline
pub use orchestrator::{DiscoveredTenant, SlotAggregator, merge_tenants};
pub use single_flight::SingleFlight;
pub use upstream::UpstreamClient;
