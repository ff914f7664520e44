//! Application-wide constants and configuration values
//!
//! This module centralizes magic numbers, upstream endpoints and TTL tiers
//! so the fetch pipeline and the server agree on them.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 100;

/// Default address the HTTP service binds to
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Search radius passed to the upstream tenant search
pub const DEFAULT_SEARCH_RADIUS_METERS: u32 = 8000;

/// Number of upcoming days prefetched in the background once per Bali day
pub const DEFAULT_WARM_UP_DAYS: u32 = 14;

/// Upstream Playtomic API
pub mod upstream {
    /// Primary API base URL
    pub const PRIMARY_BASE_URL: &str = "https://api.playtomic.io/v1";

    /// Secondary API base URL, tried when the primary fails
    pub const FALLBACK_BASE_URL: &str = "https://playtomic.io/api/v1";

    /// Client-identifying header value mimicking the official mobile app
    pub const REQUESTED_WITH: &str = "com.playtomic.app";

    /// Sport filter applied to every query
    pub const SPORT_ID: &str = "PADEL";

    /// Page size for tenant searches
    pub const TENANT_PAGE_SIZE: u32 = 500;
}

/// Cache TTL (Time To Live) values in seconds
pub mod cache_ttl {
    /// Default TTL for cached upstream responses (5 minutes)
    pub const DEFAULT_SECONDS: u64 = 300;

    /// Availability responses change as courts get booked (5 minutes)
    pub const AVAILABILITY_SECONDS: u64 = 300;

    /// Tenant listings (10 minutes)
    pub const TENANTS_SECONDS: u64 = 600;

    /// Resource listings carry court names which rarely change (24 hours)
    pub const RESOURCES_SECONDS: u64 = 86400;

    /// Aggregated slots for today's date (5 minutes)
    pub const TODAY_SLOTS_SECONDS: u64 = 300;

    /// Aggregated slots for future dates (10 minutes)
    pub const FUTURE_SLOTS_SECONDS: u64 = 600;
}

/// Bali locale
pub mod locale {
    /// Bali (WITA) offset from UTC in hours
    pub const BALI_UTC_OFFSET_HOURS: i32 = 8;
}

/// Preference filter tuning
pub mod filtering {
    /// Slots starting sooner than this are hidden
    pub const MIN_LEAD_TIME_MINUTES: i64 = 60;

    /// Storage key under which preferences are persisted
    pub const PREFERENCES_STORAGE_KEY: &str = "padel-preferences";
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for the primary API base URL
    pub const API_BASE_URL: &str = "PADEL_API_BASE_URL";

    /// Environment variable for the fallback API base URL
    pub const FALLBACK_API_BASE_URL: &str = "PADEL_FALLBACK_API_BASE_URL";

    /// Environment variable for the HTTP bind address
    pub const BIND_ADDRESS: &str = "PADEL_BIND_ADDRESS";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "PADEL_LOG_FILE";

    /// Environment variable for HTTP timeout in seconds
    pub const HTTP_TIMEOUT: &str = "PADEL_HTTP_TIMEOUT";
}
