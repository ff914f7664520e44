pub mod price;
pub mod regions;
pub mod slot_builder;
pub mod time_formatting;

pub use price::{normalize_price, parse_price_text};
pub use regions::{assign_region, haversine_km, nearest_region};
pub use slot_builder::build_time_slots;
pub use time_formatting::{
    bali_instant, bali_offset, bali_today, convert_to_bali_time, date_string, next_days,
    parse_date, time_to_minutes, weekday_index,
};
