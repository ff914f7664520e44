use super::common::ParseError;
use crate::data_fetcher::processors::{convert_to_bali_time, normalize_price};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Price as sent upstream: a plain number or a formatted string such as `"150.000"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSlot {
    pub start_time: String,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub price: Option<RawPrice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAvailability {
    pub resource_id: String,
    pub start_date: String,
    /// Kept raw so one bad slot does not cost the whole court.
    #[serde(default)]
    pub slots: Option<Vec<Value>>,
}

/// One bookable slot with Bali start time and integer IDR price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotEntry {
    pub start_time: String,
    pub duration: u32,
    pub price: i64,
}

/// Availability of one court on one date, already normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub resource_id: String,
    pub start_date: String,
    pub slots: Vec<SlotEntry>,
}

impl From<RawSlot> for SlotEntry {
    fn from(raw: RawSlot) -> Self {
        SlotEntry {
            start_time: convert_to_bali_time(&raw.start_time),
            duration: raw.duration,
            price: raw.price.as_ref().map(normalize_price).unwrap_or(0),
        }
    }
}

impl From<RawAvailability> for AvailabilitySlot {
    fn from(raw: RawAvailability) -> Self {
        AvailabilitySlot {
            start_date: raw.start_date,
            slots: raw
                .slots
                .unwrap_or_default()
                .into_iter()
                .filter_map(|slot| match serde_json::from_value::<RawSlot>(slot) {
                    Ok(slot) => Some(SlotEntry::from(slot)),
                    Err(e) => {
                        warn!("Skipping slot of resource {}: {e}", raw.resource_id);
                        None
                    }
                })
                .collect(),
            resource_id: raw.resource_id,
        }
    }
}

impl TryFrom<Value> for AvailabilitySlot {
    type Error = ParseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let raw: RawAvailability = serde_json::from_value(value)
            .map_err(|e| ParseError::invalid_shape("availability", e))?;
        if raw.resource_id.trim().is_empty() {
            return Err(ParseError::MissingId {
                entity: "availability",
            });
        }
        Ok(AvailabilitySlot::from(raw))
    }
}

impl AvailabilitySlot {
    /// Calendar date of the entry (`YYYY-MM-DD`), ignoring any time suffix.
    pub fn date(&self) -> &str {
        self.start_date.get(..10).unwrap_or(&self.start_date)
    }
}
