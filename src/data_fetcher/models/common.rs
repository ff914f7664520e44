use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Extracts a coordinate from an upstream JSON object.
    ///
    /// Accepts `lat` together with either `lon` or `lng`, as numbers or numeric strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let lat = number_field(obj.get("lat")?)?;
        let lon = obj
            .get("lon")
            .or_else(|| obj.get("lng"))
            .and_then(number_field)?;
        Some(Self { lat, lon })
    }
}

fn number_field(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// One of the two fixed search areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    Ubud,
    Sanur,
}

impl Region {
    /// All regions in query order. Ubud comes first and wins distance ties.
    pub const ALL: [Region; 2] = [Region::Ubud, Region::Sanur];

    /// Display name, also used as the `location` value of a slot.
    pub fn name(&self) -> &'static str {
        match self {
            Region::Ubud => "Ubud",
            Region::Sanur => "Sanur",
        }
    }

    /// Lowercase identifier used in inbound query strings.
    pub fn slug(&self) -> &'static str {
        match self {
            Region::Ubud => "ubud",
            Region::Sanur => "sanur",
        }
    }

    /// Point used both for the upstream search and for nearest-region assignment.
    pub fn reference_point(&self) -> Coordinate {
        match self {
            Region::Ubud => Coordinate::new(-8.506, 115.262),
            Region::Sanur => Coordinate::new(-8.700, 115.263),
        }
    }

    /// Reference point as sent in the upstream `coordinate` query parameter.
    pub fn search_coordinate(&self) -> &'static str {
        match self {
            Region::Ubud => "-8.506,115.262",
            Region::Sanur => "-8.700,115.263",
        }
    }

    /// Parses `ubud` / `sanur`, case-insensitively.
    pub fn from_query(value: &str) -> Option<Region> {
        Region::ALL
            .into_iter()
            .find(|region| region.slug().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structured failure while turning an upstream JSON item into a typed value.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("{entity} item has no id field")]
    MissingId { entity: &'static str },

    #[error("{entity} item has an unexpected shape: {message}")]
    InvalidShape {
        entity: &'static str,
        message: String,
    },
}

impl ParseError {
    pub fn invalid_shape(entity: &'static str, err: serde_json::Error) -> Self {
        Self::InvalidShape {
            entity,
            message: err.to_string(),
        }
    }
}

/// Unwraps the item list of an upstream listing response.
///
/// Listings arrive either as a bare array or as `{ "items": [...] }`. When
/// `allow_single` is set, any other object is treated as a one-item listing.
pub fn listing_items(value: Value, allow_single: bool) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("items") {
            Some(Value::Array(items)) => items,
            Some(other) if allow_single => {
                obj.insert("items".to_string(), other);
                vec![Value::Object(obj)]
            }
            None if allow_single => vec![Value::Object(obj)],
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coordinate_from_value_variants() {
        assert_eq!(
            Coordinate::from_value(&json!({"lat": -8.5, "lon": 115.2})),
            Some(Coordinate::new(-8.5, 115.2))
        );
        assert_eq!(
            Coordinate::from_value(&json!({"lat": -8.5, "lng": 115.2})),
            Some(Coordinate::new(-8.5, 115.2))
        );
        assert_eq!(
            Coordinate::from_value(&json!({"lat": "-8.5", "lon": "115.2"})),
            Some(Coordinate::new(-8.5, 115.2))
        );
        assert_eq!(Coordinate::from_value(&json!({"lat": -8.5})), None);
        assert_eq!(Coordinate::from_value(&json!("Jl. Raya Ubud")), None);
    }

    #[test]
    fn test_region_from_query() {
        assert_eq!(Region::from_query("ubud"), Some(Region::Ubud));
        assert_eq!(Region::from_query("Sanur"), Some(Region::Sanur));
        assert_eq!(Region::from_query("canggu"), None);
        assert_eq!(Region::from_query(""), None);
    }

    #[test]
    fn test_region_serializes_as_display_name() {
        assert_eq!(serde_json::to_string(&Region::Ubud).unwrap(), "\"Ubud\"");
        assert_eq!(Region::Sanur.to_string(), "Sanur");
    }

    #[test]
    fn test_listing_items_shapes() {
        assert_eq!(listing_items(json!([{"id": "a"}]), false).len(), 1);
        assert_eq!(
            listing_items(json!({"items": [{"id": "a"}, {"id": "b"}]}), false).len(),
            2
        );
        assert!(listing_items(json!({"id": "a"}), false).is_empty());
        assert_eq!(listing_items(json!({"id": "a"}), true).len(), 1);
        assert!(listing_items(json!("nope"), true).is_empty());
    }
}
