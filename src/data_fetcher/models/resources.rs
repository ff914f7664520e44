use super::common::ParseError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResource {
    #[serde(default)]
    pub resource_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A bookable court. Only the id and its display name matter here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
}

impl TryFrom<RawResource> for Resource {
    type Error = ParseError;

    fn try_from(raw: RawResource) -> Result<Self, Self::Error> {
        let id = [raw.resource_id, raw.id]
            .into_iter()
            .flatten()
            .find(|id| !id.trim().is_empty())
            .ok_or(ParseError::MissingId { entity: "resource" })?;

        Ok(Resource {
            id,
            name: raw.name.map(|name| name.trim().to_string()).unwrap_or_default(),
        })
    }
}

impl TryFrom<Value> for Resource {
    type Error = ParseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let raw: RawResource = serde_json::from_value(value)
            .map_err(|e| ParseError::invalid_shape("resource", e))?;
        Resource::try_from(raw)
    }
}
