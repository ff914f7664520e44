use super::common::{Coordinate, ParseError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tenant (club) item as returned by the upstream search.
///
/// Field names vary between API revisions, so every alternative is optional
/// and resolved in [`TryFrom<RawTenant>`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTenant {
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "_id", default)]
    pub underscore_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tenant_name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub address: Option<Value>,
    #[serde(default)]
    pub coordinate: Option<Value>,
    #[serde(default)]
    pub coordinates: Option<Value>,
    #[serde(default)]
    pub location: Option<Value>,
    #[serde(default)]
    pub coord: Option<Value>,
}

impl RawTenant {
    fn resolved_coordinate(&self) -> Option<Coordinate> {
        let nested = self
            .address
            .as_ref()
            .and_then(|address| address.get("coordinate"));

        [
            nested,
            self.coordinate.as_ref(),
            self.coordinates.as_ref(),
            self.location.as_ref(),
            self.coord.as_ref(),
        ]
        .into_iter()
        .flatten()
        .find_map(Coordinate::from_value)
    }
}

/// A padel club as used by the rest of the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,
}

impl TryFrom<RawTenant> for Tenant {
    type Error = ParseError;

    fn try_from(raw: RawTenant) -> Result<Self, Self::Error> {
        let coordinate = raw.resolved_coordinate();
        let id = [raw.tenant_id, raw.id, raw.underscore_id]
            .into_iter()
            .flatten()
            .find(|id| !id.trim().is_empty())
            .ok_or(ParseError::MissingId { entity: "tenant" })?;
        let name = [raw.name, raw.tenant_name]
            .into_iter()
            .flatten()
            .map(|name| name.trim().to_string())
            .find(|name| !name.is_empty())
            .unwrap_or_else(|| id.clone());
        let slug = raw.slug.filter(|slug| !slug.trim().is_empty());

        Ok(Tenant {
            id,
            name,
            slug,
            coordinate,
        })
    }
}

impl TryFrom<Value> for Tenant {
    type Error = ParseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let raw: RawTenant =
            serde_json::from_value(value).map_err(|e| ParseError::invalid_shape("tenant", e))?;
        Tenant::try_from(raw)
    }
}
