//! Court name resolution.
//!
//! Names are looked up in order: live names registered with
//! [`CourtNameResolver::set_names`], the static fallback table, then a
//! `Court xxxxxxxx` placeholder built from the resource id.

pub mod fallback;

use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Length of the id prefixes used as lookup keys.
pub const KEY_LENGTH: usize = 8;

/// Truncates an id to its lookup key. Shorter ids are used whole.
pub fn short_key(id: &str) -> &str {
    match id.char_indices().nth(KEY_LENGTH) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Placeholder shown for courts with no known name.
pub fn placeholder_name(resource_id: &str) -> String {
    format!("Court {}", short_key(resource_id))
}

/// True iff `name` is exactly `"Court "` followed by 8 lowercase hex characters.
pub fn is_unmapped(name: &str) -> bool {
    name.strip_prefix("Court ").is_some_and(|rest| {
        rest.len() == KEY_LENGTH
            && rest
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    })
}

/// Static fallback name for a tenant/resource pair, if any.
pub fn fallback_name(tenant_id: &str, resource_id: &str) -> Option<&'static str> {
    fallback::lookup(short_key(tenant_id), short_key(resource_id))
}

/// Resolves display names for courts.
///
/// Holds the live names learned from resource listings; shared by `Arc`.
#[derive(Debug, Default)]
pub struct CourtNameResolver {
    dynamic: RwLock<HashMap<String, HashMap<String, String>>>,
}

impl CourtNameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the live names known for a tenant.
    ///
    /// Names are trimmed and blank names are ignored so they never shadow
    /// the fallback table.
    pub async fn set_names<'a, I>(&self, tenant_id: &str, names: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let map: HashMap<String, String> = names
            .into_iter()
            .filter_map(|(resource_id, name)| {
                let name = name.trim();
                (!name.is_empty())
                    .then(|| (short_key(resource_id).to_string(), name.to_string()))
            })
            .collect();

        debug!(
            "Registered {} court names for tenant {}",
            map.len(),
            short_key(tenant_id)
        );
        self.dynamic
            .write()
            .await
            .insert(short_key(tenant_id).to_string(), map);
    }

    /// Resolves a single court name.
    pub async fn resolve(&self, tenant_id: &str, resource_id: &str) -> String {
        let dynamic = self.dynamic.read().await;
        Self::resolve_with(&dynamic, tenant_id, resource_id)
    }

    /// Resolves several courts of one tenant under a single lock acquisition.
    pub async fn resolve_many<'a, I>(
        &self,
        tenant_id: &str,
        resource_ids: I,
    ) -> HashMap<String, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let dynamic = self.dynamic.read().await;
        resource_ids
            .into_iter()
            .map(|resource_id| {
                (
                    resource_id.to_string(),
                    Self::resolve_with(&dynamic, tenant_id, resource_id),
                )
            })
            .collect()
    }

    fn resolve_with(
        dynamic: &HashMap<String, HashMap<String, String>>,
        tenant_id: &str,
        resource_id: &str,
    ) -> String {
        let tenant_key = short_key(tenant_id);
        let resource_key = short_key(resource_id);

        if let Some(name) = dynamic
            .get(tenant_key)
            .and_then(|names| names.get(resource_key))
        {
            return name.clone();
        }

        fallback::lookup(tenant_key, resource_key)
            .map(str::to_string)
            .unwrap_or_else(|| placeholder_name(resource_id))
    }

    /// Forgets all live names.
    pub async fn clear_dynamic(&self) {
        self.dynamic.write().await.clear();
    }
}
