use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use super::UserPreferences;
use crate::config::paths::get_preferences_path;
use crate::error::AppError;

/// JSON file holding the preferences blob.
///
/// Reads never fail: a missing, unreadable or corrupt file yields defaults.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    path: PathBuf,
}

impl Default for PreferencesStore {
    fn default() -> Self {
        Self::new(get_preferences_path())
    }
}

impl PreferencesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> UserPreferences {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No preferences at {}, using defaults", self.path.display());
                return UserPreferences::default();
            }
            Err(e) => {
                warn!("Failed to read preferences {}: {e}", self.path.display());
                return UserPreferences::default();
            }
        };

        match parse_blob(&content) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!("{e} ({}), using defaults", self.path.display());
                UserPreferences::default()
            }
        }
    }

    /// Writes the blob, normalizing time ranges first.
    pub async fn save(&self, prefs: &UserPreferences) -> Result<(), AppError> {
        let mut prefs = prefs.clone();
        prefs.normalize();

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir).await?;
            }
        }

        let content = serde_json::to_string_pretty(&prefs)?;
        let mut file = fs::File::create(&self.path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        info!("Preferences saved to {}", self.path.display());
        Ok(())
    }

    /// Loads, applies `update`, and saves.
    pub async fn update<F>(&self, update: F) -> Result<UserPreferences, AppError>
    where
        F: FnOnce(&mut UserPreferences),
    {
        let mut prefs = self.load().await;
        update(&mut prefs);
        self.save(&prefs).await?;
        prefs.normalize();
        Ok(prefs)
    }
}

fn parse_blob(content: &str) -> Result<UserPreferences, AppError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| AppError::preferences_error(format!("Preferences are not valid JSON: {e}")))?;
    UserPreferences::from_value(&value)
        .ok_or_else(|| AppError::preferences_error("Preferences blob has an unexpected shape"))
}
