use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "padel_slots";

/// Returns the platform-specific application directory.
///
/// Falls back to the current directory if no config directory is available.
pub fn get_app_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR_NAME)
}

/// Returns the platform-specific path for the config file.
///
/// # Returns
/// String containing the absolute path to the config file
pub fn get_config_path() -> String {
    get_app_dir()
        .join("config.toml")
        .to_string_lossy()
        .to_string()
}

/// Returns the platform-specific path for the log directory.
pub fn get_log_dir_path() -> String {
    get_app_dir().join("logs").to_string_lossy().to_string()
}

/// Returns the path of the persisted preferences blob.
///
/// The file name is derived from the fixed storage key.
pub fn get_preferences_path() -> String {
    get_app_dir()
        .join(format!(
            "{}.json",
            crate::constants::filtering::PREFERENCES_STORAGE_KEY
        ))
        .to_string_lossy()
        .to_string()
}
