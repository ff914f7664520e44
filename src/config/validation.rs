use crate::error::AppError;
use std::net::SocketAddr;
use std::path::Path;

/// Validates an upstream base URL.
///
/// # Validation Rules
/// - URL cannot be empty
/// - URL must start with `http://` or `https://`
/// - URL must not end with a trailing slash, since endpoint paths are appended verbatim
pub fn validate_base_url(field: &str, url: &str) -> Result<(), AppError> {
    if url.is_empty() {
        return Err(AppError::config_error(format!("{field} cannot be empty")));
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(AppError::config_error(format!(
            "{field} must start with http:// or https://"
        )));
    }

    if url.ends_with('/') {
        return Err(AppError::config_error(format!(
            "{field} must not end with '/'"
        )));
    }

    Ok(())
}

/// Validates the address the HTTP service binds to.
pub fn validate_bind_address(bind_address: &str) -> Result<(), AppError> {
    bind_address.parse::<SocketAddr>().map(|_| ()).map_err(|e| {
        AppError::config_error(format!("Invalid bind address '{bind_address}': {e}"))
    })
}

/// Validates the configured log directory.
///
/// The directory is created if it does not exist yet.
pub fn validate_log_path(log_file_path: &Option<String>) -> Result<(), AppError> {
    let Some(log_path) = log_file_path else {
        return Ok(());
    };

    if log_path.is_empty() {
        return Err(AppError::config_error("Log file path cannot be empty"));
    }

    if let Some(parent) = Path::new(log_path).parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::config_error(format!(
                "Cannot create log directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    Ok(())
}

/// Validates numeric tuning values.
pub fn validate_limits(
    http_timeout_seconds: u64,
    search_radius_meters: u32,
) -> Result<(), AppError> {
    if http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be greater than zero",
        ));
    }
    if search_radius_meters == 0 {
        return Err(AppError::config_error(
            "Search radius must be greater than zero",
        ));
    }
    Ok(())
}
