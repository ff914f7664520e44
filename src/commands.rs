use std::path::Path;

use padel_slots::config::Config;
use padel_slots::error::AppError;
use padel_slots::preferences::{PreferencesStore, UserPreferences};

use crate::cli::{Args, is_preferences_command};

/// Validates command line argument combinations.
///
/// Returns an error if incompatible arguments are used together.
pub fn validate_args(args: &Args) -> Result<(), AppError> {
    if args.set_log_file.is_some() && args.clear_log_file {
        return Err(AppError::config_error(
            "Cannot use both --set-log-file and --clear-log-file",
        ));
    }
    if args.port.is_some() && args.once {
        return Err(AppError::config_error(
            "--port only applies to the HTTP service, not to --once",
        ));
    }
    if args.once && is_preferences_command(args) {
        return Err(AppError::config_error(
            "Preference options save and exit, they cannot be combined with --once",
        ));
    }
    // Fail on bad filter and preference values before any network work
    args.filter_criteria()?;
    args.preference_changes()?;
    Ok(())
}

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    Config::display().await?;

    let store = PreferencesStore::default();
    let prefs = store.load().await;
    println!("────────────────────────────────────");
    println!("Saved Preferences:");
    println!("{}", serde_json::to_string_pretty(&prefs)?);
    Ok(())
}

/// Handles configuration update commands
/// (--set-api-url, --set-fallback-api-url, --set-log-file, --clear-log-file).
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    update_config(args, &Config::get_config_path()).await?;
    if args.clear_log_file {
        println!("Custom log file path cleared. Using default location.");
    }
    println!("Config updated successfully!");
    Ok(())
}

/// Applies the configuration flags to the file at `path`.
///
/// A missing file starts from defaults. An unreadable or malformed one is an
/// error and is left untouched. The updated configuration is validated before
/// it is saved.
async fn update_config(args: &Args, path: &str) -> Result<Config, AppError> {
    let mut config = if Path::new(path).exists() {
        Config::load_from_path(path).await?
    } else {
        Config::default()
    };

    if let Some(url) = &args.set_api_url {
        config.api_base_url = url.trim().trim_end_matches('/').to_string();
    }

    if let Some(url) = &args.set_fallback_api_url {
        config.fallback_api_base_url = url.trim().trim_end_matches('/').to_string();
    }

    if let Some(new_log_path) = &args.set_log_file {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file {
        config.log_file_path = None;
    }

    config.validate()?;
    config.save_to_path(path).await?;
    Ok(config)
}

/// Handles preference edits (--set-day, --enable-day, --disable-day,
/// --select-club, --clear-clubs) and prints the saved result.
pub async fn handle_preferences_command(args: &Args) -> Result<(), AppError> {
    let store = PreferencesStore::default();
    let prefs = update_preferences(args, &store).await?;
    println!("Preferences saved to {}", store.path().display());
    println!("{}", serde_json::to_string_pretty(&prefs)?);
    Ok(())
}

/// Validates the preference flags, then applies them to `store` in one write.
async fn update_preferences(
    args: &Args,
    store: &PreferencesStore,
) -> Result<UserPreferences, AppError> {
    let changes = args.preference_changes()?;
    store.update(|prefs| changes.apply(prefs)).await
}
