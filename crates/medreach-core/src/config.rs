use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it from a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let non_empty_path = |var: &str, default: &str| -> Result<PathBuf, ConfigError> {
        let raw = or_default(var, default);
        if raw.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "path must be non-empty".to_string(),
            });
        }
        Ok(PathBuf::from(raw))
    };

    let env = parse_environment(&or_default("MEDREACH_ENV", "development"))?;
    let log_level = or_default("MEDREACH_LOG_LEVEL", "info");
    let facilities_path = non_empty_path(
        "MEDREACH_FACILITIES_PATH",
        "./data/processed/healthcare_facilities_clean.json",
    )?;
    let output_dir = non_empty_path("MEDREACH_OUTPUT_DIR", "./outputs")?;
    let settings_path = lookup("MEDREACH_SETTINGS_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        env,
        log_level,
        facilities_path,
        output_dir,
        settings_path,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MEDREACH_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
