//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::models::ElevationPolicy;
use crate::storage::keys;

const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const DEFAULT_TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Server ---
    /// Server port
    pub port: u16,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,

    // --- Storage ---
    /// Directory holding `<key>.json` files
    pub storage_dir: PathBuf,
    /// Key the workout collection is stored under
    pub storage_key: String,

    // --- Map ---
    pub map_initial_zoom: u8,
    pub map_focus_zoom: u8,
    pub map_pan_duration_secs: f64,
    pub map_tile_url: String,
    pub map_tile_attribution: String,

    // --- Validation ---
    /// Whether cycling elevation gain may be negative
    pub elevation_policy: ElevationPolicy,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            storage_dir: PathBuf::from("data"),
            storage_key: keys::WORKOUTS.to_string(),
            map_initial_zoom: 15,
            map_focus_zoom: 13,
            map_pan_duration_secs: 1.0,
            map_tile_url: DEFAULT_TILE_URL.to_string(),
            map_tile_attribution: DEFAULT_TILE_ATTRIBUTION.to_string(),
            elevation_policy: ElevationPolicy::AnyFinite,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        let defaults = Self::default();

        Ok(Self {
            port: parse_var("PORT", defaults.port)?,
            frontend_url: env::var("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            storage_dir: env::var("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            storage_key: env::var("STORAGE_KEY")
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.storage_key),
            map_initial_zoom: parse_var("MAP_INITIAL_ZOOM", defaults.map_initial_zoom)?,
            map_focus_zoom: parse_var("MAP_FOCUS_ZOOM", defaults.map_focus_zoom)?,
            map_pan_duration_secs: parse_var(
                "MAP_PAN_DURATION_SECS",
                defaults.map_pan_duration_secs,
            )?,
            map_tile_url: env::var("MAP_TILE_URL").unwrap_or(defaults.map_tile_url),
            map_tile_attribution: env::var("MAP_TILE_ATTRIBUTION")
                .unwrap_or(defaults.map_tile_attribution),
            elevation_policy: parse_var("ELEVATION_POLICY", defaults.elevation_policy)?,
        })
    }
}

/// Parse an optional variable, using `default` when it is unset.
fn parse_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both cases live in one test because the process environment is shared
    // between test threads.
    #[test]
    fn test_config_from_env() {
        env::set_var("MAP_FOCUS_ZOOM", "12");
        env::set_var("ELEVATION_POLICY", "non_negative");
        env::set_var("STORAGE_DIR", "/tmp/workouts");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.map_focus_zoom, 12);
        assert_eq!(config.map_initial_zoom, 15);
        assert_eq!(config.elevation_policy, ElevationPolicy::NonNegative);
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/workouts"));
        assert_eq!(config.storage_key, "workouts");

        env::set_var("ELEVATION_POLICY", "sometimes");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("ELEVATION_POLICY"));

        env::remove_var("MAP_FOCUS_ZOOM");
        env::remove_var("ELEVATION_POLICY");
        env::remove_var("STORAGE_DIR");
    }
}
