//! Environment-supplied settings, read once at startup

use serde::Serialize;
use std::env;
use thiserror::Error;

use crate::models::DEFAULT_REMINDER_INTERVAL_MINUTES;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

pub const WEATHER_API_KEY_VAR: &str = "WEATHER_API";
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API";
pub const REMINDER_INTERVAL_VAR: &str = "HYDROCARE_REMINDER_MINUTES";
pub const LOCATION_VAR: &str = "HYDROCARE_LOCATION";
pub const WEATHER_LANG_VAR: &str = "HYDROCARE_WEATHER_LANG";

pub const DEFAULT_LOCATION: &str = "Tokyo";
pub const DEFAULT_WEATHER_LANG: &str = "en";

/// Keys shipped in sample env files start with this and are never real
const PLACEHOLDER_PREFIX: &str = "YOUR_";

#[derive(Error, Debug, Serialize)]
pub enum ConfigError {
  #[error("Invalid value for {name}: {value:?}")]
  InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
  pub weather_api_key: Option<String>,
  pub gemini_api_key: Option<String>,
  pub reminder_interval_minutes: u32,
  pub default_location: String,
  pub weather_lang: String,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      weather_api_key: None,
      gemini_api_key: None,
      reminder_interval_minutes: DEFAULT_REMINDER_INTERVAL_MINUTES,
      default_location: DEFAULT_LOCATION.to_string(),
      weather_lang: DEFAULT_WEATHER_LANG.to_string(),
    }
  }
}

impl Config {
  /// Load `.env` (if any) and read the process environment
  pub fn load() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();
    Self::from_env()
  }

  pub fn from_env() -> Result<Self, ConfigError> {
    let reminder_interval_minutes = match non_empty_var(REMINDER_INTERVAL_VAR) {
      Some(raw) => match raw.parse::<u32>() {
        Ok(minutes) if minutes > 0 => minutes,
        _ => {
          return Err(ConfigError::InvalidValue {
            name: REMINDER_INTERVAL_VAR,
            value: raw,
          })
        }
      },
      None => DEFAULT_REMINDER_INTERVAL_MINUTES,
    };

    Ok(Self {
      weather_api_key: api_key(WEATHER_API_KEY_VAR),
      gemini_api_key: api_key(GEMINI_API_KEY_VAR),
      reminder_interval_minutes,
      default_location: non_empty_var(LOCATION_VAR).unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
      weather_lang: non_empty_var(WEATHER_LANG_VAR)
        .unwrap_or_else(|| DEFAULT_WEATHER_LANG.to_string()),
    })
  }
}

fn non_empty_var(name: &str) -> Option<String> {
  env::var(name)
    .ok()
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
}

/// An API key, or None when unset or still a placeholder
fn api_key(name: &str) -> Option<String> {
  non_empty_var(name).filter(|v| !v.starts_with(PLACEHOLDER_PREFIX))
}
