//! OpenWeatherMap integration for heat-stress input
//!
//! Only temperature, humidity and a short description are kept. Provider
//! payload types stay private to this module; callers see
//! `WeatherConditions` or a `WeatherError`, and `WeatherReport` folds any
//! failure into an "unavailable" heat-stress reading.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{Config, DEFAULT_WEATHER_LANG, WEATHER_API_KEY_VAR};
use crate::hydration::{classify_heat_stress, HeatStress};

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org";
const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";
const UNKNOWN_DESCRIPTION: &str = "unknown";

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum WeatherError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("Invalid location: {0:?}")]
  InvalidLocation(String),

  #[error("HTTP request failed: {0}")]
  Request(String),

  #[error("API error: {0}")]
  Api(String),

  #[error("Malformed weather payload: {0}")]
  Parse(String),

  #[error("Weather payload missing field: {0}")]
  MissingField(String),
}

impl From<reqwest::Error> for WeatherError {
  fn from(e: reqwest::Error) -> Self {
    WeatherError::Request(e.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Weather Data
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConditions {
  pub location: String,
  pub temperature_c: f64,
  pub humidity_pct: f64,
  pub description: String,
}

impl WeatherConditions {
  pub fn heat_stress(&self) -> HeatStress {
    classify_heat_stress(Some(self.temperature_c), Some(self.humidity_pct))
  }
}

/// What the weather screen shows. Built from either outcome of a fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
  pub location: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub conditions: Option<WeatherConditions>,
  pub heat_stress: HeatStress,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub guidance: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
}

impl WeatherReport {
  pub fn from_result(location: &str, result: Result<WeatherConditions, WeatherError>) -> Self {
    match result {
      Ok(conditions) => {
        let heat_stress = conditions.heat_stress();
        let guidance = match heat_stress {
          HeatStress::Assessed { tier, .. } => Some(tier.guidance().to_string()),
          HeatStress::Unavailable => None,
        };
        Self {
          location: conditions.location.clone(),
          conditions: Some(conditions),
          heat_stress,
          guidance,
          message: None,
        }
      }
      Err(e) => {
        warn!(location, error = %e, "Weather lookup failed");
        Self::unavailable(location, "Weather data is temporarily unavailable.")
      }
    }
  }

  pub fn unavailable(location: &str, message: &str) -> Self {
    Self {
      location: location.to_string(),
      conditions: None,
      heat_stress: HeatStress::Unavailable,
      guidance: None,
      message: Some(message.to_string()),
    }
  }
}

/// Current weather response (subset we read)
#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
  main: Option<MainBlock>,
  #[serde(default)]
  weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
  temp: Option<f64>,
  humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
  description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
  message: String,
}

/// ---------------------------------------------------------------------------
/// Weather Client
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct WeatherClient {
  client: Client,
  api_key: String,
  base_url: String,
  lang: String,
}

impl WeatherClient {
  pub fn new(api_key: impl Into<String>) -> Self {
    Self {
      client: Client::new(),
      api_key: api_key.into(),
      base_url: OPENWEATHER_API_BASE.to_string(),
      lang: DEFAULT_WEATHER_LANG.to_string(),
    }
  }

  pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
    let api_key = config
      .weather_api_key
      .clone()
      .ok_or_else(|| WeatherError::MissingConfig(WEATHER_API_KEY_VAR.into()))?;
    Ok(Self::new(api_key).with_lang(&config.weather_lang))
  }

  /// Point at a different host (mock servers in tests)
  pub fn with_base_url(mut self, base_url: &str) -> Self {
    self.base_url = base_url.trim_end_matches('/').to_string();
    self
  }

  pub fn with_lang(mut self, lang: &str) -> Self {
    self.lang = lang.to_string();
    self
  }

  fn current_weather_url(&self, location: &str) -> Result<url::Url, WeatherError> {
    let mut url = url::Url::parse(&format!("{}{}", self.base_url, CURRENT_WEATHER_PATH))
      .map_err(|e| WeatherError::MissingConfig(format!("bad base url: {}", e)))?;
    url
      .query_pairs_mut()
      .append_pair("q", location)
      .append_pair("appid", &self.api_key)
      .append_pair("units", "metric")
      .append_pair("lang", &self.lang);
    Ok(url)
  }

  /// Fetch current conditions for a named location
  pub async fn current(&self, location: &str) -> Result<WeatherConditions, WeatherError> {
    let location = location.trim();
    if location.is_empty() {
      return Err(WeatherError::InvalidLocation(location.to_string()));
    }

    let url = self.current_weather_url(location)?;
    debug!(location, "Fetching current weather");

    let response = self.client.get(url).send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
      if let Ok(error_resp) = serde_json::from_str::<ApiErrorResponse>(&body) {
        return Err(WeatherError::Api(format!("HTTP {}: {}", status, error_resp.message)));
      }
      return Err(WeatherError::Api(format!("HTTP {}: {}", status, body)));
    }

    let payload: CurrentWeatherResponse =
      serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))?;

    let main = payload
      .main
      .ok_or_else(|| WeatherError::MissingField("main".into()))?;
    let temperature_c = main
      .temp
      .ok_or_else(|| WeatherError::MissingField("main.temp".into()))?;
    let humidity_pct = main
      .humidity
      .ok_or_else(|| WeatherError::MissingField("main.humidity".into()))?;
    let description = payload
      .weather
      .into_iter()
      .next()
      .and_then(|w| w.description)
      .unwrap_or_else(|| UNKNOWN_DESCRIPTION.to_string());

    Ok(WeatherConditions {
      location: location.to_string(),
      temperature_c,
      humidity_pct,
      description,
    })
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
