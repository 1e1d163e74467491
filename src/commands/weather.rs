//! Weather and heat-stress lookup

use crate::session::AppState;
use crate::weather::WeatherReport;

const MSG_NOT_CONFIGURED: &str =
  "Weather lookups are unavailable. Check that the OpenWeatherMap API key is configured.";

/// Current conditions and heat stress for a location (the configured
/// default when none is given). Never fails; problems show up as an
/// unavailable report.
pub async fn get_weather_report(state: &AppState, location: Option<String>) -> WeatherReport {
  let location = location
    .map(|l| l.trim().to_string())
    .filter(|l| !l.is_empty())
    .unwrap_or_else(|| state.config.default_location.clone());

  let Some(client) = &state.weather else {
    return WeatherReport::unavailable(&location, MSG_NOT_CONFIGURED);
  };

  let result = client.current(&location).await;
  WeatherReport::from_result(&location, result)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::advisory::Advisor;
  use crate::config::Config;
  use crate::hydration::HeatStress;
  use crate::test_utils::{fixed_clock, local_datetime};
  use crate::weather::WeatherClient;
  use mockito::Matcher;

  #[tokio::test]
  async fn test_unconfigured_weather_is_unavailable() {
    let state = AppState::with_clock(
      Config::default(),
      fixed_clock(local_datetime(2025, 7, 20, 9, 0, 0)),
    );
    let report = get_weather_report(&state, None).await;

    assert_eq!(report.location, "Tokyo");
    assert_eq!(report.heat_stress, HeatStress::Unavailable);
    assert_eq!(report.message.as_deref(), Some(MSG_NOT_CONFIGURED));
  }

  #[tokio::test]
  async fn test_failed_lookup_keeps_session_intact() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
      .mock("GET", "/data/2.5/weather")
      .match_query(Matcher::Any)
      .with_status(500)
      .with_body("upstream down")
      .create_async()
      .await;

    let state = AppState::from_parts(
      Config::default(),
      fixed_clock(local_datetime(2025, 7, 20, 9, 0, 0)),
      Some(WeatherClient::new("k").with_base_url(&server.url())),
      Advisor::new(None),
    );
    crate::commands::intake::record_intake(&state, 250, "water").unwrap();

    let report = get_weather_report(&state, Some("Kyoto".into())).await;
    assert_eq!(report.location, "Kyoto");
    assert_eq!(report.heat_stress, HeatStress::Unavailable);
    assert!(report.message.is_some());

    assert_eq!(state.read_session().unwrap().today_total(), 250);
  }
}
