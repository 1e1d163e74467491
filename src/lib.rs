pub mod advisory;
pub mod clock;
pub mod commands;
pub mod config;
pub mod hydration;
pub mod ledger;
pub mod models;
pub mod reminder;
pub mod session;
pub mod weather;

#[cfg(test)]
mod test_utils;

pub use config::{Config, ConfigError};
pub use session::{AppState, HydrationSession};

use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "hydrocare=info";

/// Install the global fmt subscriber. `RUST_LOG` overrides the default filter.
/// A second call is a no-op.
pub fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
  let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Load configuration (including `.env`), start logging and build the shared state
pub fn bootstrap() -> Result<AppState, ConfigError> {
  let config = Config::load()?;
  init_tracing();

  let state = AppState::new(config);
  info!(
    weather = state.weather.is_some(),
    advisory = state.advisor.is_available(),
    "Hydration session ready"
  );
  Ok(state)
}
