//! Operations exposed to the presentation layer
//!
//! Every command takes the shared `AppState`. Validation failures come back
//! as readable strings; external-service commands never fail and return a
//! degraded value instead.

pub mod advisory;
pub mod intake;
pub mod weather;

use crate::models::{BaseTarget, Gender, TargetConfig, UserProfile};
use crate::session::AppState;

/// ---------------------------------------------------------------------------
/// Profile & Settings Commands
/// ---------------------------------------------------------------------------

pub fn get_profile(state: &AppState) -> Result<UserProfile, String> {
  Ok(state.read_session()?.profile().clone())
}

/// Replace the profile and return the recomputed base target
pub fn update_profile(
  state: &AppState,
  age: Option<u32>,
  gender: Option<String>,
  weight_kg: Option<f64>,
) -> Result<BaseTarget, String> {
  let gender = match gender.as_deref().map(str::trim).filter(|g| !g.is_empty()) {
    Some(raw) => Some(Gender::parse(raw).ok_or_else(|| format!("Unknown gender: {}", raw))?),
    None => None,
  };

  let profile = UserProfile {
    age,
    gender,
    weight_kg,
  };

  state
    .write_session()?
    .update_profile(profile)
    .map_err(|e| format!("Failed to update profile: {}", e))
}

pub fn get_target_config(state: &AppState) -> Result<TargetConfig, String> {
  Ok(state.read_session()?.target_config())
}

pub fn set_reminder_interval(state: &AppState, minutes: i64) -> Result<u32, String> {
  state
    .write_session()?
    .set_reminder_interval(minutes)
    .map_err(|e| format!("Failed to update reminder: {}", e))
}
