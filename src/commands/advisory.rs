//! AI advice commands
//!
//! Inputs are copied out of the session before awaiting so the lock is never
//! held across a network call.

use crate::advisory::{Advisory, INSIGHT_LOG_LIMIT};
use crate::session::AppState;

pub async fn get_mood_advice(state: &AppState, mood_text: String) -> Result<Advisory, String> {
  let profile = state.read_session()?.advisory_profile();
  Ok(state.advisor.mood_advice(&mood_text, &profile).await)
}

pub async fn get_intake_insight(state: &AppState) -> Result<Advisory, String> {
  let (events, profile, base_target) = {
    let session = state.read_session()?;
    (
      session.ledger().recent(INSIGHT_LOG_LIMIT).to_vec(),
      session.advisory_profile(),
      session.base_target(),
    )
  };
  Ok(state.advisor.intake_insight(&events, &profile, base_target).await)
}
