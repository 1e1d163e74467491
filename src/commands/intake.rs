//! Intake logging and the read models built on it

use crate::hydration::{ActivityKind, ActivityPlan, Recommendation};
use crate::models::{DrinkKind, IntakeEvent, WeeklyTrend};
use crate::reminder::ReminderStatus;
use crate::session::AppState;

/// ---------------------------------------------------------------------------
/// Write
/// ---------------------------------------------------------------------------

#[tracing::instrument(skip(state))]
pub fn record_intake(state: &AppState, amount_ml: i64, drink_kind: &str) -> Result<IntakeEvent, String> {
  state
    .write_session()?
    .record(amount_ml, DrinkKind::parse(drink_kind))
    .map_err(|e| format!("Failed to record intake: {}", e))
}

/// ---------------------------------------------------------------------------
/// Read Models
/// ---------------------------------------------------------------------------

pub fn list_today_intake(state: &AppState) -> Result<Vec<IntakeEvent>, String> {
  Ok(state.read_session()?.today_events())
}

pub fn get_weekly_trend(state: &AppState) -> Result<WeeklyTrend, String> {
  Ok(state.read_session()?.weekly_trend())
}

pub fn get_reminder(state: &AppState) -> Result<ReminderStatus, String> {
  Ok(state.read_session()?.reminder())
}

/// Home-screen figures, optionally adjusted for today's activity
pub fn get_recommendation(
  state: &AppState,
  activity_kind: Option<&str>,
  duration_minutes: Option<i64>,
) -> Result<Recommendation, String> {
  let activity = activity_kind.map(|kind| {
    ActivityPlan::new(ActivityKind::parse(kind), duration_minutes.unwrap_or(0))
  });
  Ok(state.read_session()?.recommendation(activity))
}
