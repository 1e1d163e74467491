//! Session-scoped hydration state
//!
//! `HydrationSession` owns the profile, target config and intake ledger for
//! the lifetime of the process. Nothing is persisted. `AppState` wraps it in a
//! lock alongside the external clients so the command layer can share it.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

use crate::advisory::{Advisor, AdvisoryProfile};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::hydration::{base_target, compose_recommendation, ActivityPlan, HydrationError, Recommendation};
use crate::ledger::{daily_window, IntakeLedger};
use crate::models::{BaseTarget, DrinkKind, IntakeEvent, TargetConfig, UserProfile, WeeklyTrend};
use crate::reminder::{countdown, ReminderStatus};
use crate::weather::WeatherClient;

/// ---------------------------------------------------------------------------
/// Hydration Session
/// ---------------------------------------------------------------------------

pub struct HydrationSession {
  profile: UserProfile,
  targets: TargetConfig,
  ledger: IntakeLedger,
  clock: Arc<dyn Clock>,
}

impl HydrationSession {
  pub fn new(clock: Arc<dyn Clock>) -> Self {
    Self {
      profile: UserProfile::default(),
      targets: TargetConfig::default(),
      ledger: IntakeLedger::new(),
      clock,
    }
  }

  /// Start with a configured reminder interval instead of the default
  pub fn with_reminder_interval(mut self, minutes: u32) -> Self {
    if minutes > 0 {
      self.targets.reminder_interval_minutes = minutes;
    }
    self
  }

  pub fn profile(&self) -> &UserProfile {
    &self.profile
  }

  pub fn target_config(&self) -> TargetConfig {
    self.targets
  }

  pub fn base_target(&self) -> BaseTarget {
    self.targets.base_target
  }

  pub fn ledger(&self) -> &IntakeLedger {
    &self.ledger
  }

  /// Replace the profile and recompute the base target. The only path that
  /// changes the target.
  pub fn update_profile(&mut self, profile: UserProfile) -> Result<BaseTarget, HydrationError> {
    profile.validate()?;

    let target = base_target(&profile);
    self.profile = profile;
    self.targets.base_target = target;

    info!(?target, "Profile updated");
    Ok(target)
  }

  pub fn set_reminder_interval(&mut self, minutes: i64) -> Result<u32, HydrationError> {
    let minutes = u32::try_from(minutes)
      .ok()
      .filter(|m| *m > 0)
      .ok_or(HydrationError::InvalidInterval(minutes))?;
    self.targets.reminder_interval_minutes = minutes;
    info!(minutes, "Reminder interval updated");
    Ok(minutes)
  }

  /// Record an intake stamped with the current instant
  pub fn record(&mut self, amount_ml: i64, drink_kind: DrinkKind) -> Result<IntakeEvent, HydrationError> {
    let now = self.clock.now();
    let event = self.ledger.record(amount_ml, drink_kind, now)?;
    info!(amount_ml = event.amount_ml, kind = %event.drink_kind, "Intake recorded");
    Ok(event)
  }

  /// Sum of today's intake, recomputed from the ledger on every call
  pub fn today_total(&self) -> u32 {
    self.ledger.total_on(self.clock.today())
  }

  pub fn today_events(&self) -> Vec<IntakeEvent> {
    self.ledger.events_on(self.clock.today()).cloned().collect()
  }

  pub fn weekly_trend(&self) -> WeeklyTrend {
    let trend = daily_window(&self.ledger, self.targets.base_target, self.clock.today());
    debug!(has_intake = trend.has_intake, scale_max_ml = trend.scale_max_ml, "Built weekly trend");
    trend
  }

  pub fn reminder(&self) -> ReminderStatus {
    let status = countdown(
      self.ledger.last_intake(),
      self.targets.reminder_interval_minutes,
      self.clock.now(),
    );
    debug!(%status, "Reminder evaluated");
    status
  }

  pub fn recommendation(&self, activity: Option<ActivityPlan>) -> Recommendation {
    let supplement = activity.map(|a| a.supplement_ml()).unwrap_or(0);
    compose_recommendation(self.targets.base_target, self.today_total(), supplement)
  }

  pub fn advisory_profile(&self) -> AdvisoryProfile {
    AdvisoryProfile::from_profile(&self.profile)
  }
}

/// ---------------------------------------------------------------------------
/// Application State
/// ---------------------------------------------------------------------------

/// Shared state handed to every command
pub struct AppState {
  pub session: RwLock<HydrationSession>,
  pub weather: Option<WeatherClient>,
  pub advisor: Advisor,
  pub config: Config,
}

impl AppState {
  pub fn new(config: Config) -> Self {
    Self::with_clock(config, Arc::new(SystemClock))
  }

  pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
    let weather = WeatherClient::from_config(&config)
      .map_err(|e| info!(error = %e, "Weather lookups disabled"))
      .ok();
    let advisor = Advisor::from_config(&config);
    Self::from_parts(config, clock, weather, advisor)
  }

  /// Assemble state from explicit clients
  pub fn from_parts(
    config: Config,
    clock: Arc<dyn Clock>,
    weather: Option<WeatherClient>,
    advisor: Advisor,
  ) -> Self {
    let session = HydrationSession::new(clock).with_reminder_interval(config.reminder_interval_minutes);
    Self {
      session: RwLock::new(session),
      weather,
      advisor,
      config,
    }
  }

  pub fn read_session(&self) -> Result<RwLockReadGuard<'_, HydrationSession>, String> {
    self
      .session
      .read()
      .map_err(|_| "Session state is unavailable".to_string())
  }

  pub fn write_session(&self) -> Result<RwLockWriteGuard<'_, HydrationSession>, String> {
    self
      .session
      .write()
      .map_err(|_| "Session state is unavailable".to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::hydration::ActivityKind;
  use crate::models::Gender;
  use crate::test_utils::{date, fixed_clock, local_datetime, mock_profile, seed_intake, session_at};
  use chrono::Duration;

  #[test]
  fn test_new_session_is_unconfigured() {
    let (session, _clock) = session_at(local_datetime(2025, 7, 20, 9, 0, 0));
    assert_eq!(session.base_target(), BaseTarget::NotConfigured);
    assert_eq!(session.target_config().reminder_interval_minutes, 60);
    assert_eq!(session.reminder(), ReminderStatus::NoRecord);
    assert_eq!(
      session.recommendation(None),
      Recommendation::NotConfigured { today_total_ml: 0 }
    );
  }

  #[test]
  fn test_update_profile_recomputes_target() {
    let (mut session, _clock) = session_at(local_datetime(2025, 7, 20, 9, 0, 0));

    let target = session.update_profile(mock_profile()).unwrap();
    assert_eq!(target, BaseTarget::Ml(2450)); // 70kg * 35
    assert_eq!(session.base_target(), BaseTarget::Ml(2450));

    let target = session
      .update_profile(UserProfile::new(70, Gender::Male, 70.0))
      .unwrap();
    assert_eq!(target, BaseTarget::Ml(2100)); // 70kg * 30
  }

  #[test]
  fn test_invalid_profile_leaves_state_untouched() {
    let (mut session, _clock) = session_at(local_datetime(2025, 7, 20, 9, 0, 0));
    session.update_profile(mock_profile()).unwrap();

    let bad = UserProfile::new(0, Gender::Male, 70.0);
    assert_eq!(
      session.update_profile(bad),
      Err(HydrationError::InvalidProfile("age"))
    );
    assert_eq!(session.profile(), &mock_profile());
    assert_eq!(session.base_target(), BaseTarget::Ml(2450));
  }

  #[test]
  fn test_clearing_profile_unsets_target() {
    let (mut session, _clock) = session_at(local_datetime(2025, 7, 20, 9, 0, 0));
    session.update_profile(mock_profile()).unwrap();

    let target = session.update_profile(UserProfile::default()).unwrap();
    assert_eq!(target, BaseTarget::NotConfigured);
  }

  #[test]
  fn test_record_and_recommendation_flow() {
    let (mut session, clock) = session_at(local_datetime(2025, 7, 20, 9, 0, 0));
    session
      .update_profile(UserProfile::new(30, Gender::Female, 57.142857))
      .unwrap();
    assert_eq!(session.base_target(), BaseTarget::Ml(2000));

    session.record(150, DrinkKind::Water).unwrap();
    clock.advance(Duration::minutes(30));
    session.record(500, DrinkKind::Tea).unwrap();

    assert_eq!(session.today_total(), 650);
    assert_eq!(session.today_events().len(), 2);

    let walk = ActivityPlan::new(ActivityKind::Walk, 30);
    match session.recommendation(Some(walk)) {
      Recommendation::Configured {
        remaining_base_ml,
        total_with_activity_ml,
        ..
      } => {
        assert_eq!(remaining_base_ml, 1350);
        assert_eq!(total_with_activity_ml, 2150);
      }
      other => panic!("unexpected recommendation: {:?}", other),
    }
  }

  #[test]
  fn test_rejected_record_does_not_reset_reminder() {
    let start = local_datetime(2025, 7, 20, 9, 0, 0);
    let (mut session, clock) = session_at(start);
    session.record(200, DrinkKind::Water).unwrap();

    clock.advance(Duration::minutes(61));
    assert!(session.record(0, DrinkKind::Water).is_err());
    assert!(session.record(-5, DrinkKind::Water).is_err());

    assert_eq!(session.ledger().len(), 1);
    assert!(session.reminder().is_due());

    session.record(250, DrinkKind::Water).unwrap();
    assert_eq!(session.reminder().remaining_seconds(), Some(3600));
  }

  #[test]
  fn test_today_total_tracks_the_clock_across_midnight() {
    let (mut session, clock) = session_at(local_datetime(2025, 7, 20, 22, 0, 0));
    session.record(400, DrinkKind::Water).unwrap();
    assert_eq!(session.today_total(), 400);

    clock.set(local_datetime(2025, 7, 21, 7, 0, 0));
    assert_eq!(session.today_total(), 0);

    let trend = session.weekly_trend();
    assert_eq!(trend.days.len(), 7);
    assert_eq!(trend.days[6].date, date(2025, 7, 21));
    assert_eq!(trend.days[5].total_ml, 400);
  }

  #[test]
  fn test_hourly_intake_and_reminder_interval() {
    let (mut session, clock) = session_at(local_datetime(2025, 7, 20, 8, 0, 0));
    session.update_profile(mock_profile()).unwrap();
    seed_intake(
      &mut session,
      &clock,
      &[(150, DrinkKind::Water), (300, DrinkKind::Tea), (500, DrinkKind::Water)],
    );

    // last drink at 10:00, clock now at 11:00
    assert_eq!(session.today_total(), 950);
    assert!(session.reminder().is_due());

    session.set_reminder_interval(90).unwrap();
    assert_eq!(session.reminder().remaining_seconds(), Some(1800));

    let trend = session.weekly_trend();
    assert_eq!(trend.days[6].total_ml, 950);
    assert!(trend.has_intake);
    assert_eq!(
      session.ledger().recent(2).iter().map(|e| e.amount_ml).collect::<Vec<_>>(),
      vec![300, 500]
    );
  }

  #[test]
  fn test_set_reminder_interval_validates() {
    let (mut session, _clock) = session_at(local_datetime(2025, 7, 20, 9, 0, 0));
    assert_eq!(session.set_reminder_interval(0), Err(HydrationError::InvalidInterval(0)));
    assert_eq!(session.set_reminder_interval(-30), Err(HydrationError::InvalidInterval(-30)));
    assert_eq!(session.set_reminder_interval(90), Ok(90));
    assert_eq!(session.target_config().reminder_interval_minutes, 90);
  }

  #[test]
  fn test_app_state_uses_configured_interval() {
    let config = Config {
      reminder_interval_minutes: 45,
      ..Config::default()
    };
    let clock = fixed_clock(local_datetime(2025, 7, 20, 9, 0, 0));
    let state = AppState::with_clock(config, clock);

    assert!(state.weather.is_none());
    assert!(!state.advisor.is_available());
    let session = state.read_session().unwrap();
    assert_eq!(session.target_config().reminder_interval_minutes, 45);
  }
}
