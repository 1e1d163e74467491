//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Pinned clocks and local-time constructors
//! - Mock data factories
//! - Helper assertions

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use std::sync::Arc;

use crate::clock::FixedClock;
use crate::models::{DrinkKind, Gender, UserProfile};
use crate::session::HydrationSession;

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

/// Build a local instant. Tests stick to daytime hours so DST gaps never bite.
pub fn local_datetime(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Local> {
  Local
    .with_ymd_and_hms(year, month, day, hour, min, sec)
    .single()
    .expect("Ambiguous or invalid local time in test")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day).expect("Invalid date in test")
}

pub fn fixed_clock(now: DateTime<Local>) -> Arc<FixedClock> {
  Arc::new(FixedClock::new(now))
}

/// ---------------------------------------------------------------------------
/// Session Factories
/// ---------------------------------------------------------------------------

/// A fresh session pinned at `now`, plus the clock to move it
pub fn session_at(now: DateTime<Local>) -> (HydrationSession, Arc<FixedClock>) {
  let clock = fixed_clock(now);
  (HydrationSession::new(clock.clone()), clock)
}

/// Record `(amount_ml, drink)` pairs, one per hour starting at the clock's now
pub fn seed_intake(
  session: &mut HydrationSession,
  clock: &FixedClock,
  entries: &[(i64, DrinkKind)],
) -> usize {
  let mut recorded = 0;
  for (amount_ml, drink_kind) in entries {
    session
      .record(*amount_ml, drink_kind.clone())
      .expect("Failed to seed intake");
    clock.advance(chrono::Duration::hours(1));
    recorded += 1;
  }
  recorded
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// 30 year old, 70kg: 2450 ml base target
pub fn mock_profile() -> UserProfile {
  UserProfile::new(30, Gender::Male, 70.0)
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff: f64 = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::clock::Clock;

  #[test]
  fn test_seed_intake_spreads_records_hourly() {
    let (mut session, clock) = session_at(local_datetime(2025, 7, 20, 8, 0, 0));
    let count = seed_intake(
      &mut session,
      &clock,
      &[(150, DrinkKind::Water), (300, DrinkKind::Tea), (500, DrinkKind::Water)],
    );

    assert_eq!(count, 3);
    assert_eq!(session.today_total(), 950);
    assert_eq!(clock.now(), local_datetime(2025, 7, 20, 11, 0, 0));

    let times: Vec<_> = session.ledger().events().iter().map(|e| e.timestamp).collect();
    assert_eq!(times[1] - times[0], chrono::Duration::hours(1));
  }

  #[test]
  fn test_mock_factories_create_valid_data() {
    let profile = mock_profile();
    assert!(profile.is_complete());
    assert!(profile.validate().is_ok());
  }

  #[test]
  fn test_datetime_helpers_agree() {
    let instant = local_datetime(2025, 7, 20, 12, 30, 0);
    assert_eq!(instant.date_naive(), date(2025, 7, 20));
  }
}
