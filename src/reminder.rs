//! Next-intake countdown
//!
//! Recomputed on every query from the last intake instant; there is no timer.
//! Remaining time only grows again when a new intake is recorded.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReminderStatus {
  /// Nothing recorded yet, so there is nothing to count down from
  NoRecord,
  Due,
  Remaining { minutes: i64, seconds: i64 },
}

impl ReminderStatus {
  pub fn is_due(&self) -> bool {
    matches!(self, ReminderStatus::Due)
  }

  pub fn remaining_seconds(&self) -> Option<i64> {
    match self {
      ReminderStatus::Remaining { minutes, seconds } => Some(minutes * 60 + seconds),
      _ => None,
    }
  }
}

impl fmt::Display for ReminderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReminderStatus::NoRecord => f.write_str("No intake recorded yet"),
      ReminderStatus::Due => f.write_str("Time to drink!"),
      ReminderStatus::Remaining { minutes, seconds } => {
        write!(f, "{:02}m {:02}s until next drink", minutes, seconds)
      }
    }
  }
}

/// Evaluate the reminder at `now`.
///
/// Sub-second remainders are floored, so 10.5s elapsed on a 60 minute
/// interval reads as 59m 49s.
pub fn countdown(
  last_intake: Option<DateTime<Local>>,
  interval_minutes: u32,
  now: DateTime<Local>,
) -> ReminderStatus {
  let Some(last) = last_intake else {
    return ReminderStatus::NoRecord;
  };

  let elapsed_ms = (now - last).num_milliseconds();
  let remaining_ms = i64::from(interval_minutes) * 60_000 - elapsed_ms;

  if remaining_ms <= 0 {
    return ReminderStatus::Due;
  }

  let remaining_secs = remaining_ms / 1000;
  ReminderStatus::Remaining {
    minutes: remaining_secs / 60,
    seconds: remaining_secs % 60,
  }
}
