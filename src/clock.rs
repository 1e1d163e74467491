//! Wall-clock access for derived state
//!
//! "Today" and the reminder countdown depend on the current instant. The
//! session reads it through `Clock` so tests can pin time.

use chrono::{DateTime, Duration, Local, NaiveDate};
use std::sync::RwLock;

pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Local>;

  fn today(&self) -> NaiveDate {
    self.now().date_naive()
  }
}

/// Reads the system clock in local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Local> {
    Local::now()
  }
}

/// A clock that only moves when told to
#[derive(Debug)]
pub struct FixedClock {
  now: RwLock<DateTime<Local>>,
}

impl FixedClock {
  pub fn new(now: DateTime<Local>) -> Self {
    Self {
      now: RwLock::new(now),
    }
  }

  pub fn set(&self, now: DateTime<Local>) {
    let mut guard = self.now.write().unwrap_or_else(|e| e.into_inner());
    *guard = now;
  }

  pub fn advance(&self, by: Duration) {
    let mut guard = self.now.write().unwrap_or_else(|e| e.into_inner());
    *guard = *guard + by;
  }
}

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Local> {
    *self.now.read().unwrap_or_else(|e| e.into_inner())
  }
}
