//! Intake ledger and rolling daily aggregation
//!
//! The ledger is append-only: `record` is the only mutation, and a mistaken
//! entry can only be offset by a later compensating record. Date queries scan
//! the whole log on every call.

use chrono::{DateTime, Days, Local, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::hydration::HydrationError;
use crate::models::{BaseTarget, DailyTotal, DrinkKind, IntakeEvent, WeeklyTrend};

/// Days in the trend window, today included
pub const WINDOW_DAYS: u64 = 7;

/// Chart axis floor used when the target is small or unset
const MIN_SCALE_ML: u32 = 3000;

/// ---------------------------------------------------------------------------
/// Intake Ledger
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct IntakeLedger {
  events: Vec<IntakeEvent>,
  last_intake: Option<DateTime<Local>>,
}

impl IntakeLedger {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append an intake. Non-positive amounts are rejected without touching the log.
  pub fn record(
    &mut self,
    amount_ml: i64,
    drink_kind: DrinkKind,
    at: DateTime<Local>,
  ) -> Result<IntakeEvent, HydrationError> {
    if amount_ml <= 0 {
      return Err(HydrationError::NonPositiveAmount(amount_ml));
    }
    let amount_ml =
      u32::try_from(amount_ml).map_err(|_| HydrationError::AmountOutOfRange(amount_ml))?;

    let event = IntakeEvent {
      timestamp: at,
      amount_ml,
      drink_kind,
    };
    self.events.push(event.clone());
    self.last_intake = Some(at);

    debug!(amount_ml, kind = %event.drink_kind, entries = self.events.len(), "Recorded intake");
    Ok(event)
  }

  /// Events on a calendar date, in insertion order. The iterator is `Clone`,
  /// so callers can walk it more than once.
  pub fn events_on(
    &self,
    date: NaiveDate,
  ) -> impl Iterator<Item = &IntakeEvent> + Clone + '_ {
    self.events.iter().filter(move |e| e.date() == date)
  }

  pub fn total_on(&self, date: NaiveDate) -> u32 {
    self
      .events_on(date)
      .fold(0u32, |acc, e| acc.saturating_add(e.amount_ml))
  }

  /// The last `n` events, oldest first
  pub fn recent(&self, n: usize) -> &[IntakeEvent] {
    let start = self.events.len().saturating_sub(n);
    &self.events[start..]
  }

  pub fn events(&self) -> &[IntakeEvent] {
    &self.events
  }

  /// Instant of the most recent successful `record`
  pub fn last_intake(&self) -> Option<DateTime<Local>> {
    self.last_intake
  }

  pub fn len(&self) -> usize {
    self.events.len()
  }

  pub fn is_empty(&self) -> bool {
    self.events.is_empty()
  }
}

/// ---------------------------------------------------------------------------
/// Daily Aggregator
/// ---------------------------------------------------------------------------

/// Build the 7-day window ending `today`.
///
/// Always returns exactly `WINDOW_DAYS` entries in ascending date order. Days
/// without intake are zero, never skipped. The current target is applied to
/// every day, including days recorded before the last profile change.
pub fn daily_window(ledger: &IntakeLedger, base_target: BaseTarget, today: NaiveDate) -> WeeklyTrend {
  let days: Vec<DailyTotal> = (0..WINDOW_DAYS)
    .rev()
    .map(|offset| {
      let date = today - Days::new(offset);
      DailyTotal {
        date,
        total_ml: ledger.total_on(date),
        target: base_target,
      }
    })
    .collect();

  let has_intake = days.iter().any(|d| d.total_ml > 0);
  let scale_max_ml = match base_target {
    BaseTarget::Ml(ml) => ((ml as f64 * 1.5).round() as u32).max(MIN_SCALE_ML),
    BaseTarget::NotConfigured => MIN_SCALE_ML,
  };

  WeeklyTrend {
    days,
    has_intake,
    scale_max_ml,
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
