use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::BaseTarget;

/// One day of the rolling window. Derived on every request, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
  pub date: NaiveDate,
  pub total_ml: u32,
  pub target: BaseTarget,
}

/// The 7-day window handed to trend charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTrend {
  /// Exactly 7 entries, ascending by date, ending today
  pub days: Vec<DailyTotal>,

  /// False when every day in the window is zero
  pub has_intake: bool,

  /// Upper bound for the chart's ml axis
  pub scale_max_ml: u32,
}
