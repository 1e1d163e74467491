//! Deterministic hydration calculations
//!
//! Base targets, heat-stress classification, activity fluid loss and the
//! recommendation figures shown on the home screen. Everything here is pure:
//! the session feeds in profile and ledger values, nothing is read from state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{BaseTarget, UserProfile};

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

/// Validation failures. Raised before any mutation happens.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum HydrationError {
  #[error("Intake amount must be greater than 0 ml (got {0})")]
  NonPositiveAmount(i64),

  #[error("Intake amount is out of range: {0} ml")]
  AmountOutOfRange(i64),

  #[error("Invalid profile field: {0}")]
  InvalidProfile(&'static str),

  #[error("Reminder interval must be a positive number of minutes (got {0})")]
  InvalidInterval(i64),
}

/// ---------------------------------------------------------------------------
/// Target Calculator
/// ---------------------------------------------------------------------------

/// Daily ml per kilogram of body weight for an age band
pub fn rate_ml_per_kg(age: u32) -> u32 {
  match age {
    a if a < 18 => 40,
    a if a >= 65 => 30,
    _ => 35,
  }
}

/// Compute the base daily target from a profile.
///
/// All three profile fields must be present (gender does not change the
/// result). Anything missing yields `NotConfigured`, not an error.
pub fn base_target(profile: &UserProfile) -> BaseTarget {
  match (profile.age, profile.gender, profile.weight_kg) {
    (Some(age), Some(_), Some(weight)) if age > 0 && weight.is_finite() && weight > 0.0 => {
      let ml = (weight * rate_ml_per_kg(age) as f64).round();
      BaseTarget::Ml(ml as u32)
    }
    _ => BaseTarget::NotConfigured,
  }
}

/// ---------------------------------------------------------------------------
/// Heat Stress (simplified WBGT)
/// ---------------------------------------------------------------------------

const WBGT_TEMP_COEFF: f64 = 0.735;
const WBGT_HUMIDITY_COEFF: f64 = 0.057;
const WBGT_OFFSET: f64 = 2.82;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatRiskTier {
  Watch,         // < 25
  Caution,       // 25-28
  SevereCaution, // 28-31
  Danger,        // >= 31
}

impl HeatRiskTier {
  /// Thresholds are closed at the lower edge: 25.0 is already `Caution`
  pub fn from_index(index: f64) -> Self {
    match index {
      i if i >= 31.0 => HeatRiskTier::Danger,
      i if i >= 28.0 => HeatRiskTier::SevereCaution,
      i if i >= 25.0 => HeatRiskTier::Caution,
      _ => HeatRiskTier::Watch,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      HeatRiskTier::Watch => "watch",
      HeatRiskTier::Caution => "caution",
      HeatRiskTier::SevereCaution => "severe caution",
      HeatRiskTier::Danger => "danger",
    }
  }

  pub fn guidance(&self) -> &'static str {
    match self {
      HeatRiskTier::Danger => {
        "Danger: avoid going out unless necessary, stay somewhere cool and drink frequently."
      }
      HeatRiskTier::SevereCaution => {
        "Severe caution: heatstroke risk is high. Stop exercising and keep up your fluids."
      }
      HeatRiskTier::Caution => "Caution: there is a risk of heatstroke. Drink actively.",
      HeatRiskTier::Watch => "Watch: stay aware of the heat and drink as needed.",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HeatStress {
  /// Temperature or humidity missing
  Unavailable,
  Assessed { index: f64, tier: HeatRiskTier },
}

/// Linear WBGT estimate, floored at 0
pub fn heat_index(temp_celsius: f64, humidity_pct: f64) -> f64 {
  (WBGT_TEMP_COEFF * temp_celsius + WBGT_HUMIDITY_COEFF * humidity_pct - WBGT_OFFSET).max(0.0)
}

pub fn classify_heat_stress(temp_celsius: Option<f64>, humidity_pct: Option<f64>) -> HeatStress {
  match (temp_celsius, humidity_pct) {
    (Some(temp), Some(humidity)) if temp.is_finite() && humidity.is_finite() => {
      let index = heat_index(temp, humidity);
      HeatStress::Assessed {
        index,
        tier: HeatRiskTier::from_index(index),
      }
    }
    _ => HeatStress::Unavailable,
  }
}

/// ---------------------------------------------------------------------------
/// Activity Loss
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
  #[default]
  #[serde(rename = "none")]
  Unspecified,
  Walk,
  Run,
  Cycle,
}

impl ActivityKind {
  /// Unrecognized names fall back to `Unspecified`
  pub fn parse(value: &str) -> Self {
    match value.trim().to_lowercase().as_str() {
      "walk" | "walking" => ActivityKind::Walk,
      "run" | "running" => ActivityKind::Run,
      "cycle" | "cycling" | "ride" | "bike" => ActivityKind::Cycle,
      _ => ActivityKind::Unspecified,
    }
  }

  /// Fluid lost per minute of activity
  pub fn loss_ml_per_minute(&self) -> u32 {
    match self {
      ActivityKind::Walk => 5,
      ActivityKind::Run => 10,
      ActivityKind::Cycle => 8,
      ActivityKind::Unspecified => 0,
    }
  }
}

/// Extra fluid needed for an activity session
pub fn activity_loss_ml(kind: ActivityKind, duration_minutes: i64) -> u32 {
  if duration_minutes <= 0 {
    return 0;
  }
  let minutes = u32::try_from(duration_minutes).unwrap_or(u32::MAX);
  minutes.saturating_mul(kind.loss_ml_per_minute())
}

/// An activity the user plans or did today
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityPlan {
  pub kind: ActivityKind,
  pub duration_minutes: i64,
}

impl ActivityPlan {
  pub fn new(kind: ActivityKind, duration_minutes: i64) -> Self {
    Self {
      kind,
      duration_minutes,
    }
  }

  pub fn supplement_ml(&self) -> u32 {
    activity_loss_ml(self.kind, self.duration_minutes)
  }
}

/// ---------------------------------------------------------------------------
/// Recommendation Composer
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Recommendation {
  /// No base target yet; remaining figures are meaningless
  NotConfigured { today_total_ml: u32 },

  Configured {
    base_target_ml: u32,
    today_total_ml: u32,
    activity_supplement_ml: u32,

    /// Base target minus today's total, floored at 0
    remaining_base_ml: u32,

    /// Activity raises the goal; it never discounts what was already drunk
    total_with_activity_ml: u32,

    /// Today's total as a percentage of the base target
    progress_pct: f64,

    goal_met: bool,
  },
}

impl Recommendation {
  pub fn is_configured(&self) -> bool {
    matches!(self, Recommendation::Configured { .. })
  }
}

pub fn compose_recommendation(
  base_target: BaseTarget,
  today_total_ml: u32,
  activity_supplement_ml: u32,
) -> Recommendation {
  let target = match base_target {
    BaseTarget::Ml(ml) => ml,
    BaseTarget::NotConfigured => return Recommendation::NotConfigured { today_total_ml },
  };

  let progress_pct = if target > 0 {
    today_total_ml as f64 / target as f64 * 100.0
  } else {
    0.0
  };

  Recommendation::Configured {
    base_target_ml: target,
    today_total_ml,
    activity_supplement_ml,
    remaining_base_ml: target.saturating_sub(today_total_ml),
    total_with_activity_ml: target.saturating_add(activity_supplement_ml),
    progress_pct,
    goal_met: today_total_ml >= target,
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
