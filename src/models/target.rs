use serde::{Deserialize, Serialize};

pub const DEFAULT_REMINDER_INTERVAL_MINUTES: u32 = 60;

/// Base daily target. `NotConfigured` until a complete profile is submitted;
/// it must never be read as "a target of zero".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum BaseTarget {
  #[default]
  NotConfigured,
  Ml(u32),
}

impl BaseTarget {
  pub fn is_configured(&self) -> bool {
    matches!(self, BaseTarget::Ml(_))
  }

  pub fn ml(&self) -> Option<u32> {
    match self {
      BaseTarget::Ml(ml) => Some(*ml),
      BaseTarget::NotConfigured => None,
    }
  }

  /// Numeric view for charts; 0 when not configured
  pub fn ml_or_zero(&self) -> u32 {
    self.ml().unwrap_or(0)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
  pub base_target: BaseTarget,
  pub reminder_interval_minutes: u32,
}

impl Default for TargetConfig {
  fn default() -> Self {
    Self {
      base_target: BaseTarget::NotConfigured,
      reminder_interval_minutes: DEFAULT_REMINDER_INTERVAL_MINUTES,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_base_target_serialization_is_tagged() {
    let json = serde_json::to_string(&BaseTarget::NotConfigured).unwrap();
    assert_eq!(json, r#"{"status":"not_configured"}"#);

    let json = serde_json::to_string(&BaseTarget::Ml(2100)).unwrap();
    assert_eq!(json, r#"{"status":"ml","value":2100}"#);
  }

  #[test]
  fn test_default_config() {
    let config = TargetConfig::default();
    assert!(!config.base_target.is_configured());
    assert_eq!(config.base_target.ml_or_zero(), 0);
    assert_eq!(config.reminder_interval_minutes, 60);
  }
}
