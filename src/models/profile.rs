use serde::{Deserialize, Serialize};

use crate::hydration::HydrationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
  Male,
  Female,
  Other,
}

impl Gender {
  /// Lenient parse for form input; unknown strings yield None
  pub fn parse(value: &str) -> Option<Self> {
    match value.trim().to_lowercase().as_str() {
      "male" | "m" => Some(Gender::Male),
      "female" | "f" => Some(Gender::Female),
      "other" => Some(Gender::Other),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Gender::Male => "male",
      Gender::Female => "female",
      Gender::Other => "other",
    }
  }
}

/// User profile driving the base target.
///
/// Every field is optional: an unset profile is a valid state and is kept
/// distinct from a zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
  pub age: Option<u32>,
  pub gender: Option<Gender>,
  pub weight_kg: Option<f64>,
}

impl UserProfile {
  pub fn new(age: u32, gender: Gender, weight_kg: f64) -> Self {
    Self {
      age: Some(age),
      gender: Some(gender),
      weight_kg: Some(weight_kg),
    }
  }

  /// True when all three fields needed for a target are set
  pub fn is_complete(&self) -> bool {
    self.age.is_some() && self.gender.is_some() && self.weight_kg.is_some()
  }

  /// Reject values that are set but meaningless (zero age, non-positive weight)
  pub fn validate(&self) -> Result<(), HydrationError> {
    if self.age == Some(0) {
      return Err(HydrationError::InvalidProfile("age"));
    }
    if let Some(weight) = self.weight_kg {
      if !weight.is_finite() || weight <= 0.0 {
        return Err(HydrationError::InvalidProfile("weight_kg"));
      }
    }
    Ok(())
  }
}
