use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What was drunk. The fixed kinds mirror the quick-pick menu; anything else
/// is kept verbatim as `Custom`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrinkKind {
  #[default]
  Water,
  Tea,
  SportsDrink,
  Juice,
  Coffee,
  Other,
  Custom(String),
}

impl DrinkKind {
  pub fn parse(value: &str) -> Self {
    let trimmed = value.trim();
    match trimmed.to_lowercase().as_str() {
      "water" => DrinkKind::Water,
      "tea" => DrinkKind::Tea,
      "sports drink" | "sports_drink" | "sportsdrink" => DrinkKind::SportsDrink,
      "juice" => DrinkKind::Juice,
      "coffee" => DrinkKind::Coffee,
      "" | "other" => DrinkKind::Other,
      _ => DrinkKind::Custom(trimmed.to_string()),
    }
  }

  pub fn label(&self) -> &str {
    match self {
      DrinkKind::Water => "water",
      DrinkKind::Tea => "tea",
      DrinkKind::SportsDrink => "sports drink",
      DrinkKind::Juice => "juice",
      DrinkKind::Coffee => "coffee",
      DrinkKind::Other => "other",
      DrinkKind::Custom(name) => name,
    }
  }
}

impl fmt::Display for DrinkKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// A single recorded intake. Only produced by `IntakeLedger::record`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeEvent {
  pub timestamp: DateTime<Local>,

  /// Always > 0
  pub amount_ml: u32,

  pub drink_kind: DrinkKind,
}

impl IntakeEvent {
  /// Calendar date of the event in local time
  pub fn date(&self) -> NaiveDate {
    self.timestamp.date_naive()
  }
}
