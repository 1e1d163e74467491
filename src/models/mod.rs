pub mod intake;
pub mod profile;
pub mod target;
pub mod trend;

pub use intake::{DrinkKind, IntakeEvent};
pub use profile::{Gender, UserProfile};
pub use target::{BaseTarget, TargetConfig, DEFAULT_REMINDER_INTERVAL_MINUTES};
pub use trend::{DailyTotal, WeeklyTrend};
