//! Value-typed entities and the budget/dayparting rules that act on them.

pub mod brand;
pub mod campaign;
pub mod common;
pub mod schedule;
pub mod spend;

pub use brand::Brand;
pub use campaign::{Campaign, CampaignStatus, PauseReason};
pub use common::{Identifiable, Versioned};
pub use schedule::{is_hour_in_range, DaypartingSchedule};
pub use spend::Spend;
