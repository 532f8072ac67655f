pub mod json_backend;

use uuid::Uuid;

use crate::core::errors::Result;
use crate::domain::{Brand, Campaign, DaypartingSchedule, Spend};

/// Abstraction over persistence backends holding brands, campaigns, their
/// dayparting windows, and the append-only spend history.
///
/// Writes of existing entities are compare-and-swap on the entity `version`:
/// a stale snapshot is rejected with `PacingError::Conflict` instead of
/// silently losing a concurrent update.
pub trait BudgetStore: Send + Sync {
    fn brand(&self, id: Uuid) -> Result<Brand>;
    fn campaign(&self, id: Uuid) -> Result<Campaign>;

    fn brands(&self) -> Result<Vec<Brand>>;
    fn campaigns(&self) -> Result<Vec<Campaign>>;
    /// Campaigns with the `is_active` flag set.
    fn active_campaigns(&self) -> Result<Vec<Campaign>>;
    /// Campaigns currently in the paused state.
    fn paused_campaigns(&self) -> Result<Vec<Campaign>>;
    /// Active dayparting windows for one campaign.
    fn schedules(&self, campaign_id: Uuid) -> Result<Vec<DaypartingSchedule>>;
    /// Full spend history for one campaign, oldest first.
    fn spends(&self, campaign_id: Uuid) -> Result<Vec<Spend>>;

    fn insert_brand(&self, brand: Brand) -> Result<Brand>;
    fn insert_campaign(&self, campaign: Campaign) -> Result<Campaign>;
    fn insert_schedule(&self, schedule: DaypartingSchedule) -> Result<DaypartingSchedule>;

    /// Writes back a modified brand, returning the stored value with its
    /// version bumped.
    fn save_brand(&self, brand: &Brand) -> Result<Brand>;
    /// Writes back a modified campaign, returning the stored value with its
    /// version bumped.
    fn save_campaign(&self, campaign: &Campaign) -> Result<Campaign>;

    /// Appends a spend event and writes back the owning campaign as one
    /// all-or-nothing unit.
    fn commit_spend(&self, spend: &Spend, campaign: &Campaign) -> Result<Campaign>;
}

pub use json_backend::{JsonStore, STORE_SCHEMA_VERSION};
