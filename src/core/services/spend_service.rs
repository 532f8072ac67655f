//! Spend recording: one atomic unit of append + accumulate + inline check.

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::{
    core::{
        clock::Clock,
        errors::{PacingError, Result},
    },
    domain::Spend,
    storage::BudgetStore,
};

/// Records spend events against a campaign.
pub struct SpendService;

impl SpendService {
    /// Appends an immutable spend event, bumps the campaign's daily and
    /// monthly accumulators, and applies the record-path budget check
    /// (strict `>`, daily before monthly) — committed as a single unit of
    /// work. A failure anywhere leaves no partial state behind.
    pub fn record(
        store: &dyn BudgetStore,
        clock: &dyn Clock,
        campaign_id: Uuid,
        amount: Decimal,
    ) -> Result<Spend> {
        if amount < Decimal::ZERO {
            return Err(PacingError::Validation(format!(
                "spend amount must be non-negative, got {amount}"
            )));
        }

        let mut campaign = store.campaign(campaign_id)?;
        let now = clock.now();
        let spend = Spend::new(campaign_id, amount, clock.today(), Some(clock.hour()), now)?;

        campaign.apply_spend(amount);
        if let Some(reason) = campaign.record_breach() {
            campaign.pause(reason);
            info!(
                campaign = %campaign.id,
                %reason,
                daily_spend = %campaign.daily_spend,
                monthly_spend = %campaign.monthly_spend,
                "paused campaign after spend exceeded budget"
            );
        }
        campaign.touch(now);
        store.commit_spend(&spend, &campaign)?;
        Ok(spend)
    }
}
