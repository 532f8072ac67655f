//! Periodic enforcement sweeps over brands and campaigns.
//!
//! Each sweep walks its entity set as a sequence of independent per-entity
//! updates and only writes back entities that actually changed, so re-running
//! a sweep against unchanged state is a no-op.

use tracing::info;

use crate::{
    core::{clock::Clock, errors::Result},
    domain::{schedule, CampaignStatus, PauseReason},
    storage::BudgetStore,
};

/// Counts of transitions applied by one sweep run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepOutcome {
    pub examined: usize,
    pub paused: usize,
    pub resumed: usize,
}

/// Counts of accumulators zeroed by one reset run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResetOutcome {
    pub examined: usize,
    pub reset: usize,
}

/// Applies the budget and dayparting rules across all tracked entities.
pub struct EnforcementService;

impl EnforcementService {
    /// Budget sweep: deactivate any brand or campaign whose spend has reached
    /// a budget (`>=`, daily checked first), and reactivate entities that are
    /// paused purely for budget reasons once both accumulators are back
    /// under. Brands only toggle `is_active`; campaigns also record which
    /// budget tripped.
    pub fn sweep_budgets(store: &dyn BudgetStore, clock: &dyn Clock) -> Result<SweepOutcome> {
        let mut outcome = SweepOutcome::default();
        let now = clock.now();

        for mut brand in store.brands()? {
            outcome.examined += 1;
            if brand.check_budget_limits() {
                brand.touch(now);
                let brand = store.save_brand(&brand)?;
                if brand.is_active {
                    outcome.resumed += 1;
                    info!(brand = %brand.id, "reactivated brand under budget");
                } else {
                    outcome.paused += 1;
                    info!(brand = %brand.id, "deactivated brand over budget");
                }
            }
        }

        for mut campaign in store.campaigns()? {
            if campaign.status == CampaignStatus::Completed {
                continue;
            }
            outcome.examined += 1;
            if campaign.check_budget_limits() {
                campaign.touch(now);
                let campaign = store.save_campaign(&campaign)?;
                match campaign.pause_reason {
                    Some(reason) => {
                        outcome.paused += 1;
                        info!(campaign = %campaign.id, %reason, "paused campaign over budget");
                    }
                    None => {
                        outcome.resumed += 1;
                        info!(campaign = %campaign.id, "resumed campaign under budget");
                    }
                }
            }
        }

        Ok(outcome)
    }

    /// Reactivation sweep: resume any paused campaign, whatever the pause
    /// reason, once both accumulators are strictly under budget.
    pub fn sweep_reactivations(store: &dyn BudgetStore, clock: &dyn Clock) -> Result<SweepOutcome> {
        let mut outcome = SweepOutcome::default();
        let now = clock.now();

        for mut campaign in store.paused_campaigns()? {
            outcome.examined += 1;
            if campaign.can_resume() {
                campaign.resume();
                campaign.touch(now);
                let campaign = store.save_campaign(&campaign)?;
                outcome.resumed += 1;
                info!(campaign = %campaign.id, "resumed eligible campaign");
            }
        }

        Ok(outcome)
    }

    /// Dayparting sweep: pause active campaigns that have windows but are
    /// outside all of them, and resume campaigns paused for dayparting once a
    /// window opens again and budgets allow. Campaigns without schedules are
    /// unrestricted in time and skipped entirely; budget-paused campaigns are
    /// not touched.
    pub fn sweep_dayparting(store: &dyn BudgetStore, clock: &dyn Clock) -> Result<SweepOutcome> {
        let mut outcome = SweepOutcome::default();
        let now = clock.now();
        let day = clock.weekday();
        let hour = clock.hour();

        for mut campaign in store.active_campaigns()? {
            if campaign.status == CampaignStatus::Completed {
                continue;
            }
            let schedules = store.schedules(campaign.id)?;
            if schedules.is_empty() {
                continue;
            }
            outcome.examined += 1;

            let paused_for_dayparting = campaign.status == CampaignStatus::Paused
                && campaign.pause_reason == Some(PauseReason::OutsideDaypartingHours);

            if !schedule::within_any_window(&schedules, day, hour) {
                if !paused_for_dayparting {
                    campaign.pause(PauseReason::OutsideDaypartingHours);
                    campaign.touch(now);
                    let campaign = store.save_campaign(&campaign)?;
                    outcome.paused += 1;
                    info!(campaign = %campaign.id, "paused campaign outside dayparting hours");
                }
            } else if paused_for_dayparting && campaign.can_resume() {
                campaign.resume();
                campaign.touch(now);
                let campaign = store.save_campaign(&campaign)?;
                outcome.resumed += 1;
                info!(campaign = %campaign.id, "resumed campaign inside dayparting hours");
            }
        }

        Ok(outcome)
    }

    /// Zeroes every daily accumulator. Statuses are left alone; the next
    /// budget or reactivation sweep re-evaluates them against the fresh
    /// accumulators.
    pub fn reset_daily(store: &dyn BudgetStore, clock: &dyn Clock) -> Result<ResetOutcome> {
        let mut outcome = ResetOutcome::default();
        let now = clock.now();

        for mut brand in store.brands()? {
            outcome.examined += 1;
            if brand.reset_daily_spend() {
                brand.touch(now);
                store.save_brand(&brand)?;
                outcome.reset += 1;
            }
        }
        for mut campaign in store.campaigns()? {
            outcome.examined += 1;
            if campaign.reset_daily_spend() {
                campaign.touch(now);
                store.save_campaign(&campaign)?;
                outcome.reset += 1;
            }
        }

        info!(reset = outcome.reset, "daily accumulators reset");
        Ok(outcome)
    }

    /// Zeroes every monthly accumulator. Independent of the daily reset.
    pub fn reset_monthly(store: &dyn BudgetStore, clock: &dyn Clock) -> Result<ResetOutcome> {
        let mut outcome = ResetOutcome::default();
        let now = clock.now();

        for mut brand in store.brands()? {
            outcome.examined += 1;
            if brand.reset_monthly_spend() {
                brand.touch(now);
                store.save_brand(&brand)?;
                outcome.reset += 1;
            }
        }
        for mut campaign in store.campaigns()? {
            outcome.examined += 1;
            if campaign.reset_monthly_spend() {
                campaign.touch(now);
                store.save_campaign(&campaign)?;
                outcome.reset += 1;
            }
        }

        info!(reset = outcome.reset, "monthly accumulators reset");
        Ok(outcome)
    }
}
