//! Synthetic spend generation. A demo driver, not an enforcement rule: it
//! exercises the recording path for campaigns currently inside a dayparting
//! window.

use rand::RngCore;
use tracing::info;

use crate::{
    config::SimulationConfig,
    core::{clock::Clock, errors::Result},
    domain::{schedule, CampaignStatus},
    storage::BudgetStore,
};

use super::SpendService;

pub struct SimulationService;

impl SimulationService {
    /// Feeds one random spend through the recorder for every serving campaign
    /// that has a dayparting window open right now. Campaigns without
    /// schedules are not simulated. Returns how many spends were generated.
    pub fn simulate_spend(
        store: &dyn BudgetStore,
        clock: &dyn Clock,
        bounds: &SimulationConfig,
        rng: &mut dyn RngCore,
    ) -> Result<usize> {
        let day = clock.weekday();
        let hour = clock.hour();
        let mut generated = 0;

        for campaign in store.active_campaigns()? {
            if campaign.status != CampaignStatus::Active {
                continue;
            }
            let schedules = store.schedules(campaign.id)?;
            if schedules.is_empty() {
                continue;
            }
            if !schedule::within_any_window(&schedules, day, hour) {
                continue;
            }

            let amount = bounds.sample(rng);
            SpendService::record(store, clock, campaign.id, amount)?;
            generated += 1;
        }

        info!(generated, "simulated spend cycle complete");
        Ok(generated)
    }
}
