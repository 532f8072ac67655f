mod common;

use common::{seed_brand, seed_campaign, seed_schedule, setup_store};
use pacing_core::{
    config::SimulationConfig,
    core::{clock::FixedClock, services::SimulationService},
    domain::PauseReason,
    storage::BudgetStore,
};
use rand::rngs::mock::StepRng;
use rust_decimal_macros::dec;

fn monday_at(hour: u32) -> FixedClock {
    // 2025-06-02 is a Monday.
    FixedClock::at(2025, 6, 2, hour)
}

fn bounds() -> SimulationConfig {
    SimulationConfig {
        min_amount: dec!(1.00),
        max_amount: dec!(5.00),
    }
}

#[test]
fn simulation_feeds_spend_to_in_window_campaigns_only() {
    let store = setup_store();
    let brand = seed_brand(&store, dec!(200.00), dec!(2000.00));
    let in_window = seed_campaign(&store, &brand, dec!(50.00), dec!(500.00));
    seed_schedule(&store, in_window.id, 0, 9, 17);
    let unscheduled = seed_campaign(&store, &brand, dec!(50.00), dec!(500.00));

    let mut rng = StepRng::new(0, 0x1111_1111_1111_1111);
    let generated =
        SimulationService::simulate_spend(&store, &monday_at(10), &bounds(), &mut rng)
            .expect("simulate");

    assert_eq!(generated, 1);
    let spends = store.spends(in_window.id).expect("history");
    assert_eq!(spends.len(), 1);
    assert!(spends[0].amount >= dec!(1.00) && spends[0].amount <= dec!(5.00));
    assert!(store.spends(unscheduled.id).expect("history").is_empty());
}

#[test]
fn simulation_skips_closed_windows() {
    let store = setup_store();
    let brand = seed_brand(&store, dec!(200.00), dec!(2000.00));
    let campaign = seed_campaign(&store, &brand, dec!(50.00), dec!(500.00));
    seed_schedule(&store, campaign.id, 0, 9, 17);

    let mut rng = StepRng::new(0, 0x1111_1111_1111_1111);
    let generated =
        SimulationService::simulate_spend(&store, &monday_at(20), &bounds(), &mut rng)
            .expect("simulate");

    assert_eq!(generated, 0);
    assert!(store.spends(campaign.id).expect("history").is_empty());
}

#[test]
fn simulation_skips_paused_campaigns() {
    let store = setup_store();
    let brand = seed_brand(&store, dec!(200.00), dec!(2000.00));
    let campaign = seed_campaign(&store, &brand, dec!(50.00), dec!(500.00));
    seed_schedule(&store, campaign.id, 0, 9, 17);

    let mut snapshot = store.campaign(campaign.id).expect("load");
    snapshot.pause(PauseReason::OutsideDaypartingHours);
    store.save_campaign(&snapshot).expect("save");

    let mut rng = StepRng::new(0, 0x1111_1111_1111_1111);
    let generated =
        SimulationService::simulate_spend(&store, &monday_at(10), &bounds(), &mut rng)
            .expect("simulate");

    assert_eq!(generated, 0);
}
