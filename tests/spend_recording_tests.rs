mod common;

use common::{seed_brand, seed_campaign, setup_store, setup_store_at};
use pacing_core::{
    core::{
        clock::FixedClock,
        errors::PacingError,
        services::{EnforcementService, SpendService},
    },
    domain::{CampaignStatus, PauseReason},
    storage::{BudgetStore, JsonStore},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn clock() -> FixedClock {
    // 2025-06-02 is a Monday.
    FixedClock::at(2025, 6, 2, 14)
}

#[test]
fn spend_exceeding_daily_budget_pauses_inline() {
    let store = setup_store();
    let brand = seed_brand(&store, dec!(200.00), dec!(2000.00));
    let campaign = seed_campaign(&store, &brand, dec!(50.00), dec!(500.00));

    SpendService::record(&store, &clock(), campaign.id, dec!(45.00)).expect("first spend");
    SpendService::record(&store, &clock(), campaign.id, dec!(10.00)).expect("second spend");

    let stored = store.campaign(campaign.id).expect("reload campaign");
    assert_eq!(stored.daily_spend, dec!(55.00));
    assert_eq!(stored.status, CampaignStatus::Paused);
    assert_eq!(stored.pause_reason, Some(PauseReason::DailyBudgetExceeded));
    assert!(!stored.is_active);
}

#[test]
fn boundary_spend_passes_recording_but_not_the_sweep() {
    let store = setup_store();
    let brand = seed_brand(&store, dec!(200.00), dec!(2000.00));
    let campaign = seed_campaign(&store, &brand, dec!(50.00), dec!(500.00));

    SpendService::record(&store, &clock(), campaign.id, dec!(45.00)).expect("spend");
    SpendService::record(&store, &clock(), campaign.id, dec!(5.00)).expect("boundary spend");

    let after_record = store.campaign(campaign.id).expect("reload");
    assert_eq!(after_record.daily_spend, dec!(50.00));
    assert_eq!(after_record.status, CampaignStatus::Active);

    EnforcementService::sweep_budgets(&store, &clock()).expect("sweep");
    let after_sweep = store.campaign(campaign.id).expect("reload");
    assert_eq!(after_sweep.status, CampaignStatus::Paused);
    assert_eq!(
        after_sweep.pause_reason,
        Some(PauseReason::DailyBudgetExceeded)
    );
}

#[test]
fn every_record_call_appends_exactly_one_event() {
    let store = setup_store();
    let brand = seed_brand(&store, dec!(200.00), dec!(2000.00));
    let campaign = seed_campaign(&store, &brand, dec!(50.00), dec!(500.00));

    for amount in [dec!(1.25), dec!(0.00), dec!(4.75)] {
        SpendService::record(&store, &clock(), campaign.id, amount).expect("record spend");
    }

    let spends = store.spends(campaign.id).expect("spend history");
    assert_eq!(spends.len(), 3);

    let total: Decimal = spends.iter().map(|s| s.amount).sum();
    let stored = store.campaign(campaign.id).expect("reload");
    assert_eq!(total, dec!(6.00));
    assert_eq!(stored.daily_spend, total);
    assert_eq!(stored.monthly_spend, total);
}

#[test]
fn recorded_state_survives_a_store_reopen() {
    let (store, path) = setup_store_at();
    let brand = seed_brand(&store, dec!(200.00), dec!(2000.00));
    let campaign = seed_campaign(&store, &brand, dec!(50.00), dec!(500.00));

    SpendService::record(&store, &clock(), campaign.id, dec!(12.50)).expect("record spend");
    drop(store);

    let reopened = JsonStore::open(&path).expect("reopen store");
    assert_eq!(reopened.spends(campaign.id).expect("history").len(), 1);
    assert_eq!(
        reopened.campaign(campaign.id).expect("reload").daily_spend,
        dec!(12.50)
    );
}

#[test]
fn negative_amount_leaves_no_partial_state() {
    let store = setup_store();
    let brand = seed_brand(&store, dec!(200.00), dec!(2000.00));
    let campaign = seed_campaign(&store, &brand, dec!(50.00), dec!(500.00));

    let result = SpendService::record(&store, &clock(), campaign.id, dec!(-3.00));
    assert!(matches!(result, Err(PacingError::Validation(_))));

    assert!(store.spends(campaign.id).expect("history").is_empty());
    let stored = store.campaign(campaign.id).expect("reload");
    assert_eq!(stored.daily_spend, Decimal::ZERO);
    assert_eq!(stored.status, CampaignStatus::Active);
}

#[test]
fn recording_against_unknown_campaign_fails() {
    let store = setup_store();
    let result = SpendService::record(&store, &clock(), Uuid::new_v4(), dec!(1.00));
    assert!(matches!(result, Err(PacingError::CampaignNotFound(_))));
}
