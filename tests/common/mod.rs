#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use pacing_core::{
    domain::{Brand, Campaign, DaypartingSchedule},
    storage::{BudgetStore, JsonStore},
};
use rust_decimal::Decimal;
use tempfile::TempDir;
use uuid::Uuid;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a file-backed store rooted in a unique directory for each test.
pub fn setup_store() -> JsonStore {
    setup_store_at().0
}

/// Like `setup_store`, but also exposes the document path for reopen tests.
pub fn setup_store_at() -> (JsonStore, PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("store.json");
    let store = JsonStore::open(&path).expect("open json store");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    (store, path)
}

pub fn seed_brand(store: &JsonStore, daily: Decimal, monthly: Decimal) -> Brand {
    let brand = Brand::new("Test Brand", daily, monthly, Utc::now()).expect("valid brand");
    store.insert_brand(brand).expect("insert brand")
}

pub fn seed_campaign(
    store: &JsonStore,
    brand: &Brand,
    daily: Decimal,
    monthly: Decimal,
) -> Campaign {
    let campaign = Campaign::new(
        brand.id,
        "Test Campaign",
        daily,
        monthly,
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        Utc::now(),
    )
    .expect("valid campaign");
    store.insert_campaign(campaign).expect("insert campaign")
}

pub fn seed_schedule(
    store: &JsonStore,
    campaign_id: Uuid,
    day_of_week: u8,
    start_hour: u8,
    end_hour: u8,
) -> DaypartingSchedule {
    let schedule = DaypartingSchedule::new(campaign_id, day_of_week, start_hour, end_hour, Utc::now())
        .expect("valid schedule");
    store.insert_schedule(schedule).expect("insert schedule")
}
