//! Non-interactive entry points invoked by the scheduler or an operator.
//! One command per scheduled operation; no interactive shell.

use std::env;

use chrono::Duration;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::{
    config::PacingConfig,
    core::{
        clock::{Clock, SystemClock},
        errors::CliError,
        services::{EnforcementService, SimulationService, SpendService},
    },
    domain::{Brand, Campaign, DaypartingSchedule},
    storage::{BudgetStore, JsonStore},
};

/// Parses process arguments and dispatches to the matching command.
pub fn run_cli() -> Result<(), CliError> {
    let args: Vec<String> = env::args().skip(1).collect();
    run_command(&args)
}

fn run_command(args: &[String]) -> Result<(), CliError> {
    let config = PacingConfig::load()?;
    let store = JsonStore::open(config.store_path())?;
    let clock = SystemClock;

    match args.first().map(String::as_str) {
        None | Some("status") => status(&store),
        Some("record") => record(&store, &clock, args.get(1), args.get(2)),
        Some("sweep-budgets") => {
            let outcome = EnforcementService::sweep_budgets(&store, &clock)?;
            println!(
                "budget sweep: {} examined, {} paused, {} resumed",
                outcome.examined, outcome.paused, outcome.resumed
            );
            Ok(())
        }
        Some("sweep-dayparting") => {
            let outcome = EnforcementService::sweep_dayparting(&store, &clock)?;
            println!(
                "dayparting sweep: {} examined, {} paused, {} resumed",
                outcome.examined, outcome.paused, outcome.resumed
            );
            Ok(())
        }
        Some("sweep-reactivations") => {
            let outcome = EnforcementService::sweep_reactivations(&store, &clock)?;
            println!(
                "reactivation sweep: {} examined, {} resumed",
                outcome.examined, outcome.resumed
            );
            Ok(())
        }
        Some("reset-daily") => {
            let outcome = EnforcementService::reset_daily(&store, &clock)?;
            println!(
                "daily reset: {} examined, {} zeroed",
                outcome.examined, outcome.reset
            );
            Ok(())
        }
        Some("reset-monthly") => {
            let outcome = EnforcementService::reset_monthly(&store, &clock)?;
            println!(
                "monthly reset: {} examined, {} zeroed",
                outcome.examined, outcome.reset
            );
            Ok(())
        }
        Some("simulate") => {
            let generated = SimulationService::simulate_spend(
                &store,
                &clock,
                &config.simulation,
                &mut rand::thread_rng(),
            )?;
            println!("simulated {generated} spend event(s)");
            Ok(())
        }
        Some("seed-demo") => seed_demo(&store, &clock),
        Some("help" | "--help" | "-h") => {
            print_usage();
            Ok(())
        }
        Some(other) => Err(CliError::Input(format!(
            "unknown command `{other}` (try `help`)"
        ))),
    }
}

fn status(store: &dyn BudgetStore) -> Result<(), CliError> {
    let brands = store.brands().map_err(CliError::from)?;
    let campaigns = store.campaigns().map_err(CliError::from)?;
    println!("{} brand(s), {} campaign(s)", brands.len(), campaigns.len());

    for brand in &brands {
        println!(
            "brand {} `{}` {} daily {}/{} monthly {}/{}",
            brand.id,
            brand.name,
            if brand.is_active { "active" } else { "inactive" },
            brand.daily_spend,
            brand.daily_budget,
            brand.monthly_spend,
            brand.monthly_budget
        );
    }
    for campaign in &campaigns {
        let reason = campaign
            .pause_reason
            .map(|r| format!(" ({r})"))
            .unwrap_or_default();
        println!(
            "campaign {} `{}` {}{} daily {}/{} monthly {}/{}",
            campaign.id,
            campaign.name,
            campaign.status,
            reason,
            campaign.daily_spend,
            campaign.daily_budget,
            campaign.monthly_spend,
            campaign.monthly_budget
        );
    }
    Ok(())
}

fn record(
    store: &dyn BudgetStore,
    clock: &dyn Clock,
    campaign_id: Option<&String>,
    amount: Option<&String>,
) -> Result<(), CliError> {
    let campaign_id = parse_campaign_id(campaign_id)?;
    let amount = parse_amount(amount)?;

    let spend = SpendService::record(store, clock, campaign_id, amount)?;
    let campaign = store.campaign(campaign_id).map_err(CliError::from)?;
    println!(
        "recorded {} against campaign `{}`; status {}",
        spend.amount, campaign.name, campaign.status
    );
    Ok(())
}

/// Seeds one brand with a dayparted campaign so `simulate` has something to
/// drive on a fresh install.
fn seed_demo(store: &dyn BudgetStore, clock: &dyn Clock) -> Result<(), CliError> {
    let now = clock.now();
    let today = clock.today();

    let brand = Brand::new("Demo Brand", dec!(100.00), dec!(1000.00), now)
        .and_then(|brand| store.insert_brand(brand))?;
    let campaign = Campaign::new(
        brand.id,
        "Demo Campaign",
        dec!(50.00),
        dec!(500.00),
        today,
        today + Duration::days(30),
        now,
    )
    .and_then(|campaign| store.insert_campaign(campaign))?;
    for day_of_week in 0..7u8 {
        DaypartingSchedule::new(campaign.id, day_of_week, 8, 20, now)
            .and_then(|schedule| store.insert_schedule(schedule))?;
    }

    println!("seeded brand {} and campaign {}", brand.id, campaign.id);
    Ok(())
}

fn parse_campaign_id(raw: Option<&String>) -> Result<Uuid, CliError> {
    let raw = raw.ok_or_else(|| CliError::Input("usage: record <campaign-id> <amount>".into()))?;
    raw.parse()
        .map_err(|_| CliError::Input(format!("`{raw}` is not a valid campaign id")))
}

fn parse_amount(raw: Option<&String>) -> Result<Decimal, CliError> {
    let raw = raw.ok_or_else(|| CliError::Input("usage: record <campaign-id> <amount>".into()))?;
    raw.parse()
        .map_err(|_| CliError::Input(format!("`{raw}` is not a valid amount")))
}

fn print_usage() {
    println!("pacing_core_cli <command>");
    println!();
    println!("commands:");
    println!("  status                 list brands and campaigns (default)");
    println!("  record <id> <amount>   record a spend event against a campaign");
    println!("  sweep-budgets          pause/resume entities against budget thresholds");
    println!("  sweep-dayparting       enforce dayparting windows");
    println!("  sweep-reactivations    resume paused campaigns with budget room");
    println!("  reset-daily            zero all daily accumulators");
    println!("  reset-monthly          zero all monthly accumulators");
    println!("  simulate               generate synthetic spend for serving campaigns");
    println!("  seed-demo              create a demo brand, campaign, and schedules");
}
