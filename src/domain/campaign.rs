//! Campaign entities: the state machine at the center of enforcement.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::errors::{PacingError, Result};
use crate::domain::common::{Identifiable, Versioned};

/// Campaign lifecycle state. `Completed` is terminal: no enforcement rule
/// moves a campaign into or out of it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Active,
    Paused,
    Completed,
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CampaignStatus::Active => "ACTIVE",
            CampaignStatus::Paused => "PAUSED",
            CampaignStatus::Completed => "COMPLETED",
        };
        f.write_str(label)
    }
}

/// Why a campaign is paused. Exactly one reason is set while paused; none
/// while active or completed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PauseReason {
    DailyBudgetExceeded,
    MonthlyBudgetExceeded,
    OutsideDaypartingHours,
}

impl PauseReason {
    /// Budget reasons deactivate the campaign; the dayparting reason does not.
    pub fn is_budget(self) -> bool {
        matches!(
            self,
            PauseReason::DailyBudgetExceeded | PauseReason::MonthlyBudgetExceeded
        )
    }
}

impl fmt::Display for PauseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PauseReason::DailyBudgetExceeded => "DAILY_BUDGET_EXCEEDED",
            PauseReason::MonthlyBudgetExceeded => "MONTHLY_BUDGET_EXCEEDED",
            PauseReason::OutsideDaypartingHours => "OUTSIDE_DAYPARTING_HOURS",
        };
        f.write_str(label)
    }
}

/// An ad campaign owned by a brand. Budgets and accumulators are tracked
/// independently of the owning brand's.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Campaign {
    pub id: Uuid,
    pub brand_id: Uuid,
    pub name: String,
    pub status: CampaignStatus,
    pub daily_budget: Decimal,
    pub monthly_budget: Decimal,
    pub daily_spend: Decimal,
    pub monthly_spend: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub pause_reason: Option<PauseReason>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    /// Creates an active campaign after validating budgets and the date range.
    pub fn new(
        brand_id: Uuid,
        name: impl Into<String>,
        daily_budget: Decimal,
        monthly_budget: Decimal,
        start_date: NaiveDate,
        end_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        if daily_budget <= Decimal::ZERO || monthly_budget <= Decimal::ZERO {
            return Err(PacingError::Validation(format!(
                "budgets must be positive, got daily {daily_budget} / monthly {monthly_budget}"
            )));
        }
        if end_date < start_date {
            return Err(PacingError::Validation(format!(
                "end_date {end_date} precedes start_date {start_date}"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            brand_id,
            name: name.into(),
            status: CampaignStatus::Active,
            daily_budget,
            monthly_budget,
            daily_spend: Decimal::ZERO,
            monthly_spend: Decimal::ZERO,
            start_date,
            end_date,
            is_active: true,
            pause_reason: None,
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Both accumulators strictly under their budgets.
    pub fn can_resume(&self) -> bool {
        self.daily_spend < self.daily_budget && self.monthly_spend < self.monthly_budget
    }

    /// Adds `amount` to both ledger accumulators. Not idempotent: every call
    /// represents a distinct spend event.
    pub fn apply_spend(&mut self, amount: Decimal) {
        self.daily_spend += amount;
        self.monthly_spend += amount;
    }

    /// Record-path check: pause only once spend strictly exceeds the budget.
    /// Daily takes priority; monthly is evaluated only if daily did not trip.
    pub fn record_breach(&self) -> Option<PauseReason> {
        if self.daily_spend > self.daily_budget {
            Some(PauseReason::DailyBudgetExceeded)
        } else if self.monthly_spend > self.monthly_budget {
            Some(PauseReason::MonthlyBudgetExceeded)
        } else {
            None
        }
    }

    /// Sweep-path check: trips once spend reaches the budget. A spend landing
    /// exactly on the boundary passes `record_breach` but not this.
    pub fn sweep_breach(&self) -> Option<PauseReason> {
        if self.daily_spend >= self.daily_budget {
            Some(PauseReason::DailyBudgetExceeded)
        } else if self.monthly_spend >= self.monthly_budget {
            Some(PauseReason::MonthlyBudgetExceeded)
        } else {
            None
        }
    }

    /// Pauses the campaign for `reason`. Budget pauses also deactivate; a
    /// dayparting pause keeps `is_active` set so the dayparting sweep still
    /// sees the campaign and can resume it.
    pub fn pause(&mut self, reason: PauseReason) {
        self.status = CampaignStatus::Paused;
        self.pause_reason = Some(reason);
        if reason.is_budget() {
            self.is_active = false;
        }
    }

    /// Returns the campaign to the serving state, clearing the pause reason.
    pub fn resume(&mut self) {
        self.status = CampaignStatus::Active;
        self.pause_reason = None;
        self.is_active = true;
    }

    /// Sweep rule: pause at the `>=` threshold, resume a budget-paused
    /// campaign once both accumulators are back under. Returns whether the
    /// campaign changed.
    pub fn check_budget_limits(&mut self) -> bool {
        if let Some(reason) = self.sweep_breach() {
            let already_applied = self.status == CampaignStatus::Paused
                && self.pause_reason == Some(reason)
                && !self.is_active;
            if already_applied {
                return false;
            }
            self.pause(reason);
            return true;
        }
        if self.status == CampaignStatus::Paused
            && self.pause_reason.map_or(false, PauseReason::is_budget)
            && self.can_resume()
        {
            self.resume();
            return true;
        }
        false
    }

    /// Zeroes the daily accumulator. Returns whether anything changed.
    pub fn reset_daily_spend(&mut self) -> bool {
        if self.daily_spend == Decimal::ZERO {
            return false;
        }
        self.daily_spend = Decimal::ZERO;
        true
    }

    /// Zeroes the monthly accumulator. Returns whether anything changed.
    pub fn reset_monthly_spend(&mut self) -> bool {
        if self.monthly_spend == Decimal::ZERO {
            return false;
        }
        self.monthly_spend = Decimal::ZERO;
        true
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

impl Identifiable for Campaign {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Versioned for Campaign {
    fn version(&self) -> u64 {
        self.version
    }

    fn bump_version(&mut self) {
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use super::*;

    fn campaign() -> Campaign {
        Campaign::new(
            Uuid::new_v4(),
            "Summer Sale",
            dec!(50.00),
            dec!(500.00),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_inverted_date_range() {
        let result = Campaign::new(
            Uuid::new_v4(),
            "Backwards",
            dec!(10),
            dec!(100),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            Utc::now(),
        );
        assert!(matches!(result, Err(PacingError::Validation(_))));
    }

    #[test]
    fn record_breach_is_strict() {
        let mut campaign = campaign();
        campaign.apply_spend(dec!(50.00));
        assert_eq!(campaign.record_breach(), None);
        assert_eq!(
            campaign.sweep_breach(),
            Some(PauseReason::DailyBudgetExceeded)
        );

        campaign.apply_spend(dec!(0.01));
        assert_eq!(
            campaign.record_breach(),
            Some(PauseReason::DailyBudgetExceeded)
        );
    }

    #[test]
    fn daily_takes_priority_over_monthly() {
        let mut campaign = campaign();
        campaign.daily_spend = dec!(60.00);
        campaign.monthly_spend = dec!(600.00);
        assert_eq!(
            campaign.record_breach(),
            Some(PauseReason::DailyBudgetExceeded)
        );
        assert_eq!(
            campaign.sweep_breach(),
            Some(PauseReason::DailyBudgetExceeded)
        );
    }

    #[test]
    fn monthly_breach_reported_when_daily_clear() {
        let mut campaign = campaign();
        campaign.monthly_spend = dec!(500.00);
        assert_eq!(campaign.record_breach(), None);
        assert_eq!(
            campaign.sweep_breach(),
            Some(PauseReason::MonthlyBudgetExceeded)
        );
    }

    #[test]
    fn budget_pause_deactivates_dayparting_pause_does_not() {
        let mut campaign = campaign();
        campaign.pause(PauseReason::OutsideDaypartingHours);
        assert_eq!(campaign.status, CampaignStatus::Paused);
        assert!(campaign.is_active);

        let mut other = self::campaign();
        other.pause(PauseReason::DailyBudgetExceeded);
        assert!(!other.is_active);
    }

    #[test]
    fn sweep_resumes_only_budget_pauses() {
        let mut campaign = campaign();
        campaign.pause(PauseReason::OutsideDaypartingHours);
        assert!(!campaign.check_budget_limits());
        assert_eq!(
            campaign.pause_reason,
            Some(PauseReason::OutsideDaypartingHours)
        );

        let mut other = self::campaign();
        other.daily_spend = dec!(75.00);
        assert!(other.check_budget_limits());
        assert!(!other.is_active);
        other.reset_daily_spend();
        assert!(other.check_budget_limits());
        assert_eq!(other.status, CampaignStatus::Active);
        assert_eq!(other.pause_reason, None);
        assert!(other.is_active);
    }

    #[test]
    fn check_budget_limits_is_idempotent_once_applied() {
        let mut campaign = campaign();
        campaign.daily_spend = dec!(50.00);
        assert!(campaign.check_budget_limits());
        assert!(!campaign.check_budget_limits());
    }

    #[test]
    fn can_resume_requires_both_accumulators_under() {
        let mut campaign = campaign();
        campaign.daily_spend = dec!(25.00);
        campaign.monthly_spend = dec!(600.00);
        assert!(!campaign.can_resume());
        campaign.reset_monthly_spend();
        assert!(campaign.can_resume());
    }

    #[test]
    fn pause_reasons_serialize_in_stored_form() {
        let reason = serde_json::to_string(&PauseReason::DailyBudgetExceeded).unwrap();
        assert_eq!(reason, "\"DAILY_BUDGET_EXCEEDED\"");
        let status = serde_json::to_string(&CampaignStatus::Paused).unwrap();
        assert_eq!(status, "\"PAUSED\"");
    }
}
