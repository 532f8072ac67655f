//! Brand entities and their budget-limit rules.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::errors::{PacingError, Result};
use crate::domain::common::{Identifiable, Versioned};

/// An advertiser owning one or more campaigns. Brands track their own daily
/// and monthly spend independently of their campaigns; the `is_active` flag
/// is derived from the budget state by the periodic sweep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Brand {
    pub id: Uuid,
    pub name: String,
    pub daily_budget: Decimal,
    pub monthly_budget: Decimal,
    pub daily_spend: Decimal,
    pub monthly_spend: Decimal,
    pub is_active: bool,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Brand {
    /// Creates an active brand after validating that both budgets are positive.
    pub fn new(
        name: impl Into<String>,
        daily_budget: Decimal,
        monthly_budget: Decimal,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        if daily_budget <= Decimal::ZERO || monthly_budget <= Decimal::ZERO {
            return Err(PacingError::Validation(format!(
                "budgets must be positive, got daily {daily_budget} / monthly {monthly_budget}"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            daily_budget,
            monthly_budget,
            daily_spend: Decimal::ZERO,
            monthly_spend: Decimal::ZERO,
            is_active: true,
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Both accumulators strictly under their budgets.
    pub fn is_within_budget(&self) -> bool {
        self.daily_spend < self.daily_budget && self.monthly_spend < self.monthly_budget
    }

    /// Sweep rule: deactivate once either accumulator reaches its budget,
    /// reactivate once both are back under. Returns whether the flag changed.
    pub fn check_budget_limits(&mut self) -> bool {
        if self.daily_spend >= self.daily_budget || self.monthly_spend >= self.monthly_budget {
            if self.is_active {
                self.is_active = false;
                return true;
            }
            false
        } else if !self.is_active {
            self.is_active = true;
            true
        } else {
            false
        }
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

impl Identifiable for Brand {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Versioned for Brand {
    fn version(&self) -> u64 {
        self.version
    }

    fn bump_version(&mut self) {
        self.version += 1;
    }
}
