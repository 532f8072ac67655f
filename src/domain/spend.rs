//! Immutable spend events, the audit trail behind the ledger accumulators.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::errors::{PacingError, Result};
use crate::domain::common::Identifiable;

/// One recorded spend event against a campaign. Append-only: never mutated
/// or deleted once written. Summing a campaign's spends since the last reset
/// reproduces its ledger accumulators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Spend {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub amount: Decimal,
    pub date: NaiveDate,
    /// Hour of day in `0..=23`; absent for imports without hour resolution.
    pub hour: Option<u8>,
    pub created_at: DateTime<Utc>,
}

impl Spend {
    /// Creates a spend event after validating amount and hour bounds.
    /// Zero amounts are valid and still produce an audit row.
    pub fn new(
        campaign_id: Uuid,
        amount: Decimal,
        date: NaiveDate,
        hour: Option<u8>,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        if amount < Decimal::ZERO {
            return Err(PacingError::Validation(format!(
                "spend amount must be non-negative, got {amount}"
            )));
        }
        if let Some(hour) = hour {
            if hour > 23 {
                return Err(PacingError::Validation(format!(
                    "spend hour must be 0..=23, got {hour}"
                )));
            }
        }
        Ok(Self {
            id: Uuid::new_v4(),
            campaign_id,
            amount,
            date,
            hour,
            created_at,
        })
    }
}

impl Identifiable for Spend {
    fn id(&self) -> Uuid {
        self.id
    }
}
