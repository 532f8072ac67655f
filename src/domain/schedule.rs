//! Recurring time windows that restrict when a campaign may serve.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::errors::{PacingError, Result};
use crate::domain::common::Identifiable;

/// Returns whether `hour` falls inside the half-open window `[start, end)`.
///
/// Windows where `start >= end` wrap past midnight: 22–2 covers hours 22, 23,
/// 0 and 1, with the end hour itself excluded. A window whose start equals its
/// end takes the wraparound branch and matches every hour of the day.
pub fn is_hour_in_range(start: u8, end: u8, hour: u8) -> bool {
    if start < end {
        start <= hour && hour < end
    } else {
        hour >= start || hour < end
    }
}

/// One recurring weekly window during which the owning campaign may serve.
/// A campaign with no schedules is unrestricted in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DaypartingSchedule {
    pub id: Uuid,
    pub campaign_id: Uuid,
    /// 0 = Monday .. 6 = Sunday, matching `Weekday::num_days_from_monday`.
    pub day_of_week: u8,
    pub start_hour: u8,
    pub end_hour: u8,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DaypartingSchedule {
    /// Creates an active window after validating the day and hour bounds.
    pub fn new(
        campaign_id: Uuid,
        day_of_week: u8,
        start_hour: u8,
        end_hour: u8,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        if day_of_week > 6 {
            return Err(PacingError::Validation(format!(
                "day_of_week must be 0..=6 (Monday..Sunday), got {day_of_week}"
            )));
        }
        if start_hour > 23 || end_hour > 23 {
            return Err(PacingError::Validation(format!(
                "schedule hours must be 0..=23, got {start_hour}..{end_hour}"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            campaign_id,
            day_of_week,
            start_hour,
            end_hour,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Whether this window covers the given weekday and hour.
    pub fn matches(&self, day_of_week: u8, hour: u8) -> bool {
        self.is_active
            && self.day_of_week == day_of_week
            && is_hour_in_range(self.start_hour, self.end_hour, hour)
    }
}

impl Identifiable for DaypartingSchedule {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// True when any of the given windows covers the weekday/hour pair.
pub fn within_any_window(schedules: &[DaypartingSchedule], day_of_week: u8, hour: u8) -> bool {
    schedules
        .iter()
        .any(|schedule| schedule.matches(day_of_week, hour))
}
