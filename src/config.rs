use chrono::NaiveTime;
use chrono_tz::Tz;

use crate::buckets::hourly_buckets;
use crate::error::LayoutError;
use crate::models::TimeBucket;
use crate::time::{parse_time_of_day, parse_timezone};

pub const DEFAULT_WORK_START: &str = "08:00";
pub const DEFAULT_WORK_END: &str = "18:00";
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Business hours shown on the day and week grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl WorkingHours {
    pub fn parse(start: &str, end: &str) -> Result<Self, LayoutError> {
        let hours = Self {
            start: parse_time_of_day(start)?,
            end: parse_time_of_day(end)?,
        };
        if hours.start > hours.end {
            return Err(LayoutError::InvalidWorkingHours {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(hours)
    }

    pub fn buckets(&self) -> Vec<TimeBucket> {
        hourly_buckets(self.start, self.end)
    }
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarConfig {
    pub hours: WorkingHours,
    /// Zone used to read timestamps as calendar days.
    pub timezone: Tz,
}

impl CalendarConfig {
    pub fn new(work_start: &str, work_end: &str, timezone: &str) -> Result<Self, LayoutError> {
        Ok(Self {
            hours: WorkingHours::parse(work_start, work_end)?,
            timezone: parse_timezone(timezone)?,
        })
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            hours: WorkingHours::default(),
            timezone: Tz::UTC,
        }
    }
}
