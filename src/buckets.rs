use chrono::{NaiveTime, Timelike};
use tracing::warn;

use crate::models::{Appointment, TimeBucket};

/// Hourly rows from the start hour through the end hour, both included.
///
/// `08:00..18:00` yields eleven rows; the closing hour gets a row of its own.
pub fn hourly_buckets(work_start: NaiveTime, work_end: NaiveTime) -> Vec<TimeBucket> {
    if work_start > work_end {
        warn!(%work_start, %work_end, "working hours start after they end; no time buckets");
        return Vec::new();
    }

    (work_start.hour()..=work_end.hour())
        .map(TimeBucket::new)
        .collect()
}

/// Appointments whose start time falls within the bucket's hour.
///
/// A booking that runs past the hour stays in its start row only.
pub fn appointments_in_bucket(
    appointments: &[Appointment],
    bucket: TimeBucket,
) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|appointment| appointment.start_hour() == bucket.hour)
        .cloned()
        .collect()
}
