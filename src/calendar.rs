use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use crate::buckets::{appointments_in_bucket, hourly_buckets};
use crate::config::{CalendarConfig, WorkingHours};
use crate::filter::{appointments_between, on_date, validate_records};
use crate::models::{
    Appointment, AppointmentRecord, CalendarLayout, DayLayout, MonthCell, MonthLayout,
    SlotLayout, ViewType, WeekLayout,
};
use crate::month::same_time_slot_count;
use crate::overlap::group_overlaps;

const DAYS_PER_WEEK: i64 = 7;
const MONTH_GRID_CELLS: i64 = 42;

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// First cell of the six-week grid shown for `date`'s month.
pub fn month_grid_start(date: NaiveDate) -> NaiveDate {
    let first_of_month = date - Duration::days(date.day0() as i64);
    week_start(first_of_month)
}

/// Buckets and groups one day's appointments.
pub fn slot_layouts(day: &[Appointment], hours: &WorkingHours) -> Vec<SlotLayout> {
    hourly_buckets(hours.start, hours.end)
        .into_iter()
        .map(|bucket| {
            let members = appointments_in_bucket(day, bucket);
            SlotLayout {
                bucket,
                groups: group_overlaps(&members),
            }
        })
        .collect()
}

pub fn day_layout(
    appointments: &[Appointment],
    date: NaiveDate,
    hours: &WorkingHours,
) -> DayLayout {
    let day = on_date(appointments, date);
    let layout = DayLayout {
        date,
        slots: slot_layouts(&day, hours),
    };

    let outside = day.len() - layout.appointment_count();
    if outside > 0 {
        debug!(%date, outside, "appointments start outside working hours");
    }

    layout
}

pub fn week_layout(
    appointments: &[Appointment],
    date: NaiveDate,
    hours: &WorkingHours,
) -> WeekLayout {
    let start = week_start(date);
    let week = appointments_between(
        appointments,
        start,
        start + Duration::days(DAYS_PER_WEEK - 1),
    );

    WeekLayout {
        start,
        days: (0..DAYS_PER_WEEK)
            .map(|offset| day_layout(&week, start + Duration::days(offset), hours))
            .collect(),
    }
}

pub fn month_layout(appointments: &[Appointment], date: NaiveDate) -> MonthLayout {
    let start = month_grid_start(date);
    let visible = appointments_between(
        appointments,
        start,
        start + Duration::days(MONTH_GRID_CELLS - 1),
    );

    let cells = (0..MONTH_GRID_CELLS)
        .map(|offset| {
            let cell_date = start + Duration::days(offset);
            let day = on_date(&visible, cell_date);
            MonthCell {
                date: cell_date,
                in_month: cell_date.month() == date.month(),
                appointment_count: day.len(),
                same_time_slot_count: same_time_slot_count(&day),
            }
        })
        .collect();

    MonthLayout {
        year: date.year(),
        month: date.month(),
        cells,
    }
}

/// Validates `records` once and lays them out for the requested view.
pub fn layout_for_view(
    view: ViewType,
    records: &[AppointmentRecord],
    date: NaiveDate,
    config: &CalendarConfig,
) -> CalendarLayout {
    let appointments = validate_records(records, config.timezone);
    debug!(
        %view,
        %date,
        received = records.len(),
        valid = appointments.len(),
        "computing calendar layout"
    );

    match view {
        ViewType::Day => CalendarLayout::Day(day_layout(&appointments, date, &config.hours)),
        ViewType::Week => CalendarLayout::Week(week_layout(&appointments, date, &config.hours)),
        ViewType::Month => CalendarLayout::Month(month_layout(&appointments, date)),
    }
}
