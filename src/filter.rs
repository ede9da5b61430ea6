use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::warn;

use crate::models::{Appointment, AppointmentRecord};

/// Validates backend records, dropping the ones that cannot be placed.
///
/// Every rejected record is logged; callers only ever see the survivors.
pub fn validate_records(records: &[AppointmentRecord], tz: Tz) -> Vec<Appointment> {
    records
        .iter()
        .filter_map(|record| match Appointment::from_record(record, tz) {
            Ok(appointment) => {
                if appointment.is_degenerate() {
                    warn!(
                        appointment_id = %appointment.id,
                        start = %appointment.start,
                        end = %appointment.end,
                        "appointment slot does not end after it starts"
                    );
                }
                Some(appointment)
            }
            Err(err) => {
                warn!(
                    appointment_id = %record.id,
                    error = %err,
                    "excluding appointment from calendar"
                );
                None
            }
        })
        .collect()
}

/// Records scheduled on `target`, compared as calendar days in `tz`.
pub fn appointments_on(
    records: &[AppointmentRecord],
    target: NaiveDate,
    tz: Tz,
) -> Vec<Appointment> {
    validate_records(records, tz)
        .into_iter()
        .filter(|appointment| appointment.date == target)
        .collect()
}

pub fn on_date(appointments: &[Appointment], target: NaiveDate) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|appointment| appointment.date == target)
        .cloned()
        .collect()
}

/// Appointments dated within `first..=last`.
pub fn appointments_between(
    appointments: &[Appointment],
    first: NaiveDate,
    last: NaiveDate,
) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|appointment| appointment.date >= first && appointment.date <= last)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeSlotRecord;
    use serde_json::Map;

    fn record(id: &str, date: &str) -> AppointmentRecord {
        AppointmentRecord {
            id: id.to_string(),
            scheduled_date: date.to_string(),
            scheduled_time_slot: TimeSlotRecord {
                start: "09:00".to_string(),
                end: "10:00".to_string(),
            },
            payload: Map::new(),
        }
    }

    fn ids(appointments: &[Appointment]) -> Vec<&str> {
        appointments.iter().map(|a| a.id.as_str()).collect()
    }

    fn may(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn keeps_only_target_day() {
        let records = vec![
            record("a", "2024-05-01"),
            record("b", "2024-05-02"),
            record("c", "2024-05-01T15:00:00Z"),
        ];
        assert_eq!(ids(&appointments_on(&records, may(1), Tz::UTC)), vec!["a", "c"]);
    }

    #[test]
    fn unparseable_dates_are_skipped_without_failing() {
        let records = vec![
            record("broken", "31/31/2024"),
            record("ok", "2024-05-01"),
            record("empty", ""),
        ];
        assert_eq!(ids(&appointments_on(&records, may(1), Tz::UTC)), vec!["ok"]);
    }

    #[test]
    fn timezone_decides_the_calendar_day() {
        let records = vec![record("late", "2024-05-02T03:30:00Z")];
        assert!(appointments_on(&records, may(1), Tz::UTC).is_empty());
        assert_eq!(
            ids(&appointments_on(&records, may(1), chrono_tz::America::New_York)),
            vec!["late"]
        );
    }

    #[test]
    fn date_only_backend_values_stay_on_their_day_west_of_utc() {
        let records = vec![record("midnight", "2024-05-01T00:00:00.000Z")];
        let chicago = chrono_tz::America::Chicago;
        assert_eq!(ids(&appointments_on(&records, may(1), chicago)), vec!["midnight"]);
        let april_30 = NaiveDate::from_ymd_opt(2024, 4, 30).unwrap();
        assert!(appointments_on(&records, april_30, chicago).is_empty());
    }

    #[test]
    fn bad_time_slots_are_excluded() {
        let mut bad = record("bad-slot", "2024-05-01");
        bad.scheduled_time_slot.end = "later".to_string();
        assert!(validate_records(&[bad], Tz::UTC).is_empty());
    }

    #[test]
    fn reversed_slots_survive_validation() {
        let mut reversed = record("reversed", "2024-05-01");
        reversed.scheduled_time_slot.start = "11:00".to_string();
        let kept = validate_records(&[reversed], Tz::UTC);
        assert_eq!(ids(&kept), vec!["reversed"]);
        assert!(kept[0].is_degenerate());
    }

    #[test]
    fn range_is_inclusive() {
        let appointments = validate_records(
            &[
                record("before", "2024-04-30"),
                record("first", "2024-05-01"),
                record("last", "2024-05-07"),
                record("after", "2024-05-08"),
            ],
            Tz::UTC,
        );
        assert_eq!(
            ids(&appointments_between(&appointments, may(1), may(7))),
            vec!["first", "last"]
        );
        assert_eq!(ids(&on_date(&appointments, may(7))), vec!["last"]);
    }
}
