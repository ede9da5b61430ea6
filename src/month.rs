use std::collections::HashMap;

use chrono::NaiveTime;

use crate::models::Appointment;

/// Number of appointments sharing their exact start time with at least one
/// other appointment of the same day.
///
/// Two double-booked slots of two appointments each count as 4, not 2.
pub fn same_time_slot_count(appointments: &[Appointment]) -> usize {
    let mut slots: HashMap<NaiveTime, usize> = HashMap::new();
    for appointment in appointments {
        *slots.entry(appointment.start).or_insert(0) += 1;
    }

    slots.values().filter(|count| **count >= 2).sum()
}
