use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::LayoutError;
use crate::time::{parse_civil_date, parse_time_of_day};

/// Appointment as delivered by the booking backend, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "BackendAppointment")]
pub struct AppointmentRecord {
    pub id: String,
    pub scheduled_date: String,
    pub scheduled_time_slot: TimeSlotRecord,
    /// Title, customer, pet, status, staff and anything else the backend sends.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// Wire shape of a backend appointment. Documents may carry the stored `_id`,
/// the virtual `id`, both, or neither.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackendAppointment {
    #[serde(default, rename = "_id")]
    stored_id: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
    scheduled_date: String,
    scheduled_time_slot: TimeSlotRecord,
    #[serde(flatten)]
    payload: Map<String, Value>,
}

impl From<BackendAppointment> for AppointmentRecord {
    fn from(raw: BackendAppointment) -> Self {
        let id = raw
            .stored_id
            .and_then(id_text)
            .or_else(|| raw.id.and_then(id_text))
            .unwrap_or_else(|| generated_id("json"));

        Self {
            id,
            scheduled_date: raw.scheduled_date,
            scheduled_time_slot: raw.scheduled_time_slot,
            payload: raw.payload,
        }
    }
}

fn id_text(value: Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    (!text.trim().is_empty()).then_some(text)
}

/// Id for records exported without one, e.g. `csv-<uuid>`.
pub fn generated_id(source: &str) -> String {
    format!("{source}-{}", Uuid::new_v4())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlotRecord {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appointment {
    pub id: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub payload: Map<String, Value>,
}

impl Appointment {
    pub fn from_record(record: &AppointmentRecord, tz: Tz) -> Result<Self, LayoutError> {
        Ok(Self {
            id: record.id.clone(),
            date: parse_civil_date(&record.scheduled_date, tz)?,
            start: parse_time_of_day(&record.scheduled_time_slot.start)?,
            end: parse_time_of_day(&record.scheduled_time_slot.end)?,
            payload: record.payload.clone(),
        })
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start)
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.date.and_time(self.end)
    }

    /// True when the slot ends at or before it starts.
    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }

    pub fn start_hour(&self) -> u32 {
        self.start.hour()
    }

    pub fn title(&self) -> Option<&str> {
        self.payload.get("title").and_then(Value::as_str)
    }
}

/// One hourly row of the day and week grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeBucket {
    pub hour: u32,
}

impl TimeBucket {
    pub fn new(hour: u32) -> Self {
        Self { hour }
    }

    pub fn label(&self) -> String {
        format!("{:02}:00", self.hour)
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.hour)
    }
}

/// Position of an appointment inside its overlap group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutDescriptor {
    pub index: usize,
    pub total: usize,
}

impl LayoutDescriptor {
    pub fn width_fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            1.0 / self.total as f64
        }
    }

    pub fn offset_fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.index as f64 / self.total as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedAppointment {
    pub appointment: Appointment,
    pub layout: LayoutDescriptor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlapGroup {
    pub members: Vec<PlacedAppointment>,
}

impl OverlapGroup {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.members
            .iter()
            .map(|placed| placed.appointment.id.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotLayout {
    pub bucket: TimeBucket,
    pub groups: Vec<OverlapGroup>,
}

impl SlotLayout {
    pub fn appointment_count(&self) -> usize {
        self.groups.iter().map(OverlapGroup::len).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayLayout {
    pub date: NaiveDate,
    pub slots: Vec<SlotLayout>,
}

impl DayLayout {
    pub fn appointment_count(&self) -> usize {
        self.slots.iter().map(SlotLayout::appointment_count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekLayout {
    pub start: NaiveDate,
    pub days: Vec<DayLayout>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub appointment_count: usize,
    pub same_time_slot_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<MonthCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum CalendarLayout {
    Day(DayLayout),
    Week(WeekLayout),
    Month(MonthLayout),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    Day,
    Week,
    Month,
}

impl FromStr for ViewType {
    type Err = LayoutError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ViewType::Day),
            "week" => Ok(ViewType::Week),
            "month" => Ok(ViewType::Month),
            _ => Err(LayoutError::UnknownView(value.to_string())),
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ViewType::Day => "day",
            ViewType::Week => "week",
            ViewType::Month => "month",
        };
        f.write_str(label)
    }
}
