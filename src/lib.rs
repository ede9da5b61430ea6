//! Calendar layout for pet-service appointments.
//!
//! Turns backend appointment records into day, week and month grids: hourly
//! buckets, side-by-side overlap groups, and month-cell double-booking counts.
//! Everything here is synchronous and pure; bad records are logged and left
//! out rather than reported as errors.

pub mod buckets;
pub mod calendar;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod month;
pub mod overlap;
pub mod report;
pub mod time;

pub use calendar::{day_layout, layout_for_view, month_layout, week_layout};
pub use config::{CalendarConfig, WorkingHours};
pub use error::LayoutError;
pub use models::{
    Appointment, AppointmentRecord, CalendarLayout, LayoutDescriptor, OverlapGroup, ViewType,
};
pub use overlap::{group_overlaps, intervals_overlap};
