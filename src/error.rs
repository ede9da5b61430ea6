use thiserror::Error;

/// Errors raised while turning loosely-typed input into calendar values.
///
/// None of these escape the layout functions: per-record failures are logged
/// and the record is dropped from the view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("invalid scheduled date `{0}`")]
    InvalidDate(String),

    #[error("invalid time of day `{0}`, expected HH:MM")]
    InvalidTime(String),

    #[error("working hours start {start} is after end {end}")]
    InvalidWorkingHours { start: String, end: String },

    #[error("unknown timezone `{0}`")]
    UnknownTimezone(String),

    #[error("unknown calendar view `{0}`, expected day, week or month")]
    UnknownView(String),
}
