//! Error types for mutual-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MutualError {
    #[error("Invalid time format: {0:?} (expected zero-padded HH:MM)")]
    InvalidTimeFormat(String),

    #[error("Invalid interval: {start}-{end} (start must be before end)")]
    InvalidInterval { start: String, end: String },

    #[error("Minutes out of range: {0} (a day spans 0..=1439)")]
    MinutesOutOfRange(u32),

    #[error("Invalid working hours: {start}-{end} (start must be before end)")]
    InvalidWorkingHours { start: String, end: String },

    #[error("Invalid event {id}: {reason}")]
    InvalidEvent { id: u64, reason: String },

    /// A requested name has no entry in the person map.
    #[error("No such person: {name}")]
    MissingPerson { name: String },

    /// A known person has no precomputed availability for the requested date.
    #[error("No availability data for {person} on {date}")]
    MissingDate { person: String, date: String },

    /// A users/events document was not valid JSON for the expected shape.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Availability query needs at least one person")]
    NoPeople,
}

pub type Result<T> = std::result::Result<T, MutualError>;
