//! # mutual-engine
//!
//! Find the time windows in which a group of people are all free.
//!
//! Each person's busy blocks for a date are turned into free intervals bounded
//! by a configured working day, and the free sets are then intersected person
//! by person to get mutual availability.
//!
//! ## Modules
//!
//! - [`interval`] — interval value types, `HH:MM` <-> minutes conversion
//! - [`derive`] — busy blocks → free intervals within working hours
//! - [`merge`] — intersect free sets across people
//! - [`availability`] — lookup context and the per-date availability query
//! - [`records`] — raw user/event records and event parsing
//! - [`error`] — Error types

pub mod availability;
pub mod derive;
pub mod error;
pub mod interval;
pub mod merge;
pub mod records;

pub use availability::{AvailabilityContext, AvailabilityResult, ContextBuilder, DateAvailability, PersonId};
pub use derive::derive_free;
pub use error::MutualError;
pub use interval::{
    is_in_between, is_in_range, to_hhmm, to_minutes, BusyInterval, CalendarEvent, FreeInterval,
    WorkingHours,
};
pub use merge::{intersect, intersect_all};
pub use records::{events_from_json, parse_event, users_from_json, RawEvent, User};
