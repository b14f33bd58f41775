//! Core types for exporting TimeTree events as iCalendar records.
//!
//! - `event` normalizes raw TimeTree JSON into [`TimeTreeEvent`]
//! - `ical` maps an event into an RFC 5545 VEVENT ([`IcalEventFormatter`])
//! - `zone` provides the time-zone lookup the formatter is given

pub mod config;
pub mod error;
pub mod event;
pub mod ical;
pub mod label;
pub mod time;
pub mod tracing;
pub mod zone;

pub use config::ExportConfig;
pub use error::{TimeTreeError, TimeTreeResult};
pub use event::{Alert, EventCategory, EventType, TimeTreeEvent};
pub use ical::{IcalEvent, IcalEventFormatter};
pub use label::Label;
pub use zone::{TzDatabase, WithFallback, ZoneResolver};
