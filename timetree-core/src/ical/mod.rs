//! iCalendar export.
//!
//! [`IcalEventFormatter`] maps a [`TimeTreeEvent`](crate::TimeTreeEvent) into
//! an [`IcalEvent`], a typed VEVENT record, which renders into an
//! `icalendar::Event` component.

mod formatter;
mod generate;
mod record;
mod recurrence;

pub use formatter::{ALARM_DESCRIPTION, IcalEventFormatter};
pub use record::{AlarmAction, EventTime, Geo, IcalAlarm, IcalEvent};
pub use recurrence::{Recurrence, RecurrenceProperty, parse_recurrences};
