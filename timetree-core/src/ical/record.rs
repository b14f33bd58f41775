//! The VEVENT record produced by the formatter.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use super::recurrence::Recurrence;

/// Start or end of an exported event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventTime {
    /// All-day value (`VALUE=DATE`).
    Date(NaiveDate),
    /// Instant rendered in its own zone (`TZID=...`).
    Zoned(DateTime<Tz>),
}

impl EventTime {
    pub fn is_all_day(&self) -> bool {
        matches!(self, EventTime::Date(_))
    }

    /// Calendar date in the value's own zone.
    pub fn date(&self) -> NaiveDate {
        match self {
            EventTime::Date(d) => *d,
            EventTime::Zoned(dt) => dt.date_naive(),
        }
    }

    /// IANA name of the zone, `None` for all-day values.
    pub fn tz_name(&self) -> Option<&'static str> {
        match self {
            EventTime::Date(_) => None,
            EventTime::Zoned(dt) => Some(dt.timezone().name()),
        }
    }

    pub fn as_datetime(&self) -> Option<&DateTime<Tz>> {
        match self {
            EventTime::Zoned(dt) => Some(dt),
            EventTime::Date(_) => None,
        }
    }
}

/// GEO property value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geo {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmAction {
    Display,
}

impl AlarmAction {
    pub fn as_ics_str(&self) -> &'static str {
        match self {
            AlarmAction::Display => "DISPLAY",
        }
    }
}

/// A VALARM triggered relative to the event start.
#[derive(Debug, Clone, PartialEq)]
pub struct IcalAlarm {
    pub action: AlarmAction,
    pub description: String,
    /// Signed offset from DTSTART; negative fires before the start.
    pub trigger: Duration,
}

/// An exported VEVENT.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IcalEvent {
    pub uid: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub geo: Option<Geo>,
    pub url: Option<String>,
    pub related_to: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    pub dtstart: Option<EventTime>,
    pub dtend: Option<EventTime>,
    pub recurrence: Option<Recurrence>,
    pub alarms: Vec<IcalAlarm>,
    pub color: Option<String>,
    pub categories: Vec<String>,
}
