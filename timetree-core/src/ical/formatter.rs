//! TimeTree event -> VEVENT mapping.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, trace};

use super::record::{AlarmAction, EventTime, Geo, IcalAlarm, IcalEvent};
use super::recurrence::{Recurrence, parse_recurrences};
use crate::config::ExportConfig;
use crate::event::TimeTreeEvent;
use crate::time::{timestamp_to_datetime, timestamp_to_utc};
use crate::zone::{ZoneResolver, resolve_optional};

/// DESCRIPTION of every exported VALARM.
pub const ALARM_DESCRIPTION: &str = "Reminder";

/// Formats a single [`TimeTreeEvent`] as an iCalendar event.
///
/// Each accessor maps one VEVENT property and returns `None` when the source
/// data for it is missing or unusable. [`to_ical`](Self::to_ical) assembles
/// them, or skips the event entirely for birthdays and memos.
pub struct IcalEventFormatter<'a> {
    event: &'a TimeTreeEvent,
    zones: &'a dyn ZoneResolver,
    export_categories: bool,
}

impl<'a> IcalEventFormatter<'a> {
    pub fn new(event: &'a TimeTreeEvent, zones: &'a dyn ZoneResolver) -> Self {
        IcalEventFormatter {
            event,
            zones,
            export_categories: false,
        }
    }

    pub fn with_config(
        event: &'a TimeTreeEvent,
        zones: &'a dyn ZoneResolver,
        config: &ExportConfig,
    ) -> Self {
        IcalEventFormatter {
            event,
            zones,
            export_categories: config.export_categories,
        }
    }

    pub fn uid(&self) -> Option<&'a str> {
        self.event.uuid.as_deref()
    }

    pub fn summary(&self) -> Option<&'a str> {
        self.event.title.as_deref()
    }

    pub fn description(&self) -> Option<&'a str> {
        non_empty(&self.event.note)
    }

    pub fn location(&self) -> Option<&'a str> {
        non_empty(&self.event.location)
    }

    pub fn url(&self) -> Option<&'a str> {
        non_empty(&self.event.url)
    }

    pub fn related_to(&self) -> Option<&'a str> {
        non_empty(&self.event.parent_id)
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.event.created_at.and_then(timestamp_to_utc)
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.event.updated_at.and_then(timestamp_to_utc)
    }

    /// Both halves must be present and numeric.
    pub fn geo(&self) -> Option<Geo> {
        let latitude = parse_coordinate(self.event.location_lat.as_deref()?)?;
        let longitude = parse_coordinate(self.event.location_lon.as_deref()?)?;
        Some(Geo {
            latitude,
            longitude,
        })
    }

    pub fn dtstart(&self) -> Option<EventTime> {
        let start = self.instant(self.event.start_at, self.event.start_timezone.as_deref())?;

        if self.event.all_day {
            Some(EventTime::Date(start.date_naive()))
        } else {
            Some(EventTime::Zoned(start))
        }
    }

    /// For all-day events TimeTree's end is the last day of the event, while
    /// DTEND;VALUE=DATE is exclusive, so the date moves one day forward.
    pub fn dtend(&self) -> Option<EventTime> {
        let end = self.instant(self.event.end_at, self.event.end_timezone.as_deref())?;

        if self.event.all_day {
            end.date_naive().succ_opt().map(EventTime::Date)
        } else {
            Some(EventTime::Zoned(end))
        }
    }

    pub fn alarms(&self) -> Vec<IcalAlarm> {
        self.event
            .alerts
            .iter()
            .flatten()
            .map(|alert| IcalAlarm {
                action: AlarmAction::Display,
                description: ALARM_DESCRIPTION.to_string(),
                trigger: alert.offset(),
            })
            .collect()
    }

    pub fn recurrence(&self) -> Option<Recurrence> {
        parse_recurrences(self.event.recurrences.as_deref()?)
    }

    pub fn color(&self) -> Option<&'static str> {
        self.event.label_color()
    }

    /// Label name for CATEGORIES, only when enabled in [`ExportConfig`].
    pub fn categories(&self) -> Vec<String> {
        if !self.export_categories {
            return Vec::new();
        }
        self.event
            .ical_category()
            .map(|name| vec![name.to_string()])
            .unwrap_or_default()
    }

    /// Build the VEVENT, or `None` when the event is not exportable.
    pub fn to_ical(&self) -> Option<IcalEvent> {
        if !self.event.is_exportable() {
            debug!(
                uuid = self.uid().unwrap_or_default(),
                event_type = ?self.event.event_type,
                category = ?self.event.category,
                "skipping event that is not exported"
            );
            return None;
        }

        Some(IcalEvent {
            uid: self.uid().map(str::to_string),
            summary: self.summary().map(str::to_string),
            description: self.description().map(str::to_string),
            location: self.location().map(str::to_string),
            geo: self.geo(),
            url: self.url().map(str::to_string),
            related_to: self.related_to().map(str::to_string),
            created: self.created(),
            last_modified: self.last_modified(),
            dtstart: self.dtstart(),
            dtend: self.dtend(),
            recurrence: self.recurrence(),
            alarms: self.alarms(),
            color: self.color().map(str::to_string),
            categories: self.categories(),
        })
    }

    fn instant(&self, millis: Option<i64>, zone: Option<&str>) -> Option<DateTime<Tz>> {
        let millis = millis?;
        let Some(tz) = resolve_optional(self.zones, zone) else {
            debug!(
                uuid = self.uid().unwrap_or_default(),
                zone = zone.unwrap_or_default(),
                "no usable time zone, omitting time"
            );
            return None;
        };
        timestamp_to_datetime(millis, &tz)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    let parsed = raw.trim().parse::<f64>().ok().filter(|v| v.is_finite());
    if parsed.is_none() {
        trace!(raw, "unparseable coordinate");
    }
    parsed
}
