//! TimeTree event model.
//!
//! TimeTree's API returns loosely typed JSON: most keys may be missing or
//! `null`, and numbers sometimes arrive as strings. [`TimeTreeEvent`] reads
//! such a record permissively. A missing or unusable key becomes `None`; the
//! only hard failure is being handed something that is not a JSON object.

use std::fmt;

use chrono::Duration;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{TimeTreeError, TimeTreeResult};
use crate::label::Label;

/// TimeTree event type (`type` key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventType {
    Normal,
    Birthday,
}

impl EventType {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(EventType::Normal),
            1 => Some(EventType::Birthday),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            EventType::Normal => 0,
            EventType::Birthday => 1,
        }
    }
}

/// TimeTree event category (`category` key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventCategory {
    Normal,
    Memo,
}

impl EventCategory {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(EventCategory::Normal),
            2 => Some(EventCategory::Memo),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            EventCategory::Normal => 1,
            EventCategory::Memo => 2,
        }
    }
}

/// A reminder as TimeTree stores it: whole minutes before the event starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub minutes_before: i64,
}

impl Alert {
    pub fn new(minutes_before: i64) -> Self {
        Alert { minutes_before }
    }

    /// Signed offset relative to the start (negative means before).
    pub fn offset(&self) -> Duration {
        Duration::minutes(-self.minutes_before)
    }
}

/// A calendar event as received from TimeTree.
///
/// Timestamps are milliseconds since the Unix epoch (UTC). `start_timezone`
/// and `end_timezone` are IANA names and may differ from each other.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeTreeEvent {
    pub uuid: Option<String>,
    pub title: Option<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
    pub note: Option<String>,
    pub location: Option<String>,
    pub location_lat: Option<String>,
    pub location_lon: Option<String>,
    pub url: Option<String>,
    pub start_at: Option<i64>,
    pub start_timezone: Option<String>,
    pub end_at: Option<i64>,
    pub end_timezone: Option<String>,
    pub all_day: bool,
    pub alerts: Option<Vec<Alert>>,
    pub recurrences: Option<Vec<String>>,
    pub parent_id: Option<String>,
    pub event_type: Option<EventType>,
    pub category: Option<EventCategory>,
    pub label_id: Option<String>,
}

impl TimeTreeEvent {
    /// Build an event from a raw TimeTree record.
    pub fn from_value(value: &Value) -> TimeTreeResult<Self> {
        let obj = value.as_object().ok_or_else(|| {
            TimeTreeError::InvalidInput(format!(
                "expected a JSON object for an event, got {}",
                json_kind(value)
            ))
        })?;

        Ok(TimeTreeEvent {
            uuid: string_field(obj, "uuid"),
            title: string_field(obj, "title"),
            created_at: int_field(obj, "created_at"),
            updated_at: int_field(obj, "updated_at"),
            note: string_field(obj, "note"),
            location: string_field(obj, "location"),
            location_lat: string_field(obj, "location_lat"),
            location_lon: string_field(obj, "location_lon"),
            url: string_field(obj, "url"),
            start_at: int_field(obj, "start_at"),
            start_timezone: string_field(obj, "start_timezone"),
            end_at: int_field(obj, "end_at"),
            end_timezone: string_field(obj, "end_timezone"),
            all_day: bool_field(obj, "all_day").unwrap_or(false),
            alerts: alerts_field(obj),
            recurrences: recurrences_field(obj),
            parent_id: string_field(obj, "parent_id"),
            event_type: int_field(obj, "type").and_then(EventType::from_code),
            category: int_field(obj, "category").and_then(EventCategory::from_code),
            label_id: string_field(obj, "label_id"),
        })
    }

    /// Parse JSON text and build an event from it.
    pub fn from_json(json: &str) -> TimeTreeResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| TimeTreeError::InvalidInput(format!("malformed event JSON: {e}")))?;
        Self::from_value(&value)
    }

    pub fn is_birthday(&self) -> bool {
        match self.event_type {
            Some(EventType::Birthday) => true,
            Some(EventType::Normal) | None => false,
        }
    }

    pub fn is_memo(&self) -> bool {
        match self.category {
            Some(EventCategory::Memo) => true,
            Some(EventCategory::Normal) | None => false,
        }
    }

    /// Birthdays and memos are never exported to a calendar.
    pub fn is_exportable(&self) -> bool {
        !(self.is_birthday() || self.is_memo())
    }

    pub fn label(&self) -> Option<Label> {
        self.label_id.as_deref().and_then(Label::parse)
    }

    /// Hex color for the exported COLOR property.
    pub fn label_color(&self) -> Option<&'static str> {
        self.label().map(Label::export_color)
    }

    /// Hex color the TimeTree app shows for this event's label.
    pub fn ical_color(&self) -> Option<&'static str> {
        self.label().map(Label::app_color)
    }

    /// Category name for the CATEGORIES property.
    pub fn ical_category(&self) -> Option<&'static str> {
        self.label().map(Label::category_name)
    }
}

impl TryFrom<&Value> for TimeTreeEvent {
    type Error = TimeTreeError;

    fn try_from(value: &Value) -> TimeTreeResult<Self> {
        TimeTreeEvent::from_value(value)
    }
}

impl fmt::Display for TimeTreeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title.as_deref().unwrap_or(""))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn int_field(obj: &Map<String, Value>, key: &str) -> Option<i64> {
    obj.get(key).and_then(as_int)
}

fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn bool_field(obj: &Map<String, Value>, key: &str) -> Option<bool> {
    match obj.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        _ => None,
    }
}

fn alerts_field(obj: &Map<String, Value>) -> Option<Vec<Alert>> {
    let entries = obj.get("alerts")?.as_array()?;
    let alerts = entries
        .iter()
        .filter_map(|entry| {
            let alert = as_int(entry).map(Alert::new);
            if alert.is_none() {
                trace!(?entry, "dropping alert that is not a minute count");
            }
            alert
        })
        .collect();
    Some(alerts)
}

fn recurrences_field(obj: &Map<String, Value>) -> Option<Vec<String>> {
    let entries = obj.get("recurrences")?.as_array()?;
    Some(
        entries
            .iter()
            .filter_map(|entry| entry.as_str().map(str::to_string))
            .collect(),
    )
}
