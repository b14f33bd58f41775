//! Recurrence lines as TimeTree sends them.
//!
//! TimeTree passes recurrence as a list of iCalendar content lines:
//! - `"RRULE:FREQ=WEEKLY;COUNT=5"`
//! - `"EXDATE;TZID=Asia/Tokyo:20240108T100000"`
//! - `"EXDATE;VALUE=DATE:20240108"`
//!
//! Older payloads sometimes carry a bare rule (`"FREQ=DAILY"`).

use tracing::trace;

/// RRULE plus the exception and extra-date lines that travel with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recurrence {
    /// RRULE value without the `RRULE:` prefix.
    pub rrule: String,
    /// EXDATE and RDATE lines, in source order.
    pub extra: Vec<RecurrenceProperty>,
}

/// A non-RRULE recurrence line, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceProperty {
    pub name: String,
    pub params: Vec<(String, String)>,
    pub value: String,
}

const EXTRA_PROPERTIES: [&str; 2] = ["EXDATE", "RDATE"];

/// Build a [`Recurrence`] from TimeTree's recurrence list.
///
/// Returns `None` when the list holds no rule. Only the first RRULE is used.
pub fn parse_recurrences(entries: &[String]) -> Option<Recurrence> {
    let mut rrule = None;
    let mut extra = Vec::new();

    for entry in entries.iter().map(|e| e.trim()).filter(|e| !e.is_empty()) {
        match split_line(entry) {
            Some((name, _, value)) if name == "RRULE" => {
                if rrule.is_none() {
                    rrule = Some(value.to_string());
                } else {
                    trace!(entry, "ignoring additional RRULE");
                }
            }
            Some((name, params, value)) if EXTRA_PROPERTIES.contains(&name.as_str()) => {
                extra.push(RecurrenceProperty {
                    name,
                    params,
                    value: value.to_string(),
                });
            }
            Some((name, ..)) => {
                trace!(entry, %name, "ignoring unsupported recurrence property");
            }
            None => {
                if rrule.is_none() {
                    rrule = Some(entry.to_string());
                }
            }
        }
    }

    rrule.map(|rrule| Recurrence { rrule, extra })
}

/// Split `NAME;K=V;K=V:VALUE`. `None` means the line carries no property name.
fn split_line(line: &str) -> Option<(String, Vec<(String, String)>, &str)> {
    let (head, value) = line.split_once(':')?;
    let mut parts = head.split(';');
    let name = parts.next()?.trim().to_ascii_uppercase();

    // A bare rule such as `FREQ=DAILY;UNTIL=...` has `=` in its first segment.
    if name.is_empty() || name.contains('=') {
        return None;
    }

    let params = parts
        .filter_map(|p| {
            let (k, v) = p.split_once('=')?;
            Some((k.trim().to_ascii_uppercase(), v.trim().to_string()))
        })
        .collect();

    Some((name, params, value.trim()))
}
