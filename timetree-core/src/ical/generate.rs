//! Rendering an [`IcalEvent`] into an `icalendar` VEVENT component.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use icalendar::{Alarm, Component, EventLike, Property, Trigger, ValueType};

use super::record::{AlarmAction, EventTime, IcalAlarm, IcalEvent};
use super::recurrence::Recurrence;

const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const LOCAL_FORMAT: &str = "%Y%m%dT%H%M%S";

impl IcalEvent {
    /// Build the VEVENT component. Absent fields produce no property.
    pub fn to_component(&self) -> icalendar::Event {
        let mut ics_event = icalendar::Event::new();

        if let Some(ref uid) = self.uid {
            ics_event.uid(uid);
        }
        if let Some(ref summary) = self.summary {
            ics_event.summary(summary);
        }

        // DTSTAMP is required by RFC 5545; prefer the source's last change over "now"
        if let Some(updated) = self.last_modified {
            ics_event.add_property("DTSTAMP", format_utc(&updated));
            ics_event.add_property("LAST-MODIFIED", format_utc(&updated));
        }
        if let Some(created) = self.created {
            ics_event.add_property("CREATED", format_utc(&created));
        }

        if let Some(ref start) = self.dtstart {
            add_datetime_property(&mut ics_event, "DTSTART", start);
        }
        if let Some(ref end) = self.dtend {
            add_datetime_property(&mut ics_event, "DTEND", end);
        }

        if let Some(ref desc) = self.description {
            ics_event.description(desc);
        }
        if let Some(ref loc) = self.location {
            ics_event.location(loc);
        }
        if let Some(geo) = self.geo {
            ics_event.add_property("GEO", format!("{};{}", geo.latitude, geo.longitude));
        }
        if let Some(ref url) = self.url {
            ics_event.add_property("URL", url);
        }
        if let Some(ref parent) = self.related_to {
            ics_event.add_property("RELATED-TO", parent);
        }

        if let Some(ref recurrence) = self.recurrence {
            add_recurrence(&mut ics_event, recurrence);
        }

        for alarm in &self.alarms {
            ics_event.alarm(to_alarm(alarm));
        }

        if let Some(ref color) = self.color {
            ics_event.add_property("COLOR", color);
        }
        if !self.categories.is_empty() {
            ics_event.add_property("CATEGORIES", self.categories.join(","));
        }

        ics_event.done()
    }
}

fn format_utc(dt: &DateTime<Utc>) -> String {
    dt.format(UTC_FORMAT).to_string()
}

fn add_datetime_property(ics_event: &mut icalendar::Event, name: &str, time: &EventTime) {
    match time {
        EventTime::Date(d) => {
            let mut prop = Property::new(name, d.format("%Y%m%d").to_string());
            prop.append_parameter(ValueType::Date);
            ics_event.append_property(prop);
        }
        EventTime::Zoned(dt) if dt.timezone() == Tz::UTC => {
            ics_event.add_property(name, dt.format(UTC_FORMAT).to_string());
        }
        EventTime::Zoned(dt) => {
            let mut prop = Property::new(name, dt.format(LOCAL_FORMAT).to_string());
            prop.add_parameter("TZID", dt.timezone().name());
            ics_event.append_property(prop);
        }
    }
}

fn add_recurrence(ics_event: &mut icalendar::Event, recurrence: &Recurrence) {
    ics_event.add_property("RRULE", &recurrence.rrule);

    for line in &recurrence.extra {
        let mut prop = Property::new(&line.name, &line.value);
        for (key, value) in &line.params {
            prop.add_parameter(key, value);
        }
        ics_event.append_multi_property(prop);
    }
}

fn to_alarm(alarm: &IcalAlarm) -> Alarm {
    let trigger = if alarm.trigger <= chrono::Duration::zero() {
        Trigger::before_start(-alarm.trigger)
    } else {
        Trigger::after_start(alarm.trigger)
    };
    match alarm.action {
        AlarmAction::Display => Alarm::display(&alarm.description, trigger),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ical::{Geo, RecurrenceProperty};
    use chrono::{Duration, NaiveDate, TimeZone};
    use icalendar::Calendar;

    fn render(event: &IcalEvent) -> String {
        let mut cal = Calendar::new();
        cal.push(event.to_component());
        cal.done().to_string()
    }

    fn make_test_event() -> IcalEvent {
        IcalEvent {
            uid: Some("evt-1".to_string()),
            summary: Some("Dinner".to_string()),
            dtstart: Some(EventTime::Zoned(
                Tz::Asia__Tokyo.with_ymd_and_hms(2023, 6, 15, 18, 0, 0).unwrap(),
            )),
            dtend: Some(EventTime::Zoned(
                Tz::Asia__Tokyo.with_ymd_and_hms(2023, 6, 15, 19, 0, 0).unwrap(),
            )),
            ..Default::default()
        }
    }

    #[test]
    fn test_zoned_times_have_tzid() {
        let ics = render(&make_test_event());

        assert!(ics.contains("UID:evt-1"), "ICS:\n{}", ics);
        assert!(ics.contains("SUMMARY:Dinner"), "ICS:\n{}", ics);
        assert!(
            ics.contains("DTSTART;TZID=Asia/Tokyo:20230615T180000"),
            "DTSTART should carry TZID. ICS:\n{}",
            ics
        );
        assert!(
            ics.contains("DTEND;TZID=Asia/Tokyo:20230615T190000"),
            "DTEND should carry TZID. ICS:\n{}",
            ics
        );
    }

    #[test]
    fn test_utc_times_use_z_suffix() {
        let mut event = make_test_event();
        event.dtstart = Some(EventTime::Zoned(
            Tz::UTC.with_ymd_and_hms(2023, 6, 15, 9, 0, 0).unwrap(),
        ));
        let ics = render(&event);
        assert!(ics.contains("DTSTART:20230615T090000Z"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_all_day_has_value_date() {
        let mut event = make_test_event();
        event.dtstart = Some(EventTime::Date(NaiveDate::from_ymd_opt(2023, 6, 12).unwrap()));
        event.dtend = Some(EventTime::Date(NaiveDate::from_ymd_opt(2023, 6, 15).unwrap()));

        let ics = render(&event);
        assert!(ics.contains("DTSTART;VALUE=DATE:20230612"), "ICS:\n{}", ics);
        assert!(ics.contains("DTEND;VALUE=DATE:20230615"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_provenance_properties() {
        let mut event = make_test_event();
        event.created = Some(Utc.with_ymd_and_hms(2023, 6, 12, 0, 0, 0).unwrap());
        event.last_modified = Some(Utc.with_ymd_and_hms(2023, 6, 13, 8, 30, 0).unwrap());

        let ics = render(&event);
        assert!(ics.contains("CREATED:20230612T000000Z"), "ICS:\n{}", ics);
        assert!(ics.contains("LAST-MODIFIED:20230613T083000Z"), "ICS:\n{}", ics);
        assert!(ics.contains("DTSTAMP:20230613T083000Z"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_optional_properties_absent() {
        let ics = render(&make_test_event());

        for name in ["LOCATION", "GEO", "URL", "RELATED-TO", "RRULE", "COLOR", "CATEGORIES"] {
            assert!(
                !ics.lines().any(|l| l.starts_with(name)),
                "{} should be absent. ICS:\n{}",
                name,
                ics
            );
        }
        assert!(!ics.contains("BEGIN:VALARM"));
    }

    #[test]
    fn test_optional_properties_present() {
        let mut event = make_test_event();
        event.location = Some("Shibuya".to_string());
        event.geo = Some(Geo {
            latitude: 35.5,
            longitude: 139.25,
        });
        event.url = Some("https://example.com/e".to_string());
        event.related_to = Some("parent-1".to_string());
        event.color = Some("#45B7D1".to_string());
        event.categories = vec!["Blue".to_string()];

        let ics = render(&event);
        assert!(ics.contains("LOCATION:Shibuya"), "ICS:\n{}", ics);
        assert!(ics.lines().any(|l| l.starts_with("GEO:35.5")), "ICS:\n{}", ics);
        assert!(ics.contains("URL:https://example.com/e"), "ICS:\n{}", ics);
        assert!(ics.contains("RELATED-TO:parent-1"), "ICS:\n{}", ics);
        assert!(ics.contains("COLOR:#45B7D1"), "ICS:\n{}", ics);
        assert!(ics.contains("CATEGORIES:Blue"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_recurrence_lines() {
        let mut event = make_test_event();
        event.recurrence = Some(Recurrence {
            rrule: "FREQ=WEEKLY;COUNT=5".to_string(),
            extra: vec![RecurrenceProperty {
                name: "EXDATE".to_string(),
                params: vec![("TZID".to_string(), "Asia/Tokyo".to_string())],
                value: "20230622T180000".to_string(),
            }],
        });

        let ics = render(&event);
        assert!(ics.contains("RRULE:FREQ=WEEKLY;COUNT=5"), "ICS:\n{}", ics);
        assert!(
            ics.contains("EXDATE;TZID=Asia/Tokyo:20230622T180000"),
            "ICS:\n{}",
            ics
        );
    }

    #[test]
    fn test_one_valarm_per_alarm() {
        let mut event = make_test_event();
        event.alarms = vec![
            IcalAlarm {
                action: AlarmAction::Display,
                description: "Reminder".to_string(),
                trigger: Duration::minutes(-15),
            },
            IcalAlarm {
                action: AlarmAction::Display,
                description: "Reminder".to_string(),
                trigger: Duration::minutes(-60),
            },
        ];

        let ics = render(&event);
        assert_eq!(ics.matches("BEGIN:VALARM").count(), 2, "ICS:\n{}", ics);
        assert_eq!(ics.matches("ACTION:DISPLAY").count(), 2, "ICS:\n{}", ics);
        assert_eq!(ics.matches("DESCRIPTION:Reminder").count(), 2, "ICS:\n{}", ics);
        assert!(ics.contains("TRIGGER"), "ICS:\n{}", ics);
    }
}
