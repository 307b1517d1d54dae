//! Appointment to external event conversion.
//!
//! # Invariants
//! - Missing or blank time means 09:00.
//! - 12-hour text is detected case-insensitively; unparseable 12-hour text
//!   falls back to 09:00.
//! - Every event lasts exactly one hour from its local start.

use crate::model::appointment::Appointment;
use crate::model::non_blank;
use chrono::{Duration, NaiveDate, NaiveTime, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default start for appointments without a usable time.
pub const DEFAULT_START_HOUR: u32 = 9;
pub const EVENT_DURATION_HOURS: i64 = 1;

static TWELVE_HOUR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+):(\d+)\s*(AM|PM)").expect("valid 12-hour regex"));
static TWENTY_FOUR_HOUR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{1,2})(?::\d{1,2})?$").expect("valid 24-hour regex")
});

/// Start or end instant in the external wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    /// RFC 3339 timestamp with offset.
    pub date_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// External calendar event body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalEvent {
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: EventDateTime,
    pub end: EventDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventConversionError {
    InvalidDate(String),
    InvalidTime(String),
    /// Local wall-clock time skipped by a timezone transition.
    NonexistentLocalTime { date: String, time: String },
}

impl Display for EventConversionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => write!(f, "appointment date is not YYYY-MM-DD: `{value}`"),
            Self::InvalidTime(value) => write!(f, "appointment time cannot be parsed: `{value}`"),
            Self::NonexistentLocalTime { date, time } => {
                write!(f, "local time {date} {time} does not exist in this timezone")
            }
        }
    }
}

impl Error for EventConversionError {}

/// Parses `HH:MM` or `H:MM AM/PM` into a time of day.
pub fn parse_time_of_day(raw: Option<&str>) -> Result<NaiveTime, EventConversionError> {
    let default_start = || {
        NaiveTime::from_hms_opt(DEFAULT_START_HOUR, 0, 0)
            .ok_or_else(|| EventConversionError::InvalidTime(String::new()))
    };
    let Some(text) = non_blank(raw) else {
        return default_start();
    };
    let invalid = || EventConversionError::InvalidTime(text.to_string());

    let upper = text.to_ascii_uppercase();
    if upper.contains("AM") || upper.contains("PM") {
        let Some(caps) = TWELVE_HOUR_RE.captures(text) else {
            return default_start();
        };
        let mut hours: u32 = caps[1].parse().map_err(|_| invalid())?;
        let minutes: u32 = caps[2].parse().map_err(|_| invalid())?;
        let is_pm = caps[3].eq_ignore_ascii_case("PM");
        if is_pm && hours != 12 {
            hours = hours.checked_add(12).ok_or_else(invalid)?;
        }
        if !is_pm && hours == 12 {
            hours = 0;
        }
        return NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(invalid);
    }

    let caps = TWENTY_FOUR_HOUR_RE.captures(text).ok_or_else(invalid)?;
    let hours: u32 = caps[1].parse().map_err(|_| invalid())?;
    let minutes: u32 = caps[2].parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(invalid)
}

/// Converts one appointment into a one-hour event in `tz`.
///
/// `time_zone_name` is passed through as the IANA zone label, when known.
pub fn appointment_to_event<Tz: TimeZone>(
    appointment: &Appointment,
    tz: &Tz,
    time_zone_name: Option<&str>,
) -> Result<ExternalEvent, EventConversionError> {
    let raw_date = appointment.date.trim();
    let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
        .map_err(|_| EventConversionError::InvalidDate(raw_date.to_string()))?;
    let time = parse_time_of_day(appointment.time.as_deref())?;

    let start = tz
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .ok_or_else(|| EventConversionError::NonexistentLocalTime {
            date: raw_date.to_string(),
            time: time.format("%H:%M").to_string(),
        })?;
    let end = start.clone() + Duration::hours(EVENT_DURATION_HOURS);
    let time_zone = time_zone_name.map(str::to_string);

    Ok(ExternalEvent {
        summary: appointment.title.clone(),
        description: non_blank(appointment.notes.as_deref()).map(str::to_string),
        start: EventDateTime {
            date_time: start.fixed_offset().to_rfc3339(),
            time_zone: time_zone.clone(),
        },
        end: EventDateTime {
            date_time: end.fixed_offset().to_rfc3339(),
            time_zone,
        },
        location: non_blank(Some(appointment.location.as_str())).map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::{appointment_to_event, parse_time_of_day, EventConversionError};
    use crate::model::appointment::Appointment;
    use chrono::{FixedOffset, NaiveTime};

    fn hm(hours: u32, minutes: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hours, minutes, 0).unwrap()
    }

    #[test]
    fn parses_both_accepted_formats() {
        assert_eq!(parse_time_of_day(Some("15:30")).unwrap(), hm(15, 30));
        assert_eq!(parse_time_of_day(Some("3:30 PM")).unwrap(), hm(15, 30));
        assert_eq!(parse_time_of_day(Some("3:30 pm")).unwrap(), hm(15, 30));
        assert_eq!(parse_time_of_day(Some("12:05 AM")).unwrap(), hm(0, 5));
        assert_eq!(parse_time_of_day(Some("12:45 PM")).unwrap(), hm(12, 45));
    }

    #[test]
    fn oversized_twelve_hour_field_is_an_error() {
        assert!(matches!(
            parse_time_of_day(Some("4294967290:00 PM")),
            Err(EventConversionError::InvalidTime(_))
        ));
        assert!(matches!(
            parse_time_of_day(Some("13:00 PM")),
            Err(EventConversionError::InvalidTime(_))
        ));
    }

    #[test]
    fn missing_or_unparseable_twelve_hour_time_defaults_to_nine() {
        assert_eq!(parse_time_of_day(None).unwrap(), hm(9, 0));
        assert_eq!(parse_time_of_day(Some("  ")).unwrap(), hm(9, 0));
        assert_eq!(parse_time_of_day(Some("after lunch PM")).unwrap(), hm(9, 0));
    }

    #[test]
    fn malformed_twenty_four_hour_time_is_an_error() {
        assert!(matches!(
            parse_time_of_day(Some("noon")),
            Err(EventConversionError::InvalidTime(_))
        ));
        assert!(matches!(
            parse_time_of_day(Some("25:00")),
            Err(EventConversionError::InvalidTime(_))
        ));
    }

    #[test]
    fn event_is_one_hour_in_caller_timezone() {
        let mut appointment = Appointment::new("OT Session", "2025-03-15");
        appointment.time = Some("3:30 PM".to_string());
        appointment.location = "Clinic".to_string();
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();

        let event = appointment_to_event(&appointment, &tz, Some("America/New_York")).unwrap();
        assert_eq!(event.summary, "OT Session");
        assert_eq!(event.start.date_time, "2025-03-15T15:30:00-05:00");
        assert_eq!(event.end.date_time, "2025-03-15T16:30:00-05:00");
        assert_eq!(event.start.time_zone.as_deref(), Some("America/New_York"));
        assert_eq!(event.location.as_deref(), Some("Clinic"));
        assert_eq!(event.description, None);
    }

    #[test]
    fn invalid_date_is_rejected() {
        let appointment = Appointment::new("OT Session", "03/15/2025");
        let tz = FixedOffset::east_opt(0).unwrap();
        assert_eq!(
            appointment_to_event(&appointment, &tz, None).unwrap_err(),
            EventConversionError::InvalidDate("03/15/2025".to_string())
        );
    }

    #[test]
    fn wire_shape_uses_camel_case_times() {
        let appointment = Appointment::new("Speech", "2025-04-02");
        let tz = FixedOffset::east_opt(0).unwrap();
        let event = appointment_to_event(&appointment, &tz, None).unwrap();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["start"]["dateTime"], "2025-04-02T09:00:00+00:00");
        assert!(json["start"].get("timeZone").is_none());
        assert!(json.get("location").is_none());
    }
}
