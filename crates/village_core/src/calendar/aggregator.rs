//! Calendar event aggregation.
//!
//! One event per appointment, per dated document, per dated note and per
//! medication change record. Medications themselves produce no event.

use crate::model::item::HubItem;
use crate::store::domain_store::HubRepository;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Separator placed between non-empty details fields.
pub const DETAILS_SEPARATOR: &str = " • ";

/// Source entity kind of an aggregated event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    Appointment,
    Doc,
    Note,
    Medication,
}

impl EventSource {
    /// Fixed accent color per source kind.
    pub fn color(self) -> &'static str {
        match self {
            Self::Appointment => "#38bdf8",
            Self::Doc => "#a78bfa",
            Self::Note => "#fbbf24",
            Self::Medication => "#10b981",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Appointment => "Appointment",
            Self::Doc => "Document",
            Self::Note => "Note",
            Self::Medication => "Medication Change",
        }
    }
}

/// Render-ready projection of one entity onto a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Source entity id, or `<medication-id>-<change-id>` for changes.
    pub id: String,
    pub title: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(rename = "type")]
    pub source: EventSource,
    pub color: String,
    pub details: String,
}

/// Builds the composite global id used for medication change events.
pub fn medication_change_event_id(
    medication_id: impl std::fmt::Display,
    change_id: impl std::fmt::Display,
) -> String {
    format!("{medication_id}-{change_id}")
}

/// Projects one item onto the calendar.
///
/// Returns `None` for undated documents and notes and for medications.
pub fn to_calendar_event(item: HubItem<'_>) -> Option<CalendarEvent> {
    match item {
        HubItem::Appointment(appointment) => Some(CalendarEvent {
            id: appointment.id.to_string(),
            title: appointment.title.clone(),
            date: appointment.date.clone(),
            time: appointment.time.clone(),
            source: EventSource::Appointment,
            color: EventSource::Appointment.color().to_string(),
            details: join_details(&[
                Some(appointment.provider.as_str()),
                Some(appointment.location.as_str()),
            ]),
        }),
        HubItem::SchoolDoc(doc) => {
            let date = doc.date.as_ref()?;
            Some(CalendarEvent {
                id: doc.id.to_string(),
                title: doc.name.clone(),
                date: date.clone(),
                time: None,
                source: EventSource::Doc,
                color: EventSource::Doc.color().to_string(),
                details: join_details(&[Some(doc.doc_type.as_str()), doc.notes.as_deref()]),
            })
        }
        HubItem::Note(note) => {
            let date = note.date.as_ref()?;
            Some(CalendarEvent {
                id: note.id.to_string(),
                title: note.title.clone(),
                date: date.clone(),
                time: None,
                source: EventSource::Note,
                color: EventSource::Note.color().to_string(),
                details: join_details(&[
                    Some(note.category.as_str()),
                    Some(note.summary.as_str()),
                ]),
            })
        }
        HubItem::Medication(_) => None,
        HubItem::MedicationChange { medication, change } => {
            let dosage = change
                .dosage
                .as_deref()
                .filter(|dosage| !dosage.trim().is_empty())
                .map(|dosage| format!("Dosage: {dosage}"));
            Some(CalendarEvent {
                id: medication_change_event_id(medication.id, change.id),
                title: item.title(),
                date: change.date.clone(),
                time: None,
                source: EventSource::Medication,
                color: EventSource::Medication.color().to_string(),
                details: join_details(&[dosage.as_deref(), change.notes.as_deref()]),
            })
        }
    }
}

/// Aggregates every collection into one list sorted ascending by date.
///
/// The sort is stable, so events sharing a date keep aggregation order.
pub fn aggregate_events<R: HubRepository + ?Sized>(repo: &R) -> Vec<CalendarEvent> {
    let mut events: Vec<CalendarEvent> = repo
        .items()
        .into_iter()
        .filter_map(to_calendar_event)
        .collect();
    events.sort_by(|a, b| a.date.cmp(&b.date));
    events
}

/// Strips any time component, keeping the leading `YYYY-MM-DD` segment.
pub fn date_key(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.find(|c: char| c == 'T' || c == ' ') {
        Some(index) => &trimmed[..index],
        None => trimmed,
    }
}

/// Linear filter over `events` matching on the date portion only.
pub fn events_for_date<'a>(events: &'a [CalendarEvent], date: &str) -> Vec<&'a CalendarEvent> {
    let wanted = date_key(date);
    events
        .iter()
        .filter(|event| date_key(&event.date) == wanted)
        .collect()
}

/// Partitions events into date buckets keyed by `date_key`.
pub fn group_by_date(events: &[CalendarEvent]) -> BTreeMap<String, Vec<CalendarEvent>> {
    let mut buckets: BTreeMap<String, Vec<CalendarEvent>> = BTreeMap::new();
    for event in events {
        buckets
            .entry(date_key(&event.date).to_string())
            .or_default()
            .push(event.clone());
    }
    buckets
}

/// Distinct `Month YYYY` labels for months that hold at least one event.
///
/// Labels are in ascending calendar order whatever the order of `events`;
/// unparseable dates are skipped.
pub fn event_months(events: &[CalendarEvent]) -> Vec<String> {
    let months: BTreeSet<(i32, u32)> = events
        .iter()
        .filter_map(|event| NaiveDate::parse_from_str(date_key(&event.date), "%Y-%m-%d").ok())
        .map(|date| (date.year(), date.month()))
        .collect();
    months
        .into_iter()
        .filter_map(|(year, month)| NaiveDate::from_ymd_opt(year, month, 1))
        .map(|first| first.format("%B %Y").to_string())
        .collect()
}

fn join_details(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .filter_map(|part| part.map(str::trim).filter(|text| !text.is_empty()))
        .collect::<Vec<_>>()
        .join(DETAILS_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::{date_key, event_months, join_details, CalendarEvent, EventSource};

    fn event_on(date: &str) -> CalendarEvent {
        CalendarEvent {
            id: date.to_string(),
            title: "event".to_string(),
            date: date.to_string(),
            time: None,
            source: EventSource::Note,
            color: EventSource::Note.color().to_string(),
            details: String::new(),
        }
    }

    #[test]
    fn details_skip_separator_for_empty_fields() {
        assert_eq!(join_details(&[Some("Ms. Lopez"), Some("")]), "Ms. Lopez");
        assert_eq!(join_details(&[None, Some("Initial prescription")]), "Initial prescription");
        assert_eq!(join_details(&[Some("IEP"), Some("Goals")]), "IEP • Goals");
    }

    #[test]
    fn date_key_strips_time_component() {
        assert_eq!(date_key("2025-03-15T09:00:00"), "2025-03-15");
        assert_eq!(date_key("2025-03-15 09:00"), "2025-03-15");
        assert_eq!(date_key("2025-03-15"), "2025-03-15");
    }

    #[test]
    fn event_months_are_distinct_and_ordered() {
        let events = vec![
            event_on("2024-11-15"),
            event_on("2024-11-20"),
            event_on("not-a-date"),
            event_on("2025-03-15"),
        ];
        assert_eq!(event_months(&events), vec!["November 2024", "March 2025"]);
    }

    #[test]
    fn event_months_ascend_for_unsorted_input() {
        let events = vec![
            event_on("2025-03-15"),
            event_on("2024-11-15"),
            event_on("2025-01-10T08:00:00"),
            event_on("2024-11-02"),
        ];
        assert_eq!(
            event_months(&events),
            vec!["November 2024", "January 2025", "March 2025"]
        );
    }
}
