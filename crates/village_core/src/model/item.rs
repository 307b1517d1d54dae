//! Heterogeneous view over every entity kind.
//!
//! Rendering code matches on `HubItem` instead of probing entity shapes at
//! runtime. Each rendering concern is one exhaustive `match`.

use crate::model::appointment::Appointment;
use crate::model::medication::{Medication, MedicationChange};
use crate::model::note::Note;
use crate::model::school_doc::SchoolDoc;
use crate::model::EntityId;

/// Borrowed reference to one entity held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubItem<'a> {
    Appointment(&'a Appointment),
    SchoolDoc(&'a SchoolDoc),
    Note(&'a Note),
    Medication(&'a Medication),
    /// A change record together with the medication that owns it.
    MedicationChange {
        medication: &'a Medication,
        change: &'a MedicationChange,
    },
}

impl<'a> HubItem<'a> {
    /// Id of the underlying entity. Change records report their local id.
    pub fn id(&self) -> EntityId {
        match self {
            Self::Appointment(item) => item.id,
            Self::SchoolDoc(item) => item.id,
            Self::Note(item) => item.id,
            Self::Medication(item) => item.id,
            Self::MedicationChange { change, .. } => change.id,
        }
    }

    /// Primary display text.
    pub fn title(&self) -> String {
        match self {
            Self::Appointment(item) => item.title.clone(),
            Self::SchoolDoc(item) => item.name.clone(),
            Self::Note(item) => item.title.clone(),
            Self::Medication(item) => item.name.clone(),
            Self::MedicationChange { medication, change } => {
                format!("{} - {}", medication.name, change.kind.label())
            }
        }
    }

    /// Human label for the entity kind.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Appointment(_) => "Appointment",
            Self::SchoolDoc(_) => "Document",
            Self::Note(_) => "Note",
            Self::Medication(_) => "Medication",
            Self::MedicationChange { .. } => "Medication Change",
        }
    }

    /// Date the item is pinned to on the calendar, if any.
    ///
    /// A medication itself is never placed on the calendar; its change
    /// records are.
    pub fn calendar_date(&self) -> Option<&'a str> {
        match *self {
            Self::Appointment(item) => Some(item.date.as_str()),
            Self::SchoolDoc(item) => item.date.as_deref(),
            Self::Note(item) => item.date.as_deref(),
            Self::Medication(_) => None,
            Self::MedicationChange { change, .. } => Some(change.date.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HubItem;
    use crate::model::medication::{Medication, MedicationChange, MedicationChangeType};
    use crate::model::school_doc::SchoolDoc;

    #[test]
    fn change_title_combines_medication_name_and_label() {
        let medication = Medication::new("Adderall XR");
        let change = MedicationChange::new("2024-11-15", MedicationChangeType::Started);
        let item = HubItem::MedicationChange {
            medication: &medication,
            change: &change,
        };
        assert_eq!(item.title(), "Adderall XR - Started");
        assert_eq!(item.kind_label(), "Medication Change");
        assert_eq!(item.calendar_date(), Some("2024-11-15"));
    }

    #[test]
    fn medication_and_undated_doc_have_no_calendar_date() {
        let medication = Medication::new("Melatonin");
        let doc = SchoolDoc::new("Progress report", "Note");
        assert_eq!(HubItem::Medication(&medication).calendar_date(), None);
        assert_eq!(HubItem::SchoolDoc(&doc).calendar_date(), None);
    }
}
