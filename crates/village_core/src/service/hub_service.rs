//! Form-level use-case service over a `HubRepository`.
//!
//! # Responsibility
//! - Normalize raw form values (trim, blank optional text becomes `None`).
//! - Enforce the required-field checks of each creation form.
//! - Generate entity ids and delegate to repository mutations.
//!
//! # Invariants
//! - Required fields: appointment title and date, document name, note
//!   title, medication name, change medication id and date.
//! - A medication created with a start date gets one initial `started`
//!   change carrying the creation dosage and notes.
//! - Logging a change for an unknown medication is a silent no-op, exactly
//!   like the underlying store.

use crate::model::appointment::Appointment;
use crate::model::medication::{Medication, MedicationChange, MedicationChangeType};
use crate::model::non_blank;
use crate::model::note::{Note, NoteCategory};
use crate::model::school_doc::SchoolDoc;
use crate::model::EntityId;
use crate::store::domain_store::HubRepository;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Form validation errors surfaced before anything reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Required field is empty or whitespace only.
    MissingField(&'static str),
    /// Field value cannot be interpreted.
    InvalidField { field: &'static str, value: String },
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field is empty: {field}"),
            Self::InvalidField { field, value } => {
                write!(f, "invalid value for {field}: `{value}`")
            }
        }
    }
}

impl Error for ServiceError {}

/// Raw appointment form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub provider: String,
    pub location: String,
    pub notes: String,
}

/// Raw school document form values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolDocDraft {
    pub name: String,
    /// Defaults to `IEP`, the first creation choice.
    pub doc_type: String,
    pub date: String,
    pub notes: String,
}

impl Default for SchoolDocDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            doc_type: "IEP".to_string(),
            date: String::new(),
            notes: String::new(),
        }
    }
}

/// Raw note form values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub date: String,
    pub category: NoteCategory,
    pub summary: String,
    pub action_items: String,
}

impl Default for NoteDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            date: String::new(),
            category: NoteCategory::School,
            summary: String::new(),
            action_items: String::new(),
        }
    }
}

/// Raw medication form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicationDraft {
    pub name: String,
    pub current_dosage: String,
    pub frequency: String,
    pub prescriber: String,
    pub start_date: String,
    pub notes: String,
}

/// Raw "log medication change" form values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicationChangeDraft {
    /// Selected medication id as submitted by the form.
    pub medication_id: String,
    pub date: String,
    pub kind: MedicationChangeType,
    pub dosage: String,
    pub notes: String,
}

impl Default for MedicationChangeDraft {
    fn default() -> Self {
        Self {
            medication_id: String::new(),
            date: String::new(),
            kind: MedicationChangeType::Started,
            dosage: String::new(),
            notes: String::new(),
        }
    }
}

/// Use-case service wrapping one repository for the session.
pub struct HubService<R: HubRepository> {
    repo: R,
}

impl<R: HubRepository> HubService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn into_inner(self) -> R {
        self.repo
    }

    pub fn create_appointment(&mut self, draft: &AppointmentDraft) -> ServiceResult<EntityId> {
        let title = required("title", &draft.title)?;
        let date = required("date", &draft.date)?;

        let mut appointment = Appointment::new(title, date);
        appointment.time = optional(&draft.time);
        appointment.provider = draft.provider.trim().to_string();
        appointment.location = draft.location.trim().to_string();
        appointment.notes = optional(&draft.notes);

        let id = appointment.id;
        self.repo.add_appointment(appointment);
        info!("event=appointment_create module=service status=ok id={id}");
        Ok(id)
    }

    pub fn create_doc(&mut self, draft: &SchoolDocDraft) -> ServiceResult<EntityId> {
        let name = required("name", &draft.name)?;

        let mut doc = SchoolDoc::new(name, draft.doc_type.trim());
        doc.date = optional(&draft.date);
        doc.notes = optional(&draft.notes);

        let id = doc.id;
        self.repo.add_doc(doc);
        info!("event=doc_create module=service status=ok id={id}");
        Ok(id)
    }

    pub fn create_note(&mut self, draft: &NoteDraft) -> ServiceResult<EntityId> {
        let title = required("title", &draft.title)?;

        let mut note = Note::new(title, draft.category);
        note.date = optional(&draft.date);
        note.summary = draft.summary.trim().to_string();
        note.action_items = optional(&draft.action_items);

        let id = note.id;
        self.repo.add_note(note);
        info!(
            "event=note_create module=service status=ok id={id} category={}",
            draft.category
        );
        Ok(id)
    }

    pub fn create_medication(&mut self, draft: &MedicationDraft) -> ServiceResult<EntityId> {
        let name = required("name", &draft.name)?;

        let mut medication = Medication::new(name);
        medication.current_dosage = optional(&draft.current_dosage);
        medication.frequency = optional(&draft.frequency);
        medication.prescriber = optional(&draft.prescriber);
        medication.start_date = optional(&draft.start_date);
        medication.notes = optional(&draft.notes);
        if let Some(start_date) = medication.start_date.clone() {
            medication.changes.push(MedicationChange {
                id: Uuid::new_v4(),
                date: start_date,
                kind: MedicationChangeType::Started,
                dosage: medication.current_dosage.clone(),
                notes: medication.notes.clone(),
            });
        }

        let id = medication.id;
        self.repo.add_medication(medication);
        info!("event=medication_create module=service status=ok id={id}");
        Ok(id)
    }

    /// Logs one change against an existing medication.
    ///
    /// Returns the id of the change record that was submitted.
    pub fn log_medication_change(
        &mut self,
        draft: &MedicationChangeDraft,
    ) -> ServiceResult<EntityId> {
        let raw_id = required("medication_id", &draft.medication_id)?;
        let medication_id =
            Uuid::parse_str(raw_id.as_str()).map_err(|_| ServiceError::InvalidField {
                field: "medication_id",
                value: raw_id.clone(),
            })?;
        let date = required("date", &draft.date)?;

        let change = MedicationChange {
            id: Uuid::new_v4(),
            date,
            kind: draft.kind,
            dosage: optional(&draft.dosage),
            notes: optional(&draft.notes),
        };
        let change_id = change.id;

        if !self
            .repo
            .medications()
            .iter()
            .any(|medication| medication.id == medication_id)
        {
            warn!(
                "event=medication_change module=service status=skipped reason=not_found medication_id={medication_id}"
            );
        }
        self.repo.add_medication_change(medication_id, change);
        Ok(change_id)
    }
}

fn required(field: &'static str, value: &str) -> ServiceResult<String> {
    non_blank(Some(value))
        .map(str::to_string)
        .ok_or(ServiceError::MissingField(field))
}

fn optional(value: &str) -> Option<String> {
    non_blank(Some(value)).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::{required, ServiceError};

    #[test]
    fn required_rejects_whitespace_only_values() {
        assert_eq!(
            required("title", "   ").unwrap_err(),
            ServiceError::MissingField("title")
        );
        assert_eq!(required("title", " OT ").unwrap(), "OT");
    }
}
