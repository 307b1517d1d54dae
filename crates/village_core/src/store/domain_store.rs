//! Domain Store implementation.

use crate::medication_engine::apply_change;
use crate::model::appointment::Appointment;
use crate::model::item::HubItem;
use crate::model::medication::{Medication, MedicationChange};
use crate::model::note::Note;
use crate::model::school_doc::SchoolDoc;
use crate::model::EntityId;
use log::debug;
use std::sync::Arc;

/// Repository interface the use-case layer mutates and reads through.
pub trait HubRepository {
    fn add_appointment(&mut self, appointment: Appointment);
    fn add_doc(&mut self, doc: SchoolDoc);
    fn add_note(&mut self, note: Note);
    fn add_medication(&mut self, medication: Medication);
    /// Appends a change to the medication with `medication_id`.
    ///
    /// Does nothing when no such medication exists.
    fn add_medication_change(&mut self, medication_id: EntityId, change: MedicationChange);

    fn appointments(&self) -> &[Appointment];
    fn docs(&self) -> &[SchoolDoc];
    fn notes(&self) -> &[Note];
    fn medications(&self) -> &[Medication];

    /// Every entity as a `HubItem`: appointments, documents, notes,
    /// medications, then each medication's change records.
    fn items(&self) -> Vec<HubItem<'_>> {
        let changes = self.medications().iter().flat_map(|medication| {
            medication
                .changes
                .iter()
                .map(move |change| HubItem::MedicationChange { medication, change })
        });

        self.appointments()
            .iter()
            .map(HubItem::Appointment)
            .chain(self.docs().iter().map(HubItem::SchoolDoc))
            .chain(self.notes().iter().map(HubItem::Note))
            .chain(self.medications().iter().map(HubItem::Medication))
            .chain(changes)
            .collect()
    }
}

/// Cheap handle set over the current collections.
///
/// Two snapshots refer to the same collection exactly when no mutation of
/// that collection happened in between.
#[derive(Debug, Clone)]
pub struct HubSnapshot {
    pub appointments: Arc<Vec<Appointment>>,
    pub docs: Arc<Vec<SchoolDoc>>,
    pub notes: Arc<Vec<Note>>,
    pub medications: Arc<Vec<Medication>>,
}

impl HubSnapshot {
    /// Whether any collection was replaced between `earlier` and `self`.
    pub fn differs_from(&self, earlier: &HubSnapshot) -> bool {
        !(Arc::ptr_eq(&self.appointments, &earlier.appointments)
            && Arc::ptr_eq(&self.docs, &earlier.docs)
            && Arc::ptr_eq(&self.notes, &earlier.notes)
            && Arc::ptr_eq(&self.medications, &earlier.medications))
    }
}

/// Per-collection counts for dashboard tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HubSummary {
    pub appointments: usize,
    pub docs: usize,
    pub notes: usize,
    pub medications: usize,
}

/// Session-scoped in-memory store. Construct one and pass it explicitly.
#[derive(Debug, Clone, Default)]
pub struct DomainStore {
    appointments: Arc<Vec<Appointment>>,
    docs: Arc<Vec<SchoolDoc>>,
    notes: Arc<Vec<Note>>,
    medications: Arc<Vec<Medication>>,
}

impl DomainStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from pre-built collections, kept in the given order.
    pub fn from_collections(
        appointments: Vec<Appointment>,
        docs: Vec<SchoolDoc>,
        notes: Vec<Note>,
        medications: Vec<Medication>,
    ) -> Self {
        Self {
            appointments: Arc::new(appointments),
            docs: Arc::new(docs),
            notes: Arc::new(notes),
            medications: Arc::new(medications),
        }
    }

    pub fn snapshot(&self) -> HubSnapshot {
        HubSnapshot {
            appointments: Arc::clone(&self.appointments),
            docs: Arc::clone(&self.docs),
            notes: Arc::clone(&self.notes),
            medications: Arc::clone(&self.medications),
        }
    }

    pub fn summary(&self) -> HubSummary {
        HubSummary {
            appointments: self.appointments.len(),
            docs: self.docs.len(),
            notes: self.notes.len(),
            medications: self.medications.len(),
        }
    }

    pub fn medication(&self, medication_id: EntityId) -> Option<&Medication> {
        self.medications
            .iter()
            .find(|medication| medication.id == medication_id)
    }
}

impl HubRepository for DomainStore {
    fn add_appointment(&mut self, appointment: Appointment) {
        debug!(
            "event=entity_add module=store status=ok kind=appointment id={}",
            appointment.id
        );
        self.appointments = Arc::new(prepend(&self.appointments, appointment));
    }

    fn add_doc(&mut self, doc: SchoolDoc) {
        debug!(
            "event=entity_add module=store status=ok kind=doc id={}",
            doc.id
        );
        self.docs = Arc::new(prepend(&self.docs, doc));
    }

    fn add_note(&mut self, note: Note) {
        debug!(
            "event=entity_add module=store status=ok kind=note id={}",
            note.id
        );
        self.notes = Arc::new(prepend(&self.notes, note));
    }

    fn add_medication(&mut self, medication: Medication) {
        debug!(
            "event=entity_add module=store status=ok kind=medication id={} changes={}",
            medication.id,
            medication.changes.len()
        );
        self.medications = Arc::new(prepend(&self.medications, medication));
    }

    fn add_medication_change(&mut self, medication_id: EntityId, change: MedicationChange) {
        let Some(index) = self
            .medications
            .iter()
            .position(|medication| medication.id == medication_id)
        else {
            debug!(
                "event=medication_change module=store status=skipped reason=not_found medication_id={medication_id}"
            );
            return;
        };

        debug!(
            "event=medication_change module=store status=ok medication_id={} kind={}",
            medication_id, change.kind
        );
        let mut next = self.medications.as_ref().clone();
        apply_change(&mut next[index], change);
        self.medications = Arc::new(next);
    }

    fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    fn docs(&self) -> &[SchoolDoc] {
        &self.docs
    }

    fn notes(&self) -> &[Note] {
        &self.notes
    }

    fn medications(&self) -> &[Medication] {
        &self.medications
    }
}

fn prepend<T: Clone>(current: &[T], item: T) -> Vec<T> {
    let mut next = Vec::with_capacity(current.len() + 1);
    next.push(item);
    next.extend_from_slice(current);
    next
}
