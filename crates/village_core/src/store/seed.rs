//! Demo records loaded into a fresh session.

use crate::model::appointment::Appointment;
use crate::model::medication::{Medication, MedicationChange, MedicationChangeType};
use crate::model::note::{Note, NoteCategory};
use crate::model::school_doc::SchoolDoc;
use crate::store::domain_store::DomainStore;

impl DomainStore {
    /// Creates a store pre-populated with the demo family records.
    pub fn seeded() -> Self {
        Self::from_collections(
            seed_appointments(),
            seed_docs(),
            seed_notes(),
            seed_medications(),
        )
    }
}

fn seed_appointments() -> Vec<Appointment> {
    let mut ot = Appointment::new("OT Session", "2025-03-15");
    ot.time = Some("3:30 PM".to_string());
    ot.provider = "Oak Therapy Center".to_string();
    ot.location = "Clinic".to_string();
    ot.notes = Some("Focus on sensory diet updates".to_string());

    let mut meeting = Appointment::new("School Meeting", "2025-03-22");
    meeting.time = Some("9:00 AM".to_string());
    meeting.provider = "Ms. Lopez".to_string();
    meeting.location = "Elementary School".to_string();
    meeting.notes = Some("Review accommodations for transitions".to_string());

    vec![ot, meeting]
}

fn seed_docs() -> Vec<SchoolDoc> {
    let mut iep = SchoolDoc::new("IEP 2024-2025", "IEP");
    iep.date = Some("2025-02-01".to_string());
    iep.notes = Some("Focus on executive functioning supports".to_string());

    let mut plan = SchoolDoc::new("504 Plan", "504");
    plan.date = Some("2024-09-10".to_string());
    plan.notes = Some("Extended time and sensory breaks".to_string());

    vec![iep, plan]
}

fn seed_notes() -> Vec<Note> {
    let mut recess = Note::new("Recess incident follow-up", NoteCategory::School);
    recess.date = Some("2025-03-05".to_string());
    recess.summary = "Discussed peer conflict; teacher will monitor transitions.".to_string();
    recess.action_items = Some("Check-in after recess, share calming strategies.".to_string());

    let mut practice = Note::new("OT home practice", NoteCategory::Home);
    practice.date = Some("2025-03-02".to_string());
    practice.summary = "Heavy work before homework improved focus.".to_string();
    practice.action_items = Some("Keep 10-minute routine before seated tasks.".to_string());

    vec![recess, practice]
}

fn seed_medications() -> Vec<Medication> {
    let mut adderall = Medication::new("Adderall XR");
    adderall.current_dosage = Some("20mg".to_string());
    adderall.frequency = Some("Once daily in morning".to_string());
    adderall.prescriber = Some("Dr. Johnson".to_string());
    adderall.start_date = Some("2024-11-15".to_string());
    adderall.notes = Some("Take with food to reduce stomach upset".to_string());
    adderall.changes = vec![
        MedicationChange::new("2024-11-15", MedicationChangeType::Started)
            .with_dosage("10mg")
            .with_notes("Initial prescription"),
        MedicationChange::new("2024-12-01", MedicationChangeType::Increased)
            .with_dosage("15mg")
            .with_notes("Increased due to effectiveness"),
        MedicationChange::new("2025-01-10", MedicationChangeType::Increased)
            .with_dosage("20mg")
            .with_notes("Current stable dose"),
    ];

    vec![adderall]
}

#[cfg(test)]
mod tests {
    use crate::medication_engine::replay;
    use crate::store::domain_store::{DomainStore, HubRepository};

    #[test]
    fn seeded_store_has_demo_records() {
        let store = DomainStore::seeded();
        let summary = store.summary();
        assert_eq!(summary.appointments, 2);
        assert_eq!(summary.docs, 2);
        assert_eq!(summary.notes, 2);
        assert_eq!(summary.medications, 1);
        assert_eq!(store.appointments()[0].title, "OT Session");
    }

    #[test]
    fn seeded_medication_dosage_matches_its_change_log() {
        let store = DomainStore::seeded();
        let medication = &store.medications()[0];
        let state = replay(None, &medication.changes);
        assert_eq!(state.current_dosage, medication.current_dosage);
    }
}
