use proptest::prelude::*;
use village_core::{
    Appointment, DomainStore, HubRepository, Medication, MedicationChange, MedicationChangeType,
    Note, NoteCategory, SchoolDoc,
};
use uuid::Uuid;

fn change_type() -> impl Strategy<Value = MedicationChangeType> {
    prop::sample::select(MedicationChangeType::ALL.to_vec())
}

proptest! {
    #[test]
    fn newest_appointment_is_always_first(titles in prop::collection::vec("[A-Za-z ]{1,12}", 1..24)) {
        let mut store = DomainStore::new();
        for title in &titles {
            let appointment = Appointment::new(title.clone(), "2025-03-15");
            let id = appointment.id;
            store.add_appointment(appointment);
            prop_assert_eq!(store.appointments()[0].id, id);
        }
        prop_assert_eq!(store.appointments().len(), titles.len());
    }

    #[test]
    fn change_derivation_holds_for_any_change(
        kind in change_type(),
        dosage in prop::option::of("[ ]{0,2}[0-9]{1,3}mg[ ]{0,2}"),
        date in "20[0-9]{2}-(0[1-9]|1[0-2])-(0[1-9]|1[0-9]|2[0-8])",
    ) {
        let mut medication = Medication::new("Adderall XR");
        medication.current_dosage = Some("10mg".to_string());
        medication.changes.push(MedicationChange::new("2024-11-15", MedicationChangeType::Started));
        let medication_id = medication.id;
        let prior = medication.changes.clone();

        let mut store = DomainStore::new();
        store.add_medication(medication);

        let mut change = MedicationChange::new(date.clone(), kind);
        change.dosage = dosage.clone();
        store.add_medication_change(medication_id, change.clone());

        let updated = &store.medications()[0];
        prop_assert_eq!(updated.changes.len(), prior.len() + 1);
        prop_assert_eq!(&updated.changes[..prior.len()], &prior[..]);
        prop_assert_eq!(updated.changes.last(), Some(&change));

        let expected_dosage = match (&dosage, kind.updates_dosage()) {
            (Some(new_dosage), true) => new_dosage.clone(),
            _ => "10mg".to_string(),
        };
        prop_assert_eq!(updated.current_dosage.as_deref(), Some(expected_dosage.as_str()));

        if kind == MedicationChangeType::Stopped {
            prop_assert_eq!(updated.end_date.as_deref(), Some(date.as_str()));
        } else {
            prop_assert_eq!(updated.end_date.as_deref(), None);
        }
    }
}

#[test]
fn every_collection_prepends() {
    let mut store = DomainStore::new();

    let first_doc = SchoolDoc::new("504 Plan", "504");
    let second_doc = SchoolDoc::new("IEP 2024-2025", "IEP");
    let second_doc_id = second_doc.id;
    store.add_doc(first_doc);
    store.add_doc(second_doc);
    assert_eq!(store.docs()[0].id, second_doc_id);

    let older_note = Note::new("OT home practice", NoteCategory::Home);
    let newer_note = Note::new("Recess incident follow-up", NoteCategory::School);
    let newer_note_id = newer_note.id;
    store.add_note(older_note);
    store.add_note(newer_note);
    assert_eq!(store.notes()[0].id, newer_note_id);

    let newer_medication = Medication::new("Guanfacine");
    let newer_medication_id = newer_medication.id;
    store.add_medication(Medication::new("Adderall XR"));
    store.add_medication(newer_medication);
    assert_eq!(store.medications()[0].id, newer_medication_id);
}

#[test]
fn change_for_unknown_medication_leaves_everything_unchanged() {
    let mut store = DomainStore::seeded();
    let before = store.medications().to_vec();

    store.add_medication_change(
        Uuid::new_v4(),
        MedicationChange::new("2025-04-01", MedicationChangeType::Stopped),
    );

    assert_eq!(store.medications(), before.as_slice());
}

#[test]
fn change_targets_only_the_matching_medication() {
    let mut store = DomainStore::new();
    let target = Medication::new("Adderall XR");
    let target_id = target.id;
    store.add_medication(target);
    store.add_medication(Medication::new("Melatonin"));

    store.add_medication_change(
        target_id,
        MedicationChange::new("2025-01-10", MedicationChangeType::Increased).with_dosage("20mg"),
    );

    let target = store.medication(target_id).unwrap();
    assert_eq!(target.current_dosage.as_deref(), Some("20mg"));
    assert_eq!(target.changes.len(), 1);
    let other = &store.medications()[0];
    assert_eq!(other.name, "Melatonin");
    assert!(other.changes.is_empty());
    assert_eq!(other.current_dosage, None);
}
