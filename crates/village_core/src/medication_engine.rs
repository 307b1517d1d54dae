//! Medication change engine.
//!
//! # Responsibility
//! - Derive a medication's current dosage and end date from its change log.
//! - Order change history for display.
//!
//! # Invariants
//! - The change log is append-only; derivation never removes or reorders
//!   recorded changes.
//! - `increased|decreased|changed` with a non-empty dosage replace the
//!   current dosage verbatim; `stopped` sets the end date; `started` leaves both
//!   untouched.
//! - History order is descending by the raw `date` string. Ties keep
//!   insertion order.

use crate::model::medication::{Medication, MedicationChange, MedicationChangeType};

/// Effective state obtained by folding a change log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicationState {
    pub current_dosage: Option<String>,
    pub end_date: Option<String>,
}

/// Appends `change` to the medication log and applies its derivation.
pub fn apply_change(medication: &mut Medication, change: MedicationChange) {
    let state = MedicationState {
        current_dosage: medication.current_dosage.take(),
        end_date: medication.end_date.take(),
    };
    let next = fold_change(state, &change);
    medication.current_dosage = next.current_dosage;
    medication.end_date = next.end_date;
    medication.changes.push(change);
}

/// Replays a full change log on top of the dosage known at creation time.
pub fn replay(initial_dosage: Option<String>, changes: &[MedicationChange]) -> MedicationState {
    changes.iter().fold(
        MedicationState {
            current_dosage: initial_dosage,
            end_date: None,
        },
        fold_change,
    )
}

fn fold_change(mut state: MedicationState, change: &MedicationChange) -> MedicationState {
    match change.dosage.as_deref() {
        Some(dosage) if change.kind.updates_dosage() && !dosage.is_empty() => {
            state.current_dosage = Some(dosage.to_string());
        }
        _ => {}
    }
    if change.kind == MedicationChangeType::Stopped {
        state.end_date = Some(change.date.clone());
    }
    state
}

/// Returns the change log ordered newest first for display.
pub fn history_newest_first(medication: &Medication) -> Vec<&MedicationChange> {
    let mut history: Vec<&MedicationChange> = medication.changes.iter().collect();
    history.sort_by(|a, b| b.date.cmp(&a.date));
    history
}

/// Whether the medication has any history section to render.
pub fn has_history(medication: &Medication) -> bool {
    !medication.changes.is_empty()
}

#[cfg(test)]
mod tests {
    use super::{apply_change, history_newest_first, replay};
    use crate::model::medication::{Medication, MedicationChange, MedicationChangeType};

    #[test]
    fn started_without_dosage_keeps_creation_dosage() {
        let mut medication = Medication::new("Guanfacine");
        medication.current_dosage = Some("1mg".to_string());
        apply_change(
            &mut medication,
            MedicationChange::new("2025-02-01", MedicationChangeType::Started),
        );
        assert_eq!(medication.current_dosage.as_deref(), Some("1mg"));
        assert_eq!(medication.changes.len(), 1);
    }

    #[test]
    fn started_with_dosage_does_not_overwrite() {
        let mut medication = Medication::new("Guanfacine");
        medication.current_dosage = Some("1mg".to_string());
        apply_change(
            &mut medication,
            MedicationChange::new("2025-02-01", MedicationChangeType::Started).with_dosage("2mg"),
        );
        assert_eq!(medication.current_dosage.as_deref(), Some("1mg"));
    }

    #[test]
    fn empty_dosage_is_ignored_for_dosage_changes() {
        let mut medication = Medication::new("Guanfacine");
        medication.current_dosage = Some("1mg".to_string());
        apply_change(
            &mut medication,
            MedicationChange::new("2025-02-01", MedicationChangeType::Changed).with_dosage(""),
        );
        assert_eq!(medication.current_dosage.as_deref(), Some("1mg"));
    }

    #[test]
    fn dosage_is_stored_exactly_as_recorded() {
        let mut medication = Medication::new("Adderall XR");
        medication.current_dosage = Some("15mg".to_string());
        apply_change(
            &mut medication,
            MedicationChange::new("2025-01-10", MedicationChangeType::Increased)
                .with_dosage(" 20mg "),
        );
        assert_eq!(medication.current_dosage.as_deref(), Some(" 20mg "));
    }

    #[test]
    fn stopped_sets_end_date_and_keeps_dosage() {
        let mut medication = Medication::new("Guanfacine");
        medication.current_dosage = Some("1mg".to_string());
        apply_change(
            &mut medication,
            MedicationChange::new("2025-04-30", MedicationChangeType::Stopped).with_dosage("0mg"),
        );
        assert_eq!(medication.end_date.as_deref(), Some("2025-04-30"));
        assert_eq!(medication.current_dosage.as_deref(), Some("1mg"));
        assert!(medication.is_stopped());
    }

    #[test]
    fn replay_matches_incremental_application() {
        let changes = vec![
            MedicationChange::new("2024-11-15", MedicationChangeType::Started).with_dosage("10mg"),
            MedicationChange::new("2024-12-01", MedicationChangeType::Increased)
                .with_dosage("15mg"),
            MedicationChange::new("2025-01-10", MedicationChangeType::Decreased)
                .with_dosage("5mg"),
        ];
        let mut medication = Medication::new("Adderall XR");
        for change in changes.clone() {
            apply_change(&mut medication, change);
        }
        let state = replay(None, &changes);
        assert_eq!(state.current_dosage, medication.current_dosage);
        assert_eq!(state.current_dosage.as_deref(), Some("5mg"));
        assert_eq!(state.end_date, None);
    }

    #[test]
    fn history_is_newest_first_and_stable_on_ties() {
        let mut medication = Medication::new("Adderall XR");
        let first = MedicationChange::new("2025-01-10", MedicationChangeType::Increased);
        let older = MedicationChange::new("2024-11-15", MedicationChangeType::Started);
        let tie = MedicationChange::new("2025-01-10", MedicationChangeType::Changed);
        medication.changes = vec![first.clone(), older.clone(), tie.clone()];

        let ids: Vec<_> = history_newest_first(&medication)
            .into_iter()
            .map(|change| change.id)
            .collect();
        assert_eq!(ids, vec![first.id, tie.id, older.id]);
        assert_eq!(medication.changes[0].id, first.id);
    }
}
