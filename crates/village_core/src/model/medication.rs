//! Medication entity and its append-only change log.
//!
//! # Invariants
//! - `changes` keeps insertion order; display order is computed on read.
//! - `MedicationChange::id` is only unique within its owning medication.
//! - `end_date` is only ever set by a `stopped` change.

use crate::model::EntityId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Kind of event recorded in a medication change log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MedicationChangeType {
    Started,
    Stopped,
    Increased,
    Decreased,
    Changed,
}

impl MedicationChangeType {
    pub const ALL: [Self; 5] = [
        Self::Started,
        Self::Stopped,
        Self::Increased,
        Self::Decreased,
        Self::Changed,
    ];

    /// Stable lowercase id used on the wire and in form values.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Stopped => "stopped",
            Self::Increased => "increased",
            Self::Decreased => "decreased",
            Self::Changed => "changed",
        }
    }

    /// Display label shown in history lists and calendar titles.
    pub fn label(self) -> &'static str {
        match self {
            Self::Started => "Started",
            Self::Stopped => "Stopped",
            Self::Increased => "Increased",
            Self::Decreased => "Decreased",
            Self::Changed => "Changed",
        }
    }

    /// Accent color used for the history badge.
    pub fn accent_color(self) -> &'static str {
        match self {
            Self::Started => "#10b981",
            Self::Stopped => "#ef4444",
            Self::Increased => "#f59e0b",
            Self::Decreased => "#3b82f6",
            Self::Changed => "#8b5cf6",
        }
    }

    /// Whether a change of this kind carries a new current dosage.
    pub fn updates_dosage(self) -> bool {
        matches!(self, Self::Increased | Self::Decreased | Self::Changed)
    }
}

impl Display for MedicationChangeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChangeType(pub String);

impl Display for UnknownChangeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown medication change type `{}`; expected started|stopped|increased|decreased|changed",
            self.0
        )
    }
}

impl Error for UnknownChangeType {}

impl FromStr for MedicationChangeType {
    type Err = UnknownChangeType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownChangeType(value.trim().to_string()))
    }
}

/// One entry in a medication change log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationChange {
    pub id: EntityId,
    pub date: String,
    /// Serialized as `type` to match the external field name.
    #[serde(rename = "type")]
    pub kind: MedicationChangeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MedicationChange {
    pub fn new(date: impl Into<String>, kind: MedicationChangeType) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: date.into(),
            kind,
            dosage: None,
            notes: None,
        }
    }

    pub fn with_dosage(mut self, dosage: impl Into<String>) -> Self {
        self.dosage = Some(dosage.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescriber: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub changes: Vec<MedicationChange>,
}

impl Medication {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    pub fn with_id(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            current_dosage: None,
            frequency: None,
            prescriber: None,
            start_date: None,
            end_date: None,
            notes: None,
            changes: Vec::new(),
        }
    }

    /// Whether a `stopped` change has been recorded.
    pub fn is_stopped(&self) -> bool {
        self.end_date.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{MedicationChange, MedicationChangeType};

    #[test]
    fn change_type_round_trips_through_form_values() {
        for kind in MedicationChangeType::ALL {
            assert_eq!(kind.as_str().parse::<MedicationChangeType>().unwrap(), kind);
        }
        assert!("paused".parse::<MedicationChangeType>().is_err());
    }

    #[test]
    fn change_serializes_kind_as_type_field() {
        let change = MedicationChange::new("2025-01-10", MedicationChangeType::Increased)
            .with_dosage("20mg");
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["type"], "increased");
        assert_eq!(json["dosage"], "20mg");
        assert!(json.get("notes").is_none());
    }
}
