//! Appointment entity.

use crate::model::EntityId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One scheduled visit (therapy, school meeting, doctor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: EntityId,
    pub title: String,
    /// Calendar date without timezone.
    pub date: String,
    /// Free text, either `HH:MM` or `H:MM AM/PM`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub provider: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Appointment {
    /// Creates an appointment with a generated id and empty secondary fields.
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, date)
    }

    /// Creates an appointment with a caller-provided id.
    pub fn with_id(id: EntityId, title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            date: date.into(),
            time: None,
            provider: String::new(),
            location: String::new(),
            notes: None,
        }
    }
}
