//! School document entity (IEP, 504 plan, evaluations, teacher notes).

use crate::model::EntityId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Document types offered by the creation form.
///
/// The stored `doc_type` stays a free string; this list is only the set of
/// choices presented to callers.
pub const DOC_TYPE_OPTIONS: [&str; 4] = ["IEP", "504", "Eval", "Note"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolDoc {
    pub id: EntityId,
    pub name: String,
    /// Serialized as `type` to match the external field name.
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Undated documents never appear on the calendar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SchoolDoc {
    pub fn new(name: impl Into<String>, doc_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            doc_type: doc_type.into(),
            date: None,
            notes: None,
        }
    }
}
