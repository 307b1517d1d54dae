//! Domain model for the family hub.
//!
//! # Responsibility
//! - Define the four entity shapes held by the Domain Store.
//! - Provide the `HubItem` sum type used by every rendering concern.
//!
//! # Invariants
//! - Every entity is identified by a stable `EntityId`.
//! - Date fields hold zero-padded ISO `YYYY-MM-DD` strings; ordering by
//!   string comparison relies on that format.
//! - Entities are never edited after creation, except the medication
//!   dosage/end-date derivation applied by the change engine.

pub mod appointment;
pub mod item;
pub mod medication;
pub mod note;
pub mod school_doc;

use uuid::Uuid;

/// Opaque identifier shared by all entity collections.
pub type EntityId = Uuid;

/// Returns `None` for blank optional text, trimmed text otherwise.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}
