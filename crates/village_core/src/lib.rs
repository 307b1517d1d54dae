//! Core domain logic for the Village family hub.
//! This crate is the single source of truth for entity state and the
//! projections derived from it.

pub mod calendar;
pub mod config;
pub mod logging;
pub mod medication_engine;
pub mod model;
pub mod service;
pub mod store;
pub mod sync;

pub use calendar::aggregator::{
    aggregate_events, date_key, event_months, events_for_date, group_by_date,
    medication_change_event_id, CalendarEvent, EventSource,
};
pub use calendar::grid::{CalendarError, MonthGrid, MonthStep, WEEKDAY_LABELS};
pub use config::{ConfigError, GoogleCalendarConfig, HubConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use medication_engine::{
    apply_change, has_history, history_newest_first, replay, MedicationState,
};
pub use model::appointment::Appointment;
pub use model::item::HubItem;
pub use model::medication::{Medication, MedicationChange, MedicationChangeType};
pub use model::note::{Note, NoteCategory};
pub use model::school_doc::{SchoolDoc, DOC_TYPE_OPTIONS};
pub use model::EntityId;
pub use service::assistant::{AssistantSession, ChatMessage, ChatRole, STARTER_PROMPTS};
pub use service::hub_service::{
    AppointmentDraft, HubService, MedicationChangeDraft, MedicationDraft, NoteDraft,
    SchoolDocDraft, ServiceError, ServiceResult,
};
pub use store::domain_store::{DomainStore, HubRepository, HubSnapshot, HubSummary};
pub use sync::adapter::{CalendarSyncAdapter, SyncError, SyncReport};
pub use sync::event::{appointment_to_event, parse_time_of_day, EventConversionError, ExternalEvent};
pub use sync::google::GoogleCalendarClient;
pub use sync::provider::{CalendarProvider, ProviderError, ProviderResult, SyncStage};

/// Minimal health-check API for wiring checks.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
