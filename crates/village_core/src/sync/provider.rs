//! External calendar provider boundary.

use crate::sync::event::ExternalEvent;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Sync phase in which a provider call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    Connect,
    Push,
}

impl SyncStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Push => "push",
        }
    }
}

/// Failure reported by a provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub provider_id: String,
    pub stage: SyncStage,
    /// Stable machine-readable code such as `not_signed_in`.
    pub code: String,
    pub message: String,
    pub retryable: bool,
}

impl ProviderError {
    pub fn new(
        provider_id: impl Into<String>,
        stage: SyncStage,
        code: impl Into<String>,
        message: impl Into<String>,
        retryable: bool,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            stage,
            code: code.into(),
            message: message.into(),
            retryable,
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}:{}] {}: {}",
            self.provider_id,
            self.stage.as_str(),
            self.code,
            self.message
        )
    }
}

impl Error for ProviderError {}

/// External calendar service consumed one event at a time.
pub trait CalendarProvider {
    /// Stable lowercase id, e.g. `google_calendar`.
    fn provider_id(&self) -> &str;

    /// Name shown in user-facing messages.
    fn display_name(&self) -> &str;

    /// Establishes an authorized session.
    fn authorize(&mut self) -> ProviderResult<()>;

    fn is_authorized(&self) -> bool;

    fn sign_out(&mut self) -> ProviderResult<()>;

    /// Creates one external event and returns its id when the service
    /// reports one.
    fn insert_event(&self, event: &ExternalEvent) -> ProviderResult<Option<String>>;
}
