//! Sync adapter: connection state plus batch push with a tally.

use crate::model::appointment::Appointment;
use crate::sync::event::appointment_to_event;
use crate::sync::provider::CalendarProvider;
use chrono::{Local, TimeZone};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Setup failure that prevents a sync run from starting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    NotConnected { provider: String },
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotConnected { provider } => write!(
                f,
                "Failed to sync. Please make sure you are connected to {provider}."
            ),
        }
    }
}

impl Error for SyncError {}

/// Aggregate outcome of one sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub success: usize,
    pub failed: usize,
    /// Ids returned by the provider for created events, in push order.
    pub created_event_ids: Vec<String>,
}

impl SyncReport {
    /// Single user-facing notification for the whole run.
    pub fn summary_message(&self, provider_name: &str) -> String {
        let mut message = format!(
            "Synced {} appointment(s) to {provider_name}",
            self.success
        );
        if self.failed > 0 {
            message.push_str(&format!(" ({} failed)", self.failed));
        }
        message
    }
}

/// Pushes appointments to one provider, interpreting times in `Tz`.
pub struct CalendarSyncAdapter<P, Tz = Local> {
    provider: P,
    tz: Tz,
    time_zone_name: Option<String>,
}

impl<P: CalendarProvider> CalendarSyncAdapter<P, Local> {
    /// Creates an adapter that uses the machine's local timezone.
    pub fn new(provider: P) -> Self {
        Self::with_time_zone(provider, Local, None)
    }
}

impl<P: CalendarProvider, Tz: TimeZone> CalendarSyncAdapter<P, Tz> {
    pub fn with_time_zone(provider: P, tz: Tz, time_zone_name: Option<String>) -> Self {
        Self {
            provider,
            tz,
            time_zone_name,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Authorizes against the provider. Failures are reported as `false`.
    pub fn init_connection(&mut self) -> bool {
        match self.provider.authorize() {
            Ok(()) => {
                info!(
                    "event=sync_connect module=sync status=ok provider={}",
                    self.provider.provider_id()
                );
                true
            }
            Err(err) => {
                warn!(
                    "event=sync_connect module=sync status=error provider={} code={} retryable={}",
                    err.provider_id, err.code, err.retryable
                );
                false
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.provider.is_authorized()
    }

    pub fn disconnect(&mut self) {
        match self.provider.sign_out() {
            Ok(()) => info!(
                "event=sync_disconnect module=sync status=ok provider={}",
                self.provider.provider_id()
            ),
            Err(err) => warn!(
                "event=sync_disconnect module=sync status=error provider={} code={}",
                err.provider_id, err.code
            ),
        }
    }

    /// Pushes every appointment once, in order.
    ///
    /// # Errors
    /// - `SyncError::NotConnected` when no authorized session exists; nothing
    ///   is pushed in that case.
    ///
    /// Individual conversion or provider failures only increment `failed`.
    pub fn sync_all(&self, appointments: &[Appointment]) -> Result<SyncReport, SyncError> {
        let provider_id = self.provider.provider_id();
        if !self.provider.is_authorized() {
            warn!(
                "event=sync_run module=sync status=error provider={provider_id} reason=not_connected"
            );
            return Err(SyncError::NotConnected {
                provider: self.provider.display_name().to_string(),
            });
        }

        let mut report = SyncReport::default();
        for appointment in appointments {
            let event = match appointment_to_event(
                appointment,
                &self.tz,
                self.time_zone_name.as_deref(),
            ) {
                Ok(event) => event,
                Err(err) => {
                    warn!(
                        "event=sync_push module=sync status=error provider={provider_id} appointment_id={} reason=conversion detail={err}",
                        appointment.id
                    );
                    report.failed += 1;
                    continue;
                }
            };

            match self.provider.insert_event(&event) {
                Ok(created_id) => {
                    report.success += 1;
                    report.created_event_ids.extend(created_id);
                }
                Err(err) => {
                    warn!(
                        "event=sync_push module=sync status=error provider={provider_id} appointment_id={} code={} retryable={}",
                        appointment.id, err.code, err.retryable
                    );
                    report.failed += 1;
                }
            }
        }

        info!(
            "event=sync_run module=sync status=ok provider={provider_id} success={} failed={}",
            report.success, report.failed
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::SyncReport;

    #[test]
    fn summary_message_mentions_failures_only_when_present() {
        let clean = SyncReport {
            success: 2,
            failed: 0,
            created_event_ids: Vec::new(),
        };
        assert_eq!(
            clean.summary_message("Google Calendar"),
            "Synced 2 appointment(s) to Google Calendar"
        );

        let partial = SyncReport {
            success: 1,
            failed: 3,
            created_event_ids: Vec::new(),
        };
        assert_eq!(
            partial.summary_message("Google Calendar"),
            "Synced 1 appointment(s) to Google Calendar (3 failed)"
        );
    }
}
