//! Google Calendar v3 provider.
//!
//! Uses a pre-issued OAuth access token; the interactive consent flow lives
//! outside this crate.

use crate::config::GoogleCalendarConfig;
use crate::sync::event::ExternalEvent;
use crate::sync::provider::{CalendarProvider, ProviderError, ProviderResult, SyncStage};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

pub const GOOGLE_PROVIDER_ID: &str = "google_calendar";
pub const GOOGLE_DISPLAY_NAME: &str = "Google Calendar";
/// OAuth scope the access token must carry.
pub const GOOGLE_CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar.events";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct InsertedEvent {
    id: Option<String>,
}

pub struct GoogleCalendarClient {
    config: GoogleCalendarConfig,
    http: Client,
    authorized: bool,
}

impl GoogleCalendarClient {
    pub fn new(config: GoogleCalendarConfig) -> ProviderResult<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| error(SyncStage::Connect, "http_client_init", err.to_string(), false))?;
        Ok(Self {
            config,
            http,
            authorized: false,
        })
    }

    pub fn config(&self) -> &GoogleCalendarConfig {
        &self.config
    }

    fn calendar_url(&self, stage: SyncStage, events: bool) -> ProviderResult<Url> {
        let mut url = Url::parse(&self.config.api_base).map_err(|err| {
            error(stage, "invalid_api_base", err.to_string(), false)
        })?;
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                error(
                    stage,
                    "invalid_api_base",
                    format!("api base cannot hold a path: {}", self.config.api_base),
                    false,
                )
            })?;
            segments.pop_if_empty();
            segments.push("calendars").push(&self.config.calendar_id);
            if events {
                segments.push("events");
            }
        }
        Ok(url)
    }

    fn access_token(&self, stage: SyncStage) -> ProviderResult<&str> {
        self.config
            .access_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                error(
                    stage,
                    "missing_access_token",
                    "No Google access token configured.",
                    false,
                )
            })
    }
}

impl CalendarProvider for GoogleCalendarClient {
    fn provider_id(&self) -> &str {
        GOOGLE_PROVIDER_ID
    }

    fn display_name(&self) -> &str {
        GOOGLE_DISPLAY_NAME
    }

    fn authorize(&mut self) -> ProviderResult<()> {
        if self.config.client_id.trim().is_empty() {
            return Err(error(
                SyncStage::Connect,
                "missing_client_id",
                "Google client id not configured.",
                false,
            ));
        }
        let token = self.access_token(SyncStage::Connect)?;
        let url = self.calendar_url(SyncStage::Connect, false)?;

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .map_err(|err| error(SyncStage::Connect, "network", err.to_string(), true))?;
        check_status(SyncStage::Connect, response.status())?;

        self.authorized = true;
        Ok(())
    }

    fn is_authorized(&self) -> bool {
        self.authorized
    }

    fn sign_out(&mut self) -> ProviderResult<()> {
        self.authorized = false;
        Ok(())
    }

    fn insert_event(&self, event: &ExternalEvent) -> ProviderResult<Option<String>> {
        if !self.authorized {
            return Err(error(
                SyncStage::Push,
                "not_signed_in",
                "Not signed in to Google Calendar",
                false,
            ));
        }
        let token = self.access_token(SyncStage::Push)?;
        let url = self.calendar_url(SyncStage::Push, true)?;

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(event)
            .send()
            .map_err(|err| error(SyncStage::Push, "network", err.to_string(), true))?;
        check_status(SyncStage::Push, response.status())?;

        let created: InsertedEvent = response
            .json()
            .map_err(|err| error(SyncStage::Push, "invalid_response", err.to_string(), false))?;
        Ok(created.id)
    }
}

fn check_status(stage: SyncStage, status: StatusCode) -> ProviderResult<()> {
    if status.is_success() {
        return Ok(());
    }
    let (code, retryable) = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ("unauthorized", false),
        StatusCode::TOO_MANY_REQUESTS => ("rate_limited", true),
        status if status.is_server_error() => ("server_error", true),
        _ => ("http_status", false),
    };
    Err(error(stage, code, format!("HTTP {status}"), retryable))
}

fn error(
    stage: SyncStage,
    code: &str,
    message: impl Into<String>,
    retryable: bool,
) -> ProviderError {
    ProviderError::new(GOOGLE_PROVIDER_ID, stage, code, message, retryable)
}
