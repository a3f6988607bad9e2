use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::protocol::{
    AddToCalendarRequest, AddToCalendarResponse, CalendarReceipt, GenerateScheduleRequest,
    GenerateScheduleResponse, HealthResponse, ScheduleResults, ADD_TO_CALENDAR_PATH,
    GENERATE_SCHEDULE_PATH, HEALTH_PATH,
};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use url::Url;

pub mod config;
pub mod form;
pub mod results;

pub use config::Settings;
pub use form::{FormDraft, FormValidationError, PreferencesSnapshot, INITIAL_COURSE_SLOTS};
pub use results::{ResultsState, SelectionError, SubmittedConfirmation};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid api base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error(
        "scheduling service declined the request: {}",
        message.as_deref().unwrap_or("no reason given")
    )]
    Rejected { message: Option<String> },
    #[error("failed to reach scheduling service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response from scheduling service (HTTP {status}): {reason}")]
    MalformedResponse { status: u16, reason: String },
}

impl ClientError {
    /// True when the service could not be reached or answered with something
    /// other than the expected JSON envelope.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Transport(_) | ClientError::MalformedResponse { .. }
        )
    }

    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Rejected { message } => message.as_deref(),
            _ => None,
        }
    }
}

#[async_trait]
pub trait SchedulerApi: Send + Sync {
    async fn generate_schedule(
        &self,
        request: &GenerateScheduleRequest,
    ) -> Result<ScheduleResults, ClientError>;
    async fn add_to_calendar(
        &self,
        request: &AddToCalendarRequest,
    ) -> Result<CalendarReceipt, ClientError>;
    async fn health(&self) -> Result<HealthResponse, ClientError>;
    fn base_url(&self) -> &str;
}

pub fn normalize_base_url(raw: &str) -> Result<Url, ClientError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&with_slash).map_err(|source| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })
}

pub struct HttpSchedulerClient {
    http: Client,
    base_url: Url,
}

impl HttpSchedulerClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = normalize_base_url(base_url)?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        Self::new(
            &settings.api_base_url,
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|source| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                source,
            })
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!(%url, "posting scheduling request");
        let response = self.http.post(url).json(body).send().await.map_err(|err| {
            error!(path, "scheduling service unreachable: {err}");
            ClientError::Transport(err)
        })?;
        decode_envelope(response).await
    }
}

// The service reports logical failures inside the JSON body, sometimes with a
// non-2xx status, so the body is decoded regardless of status.
async fn decode_envelope<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, ClientError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    serde_json::from_slice::<R>(&bytes).map_err(|err| {
        error!(status = status.as_u16(), "undecodable scheduling response: {err}");
        ClientError::MalformedResponse {
            status: status.as_u16(),
            reason: err.to_string(),
        }
    })
}

fn non_blank(message: Option<String>) -> Option<String> {
    message.filter(|message| !message.trim().is_empty())
}

#[async_trait]
impl SchedulerApi for HttpSchedulerClient {
    async fn generate_schedule(
        &self,
        request: &GenerateScheduleRequest,
    ) -> Result<ScheduleResults, ClientError> {
        let response: GenerateScheduleResponse =
            self.post_json(GENERATE_SCHEDULE_PATH, request).await?;
        if !response.success {
            warn!(error = ?response.error, "schedule generation declined");
            return Err(ClientError::Rejected {
                message: non_blank(response.error),
            });
        }
        let results = response.data.unwrap_or_default();
        info!(
            options = results.recommendations.len(),
            courses = request.courses.len(),
            "schedule generated"
        );
        Ok(results)
    }

    async fn add_to_calendar(
        &self,
        request: &AddToCalendarRequest,
    ) -> Result<CalendarReceipt, ClientError> {
        let response: AddToCalendarResponse =
            self.post_json(ADD_TO_CALENDAR_PATH, request).await?;
        if !response.success {
            warn!(error = ?response.error, "calendar export declined");
            return Err(ClientError::Rejected {
                message: non_blank(response.error),
            });
        }
        info!(
            events = request.schedule.len(),
            calendar = %request.calendar_name,
            "schedule added to calendar"
        );
        Ok(CalendarReceipt {
            calendar_id: response.calendar_id,
            message: response.message,
        })
    }

    async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = self.endpoint(HEALTH_PATH)?;
        let response = self.http.get(url).send().await?;
        decode_envelope(response).await
    }

    fn base_url(&self) -> &str {
        self.base_url.as_str()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
