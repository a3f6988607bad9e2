//! UI/backend events and error modeling for the scheduler controller.

use client_core::ClientError;
use shared::protocol::{CalendarReceipt, ScheduleResults};

pub enum UiEvent {
    Info(String),
    ServiceHealthy(String),
    ScheduleGenerated(ScheduleResults),
    CalendarUpdated(CalendarReceipt),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Rejected,
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Generate,
    AddToCalendar,
    HealthCheck,
}

impl UiErrorContext {
    fn fallback_message(self) -> &'static str {
        match self {
            UiErrorContext::Generate => "Failed to generate schedule",
            UiErrorContext::AddToCalendar => "Failed to add to calendar",
            UiErrorContext::HealthCheck => "Scheduling service health check failed",
            UiErrorContext::BackendStartup => {
                "Backend worker startup failure; verify local app environment and restart."
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: Option<String>,
}

impl UiError {
    /// Only a service-supplied reason is kept as the message; transport and
    /// decode details stay in the logs.
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::Rejected { .. } => UiErrorCategory::Rejected,
            ClientError::Transport(_) | ClientError::MalformedResponse { .. } => {
                UiErrorCategory::Transport
            }
            ClientError::InvalidBaseUrl { .. } => UiErrorCategory::Validation,
        };
        let message = match err {
            ClientError::Rejected { message } => message.clone(),
            ClientError::InvalidBaseUrl { .. } => Some(err.to_string()),
            _ => None,
        };
        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("please")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("unreachable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("declined") || message_lower.contains("rejected") {
            UiErrorCategory::Rejected
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message: Some(message),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Text shown to the user in the error toast.
    pub fn user_message(&self, api_base_url: &str) -> String {
        if self.context == UiErrorContext::BackendStartup {
            return self.context.fallback_message().to_string();
        }
        match self.category {
            UiErrorCategory::Transport => match self.context {
                UiErrorContext::Generate | UiErrorContext::HealthCheck => format!(
                    "Failed to connect to backend. Make sure the API is running at {}.",
                    api_base_url.trim_end_matches('/')
                ),
                _ => "Failed to connect to backend.".to_string(),
            },
            UiErrorCategory::Validation
            | UiErrorCategory::Rejected
            | UiErrorCategory::Unknown => self
                .message
                .as_deref()
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| self.context.fallback_message())
                .to_string(),
        }
    }
}

/// Short tag for status lines and logs.
pub fn err_label(err: &UiError) -> &'static str {
    match err.category() {
        UiErrorCategory::Validation => "validation",
        UiErrorCategory::Rejected => "declined",
        UiErrorCategory::Transport => "connectivity",
        UiErrorCategory::Unknown => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declined_without_reason_uses_action_fallback() {
        let err = UiError::from_client_error(
            UiErrorContext::Generate,
            &ClientError::Rejected { message: None },
        );
        assert_eq!(err.category(), UiErrorCategory::Rejected);
        assert_eq!(
            err.user_message("http://127.0.0.1:5001/"),
            "Failed to generate schedule"
        );

        let err = UiError::from_client_error(
            UiErrorContext::AddToCalendar,
            &ClientError::Rejected { message: None },
        );
        assert_eq!(err.user_message("http://x/"), "Failed to add to calendar");
    }

    #[test]
    fn declined_with_reason_shows_server_text() {
        let err = UiError::from_client_error(
            UiErrorContext::AddToCalendar,
            &ClientError::Rejected {
                message: Some("token expired".to_string()),
            },
        );
        assert_eq!(err.user_message("http://x/"), "token expired");
        assert_eq!(err_label(&err), "declined");
    }

    #[test]
    fn connectivity_message_names_base_url_for_generation_only() {
        let malformed = ClientError::MalformedResponse {
            status: 502,
            reason: "expected value".to_string(),
        };
        let generate = UiError::from_client_error(UiErrorContext::Generate, &malformed);
        assert_eq!(generate.category(), UiErrorCategory::Transport);
        assert_eq!(generate.message(), None);
        assert_eq!(
            generate.user_message("http://127.0.0.1:5001/"),
            "Failed to connect to backend. Make sure the API is running at http://127.0.0.1:5001."
        );

        let calendar = UiError::from_client_error(UiErrorContext::AddToCalendar, &malformed);
        assert_eq!(
            calendar.user_message("http://127.0.0.1:5001/"),
            "Failed to connect to backend."
        );
    }

    #[test]
    fn free_text_is_classified_by_keywords() {
        assert_eq!(
            UiError::from_message(UiErrorContext::AddToCalendar, "connection reset by peer").category(),
            UiErrorCategory::Transport
        );
        assert_eq!(
            UiError::from_message(UiErrorContext::AddToCalendar, "Please select a schedule to add.")
                .category(),
            UiErrorCategory::Validation
        );
        assert_eq!(
            UiError::from_message(UiErrorContext::AddToCalendar, "boom").category(),
            UiErrorCategory::Unknown
        );
    }

    #[test]
    fn startup_failure_has_fixed_guidance() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "backend worker startup failure: failed to build runtime",
        );
        assert!(err
            .user_message("http://x/")
            .starts_with("Backend worker startup failure"));
    }
}
