use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crux_http::Error as HttpError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    NetworkUnavailable,
    ServerError,
    MalformedResponse,
    Timeout,
    InvalidRequest,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NetworkUnavailable => "NETWORK_UNAVAILABLE",
            Self::ServerError => "SERVER_ERROR",
            Self::MalformedResponse => "MALFORMED_RESPONSE",
            Self::Timeout => "TIMEOUT",
            Self::InvalidRequest => "INVALID_REQUEST",
        }
    }

    /// Every fetch failure can be retried from the screen. A request the core
    /// could not even build will fail the same way again.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        !matches!(self, Self::InvalidRequest)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    pub internal_message: Option<String>,
    pub context: BTreeMap<String, String>,
}

impl AppError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            internal_message: None,
            context: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_internal(mut self, internal: impl Into<String>) -> Self {
        self.internal_message = Some(internal.into());
        self
    }

    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    #[must_use]
    pub fn user_facing_message(&self) -> String {
        match self.kind {
            ErrorKind::NetworkUnavailable => {
                "Unable to connect. Please check your internet connection and try again.".into()
            }
            ErrorKind::ServerError => {
                "The plant service is having trouble right now. Please try again.".into()
            }
            ErrorKind::MalformedResponse => {
                "We received data we could not read. Please try again later.".into()
            }
            ErrorKind::Timeout => "The request timed out. Please try again.".into(),
            ErrorKind::InvalidRequest => self.message.clone(),
        }
    }

    #[must_use]
    pub fn from_http_status(status: u16) -> Self {
        let kind = match status {
            408 | 504 => ErrorKind::Timeout,
            _ => ErrorKind::ServerError,
        };

        Self::new(kind, format!("HTTP error: {status}"))
            .with_context("http_status", status.to_string())
    }

    /// Classifies a failure reported by the HTTP capability.
    #[must_use]
    pub fn from_http_error(error: &HttpError) -> Self {
        match error {
            HttpError::Http(e) => {
                Self::from_http_status(u16::from(e.code)).with_internal(e.message.clone())
            }
            HttpError::Json(reason) => {
                Self::new(ErrorKind::MalformedResponse, "Response body is not valid JSON")
                    .with_internal(reason.clone())
            }
            HttpError::Url(reason) => {
                Self::new(ErrorKind::InvalidRequest, "Request URL is invalid")
                    .with_internal(reason.clone())
            }
            HttpError::Io(reason) => {
                Self::new(ErrorKind::NetworkUnavailable, "Network request failed")
                    .with_internal(reason.clone())
            }
            HttpError::Timeout => Self::new(ErrorKind::Timeout, "Request timed out"),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)?;
        if let Some(internal) = &self.internal_message {
            write!(f, " (internal: {internal})")?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;
