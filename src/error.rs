use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ApiResult<T> = Result<T, Failure>;

/// Client-visible failure raised by a workflow.
///
/// Each variant is a failure kind; the error-mapping middleware turns it into a
/// status code and an [`ErrorDetails`] body.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Failure {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{message}")]
    Service {
        message: String,
        error: Option<String>,
        status: StatusCode,
    },
    #[error("{0}")]
    Unexpected(String),
}

impl Failure {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Generic operation failure, reported as 500.
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
            error: None,
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Generic operation failure with an explicit status and optional detail.
    pub fn service_with(
        message: impl Into<String>,
        error: Option<String>,
        status: StatusCode,
    ) -> Self {
        Self::Service {
            message: message.into(),
            error,
            status,
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Service { status, .. } => *status,
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(message)
            | Self::BadRequest(message)
            | Self::Service { message, .. }
            | Self::Unexpected(message) => message,
        }
    }

    /// Operator-facing detail of a service failure. Logged, never sent to the client.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Service { error, .. } => error.as_deref(),
            _ => None,
        }
    }
}

impl From<JsonRejection> for Failure {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for Failure {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

/// Serialized error body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    pub message: String,
    pub status_code: u16,
    pub source: String,
}

impl ErrorDetails {
    pub fn new(failure: &Failure, source: &str) -> Self {
        Self {
            message: failure.message().to_string(),
            status_code: failure.status_code().as_u16(),
            source: source.to_string(),
        }
    }
}

/// Failures carry no body of their own: the response is tagged with the failure
/// and the error-mapping middleware renders it.
impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let mut response = self.status_code().into_response();
        response.extensions_mut().insert(self);
        response
    }
}
