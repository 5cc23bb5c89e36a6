//! Error-mapping middleware.
//!
//! The only place where a [`Failure`] becomes a client-visible body. Workflows
//! return failures; handlers turn them into bare tagged responses; this layer
//! logs the failure and writes the [`ErrorDetails`] JSON.

use std::any::Any;

use axum::{
    Json,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::{
    error::{ErrorDetails, Failure},
    state::AppState,
};

pub async fn map_failures(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let Some(failure) = response.extensions().get::<Failure>() else {
        return response;
    };

    let details = ErrorDetails::new(failure, &state.error_source);
    error!(
        message = %details.message,
        status_code = details.status_code,
        detail = failure.detail(),
        "request failed"
    );

    (failure.status_code(), Json(details)).into_response()
}

/// Panic handler for `CatchPanicLayer`: a panicking handler is an unexpected failure.
pub fn failure_for_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic".to_string()
    };

    Failure::unexpected(message).into_response()
}
