//! Normalized error taxonomy for backend calls.
//!
//! Gateways catch transport and HTTP failures and normalize them into
//! [`ApiError`], whose `Display` form is the user-facing message. Local
//! precondition failures (empty cart, password mismatch) live in the same
//! taxonomy but are raised before any network call is made.

use reqwest::StatusCode;
use thiserror::Error;

use shopfront_core::EmailError;

use crate::stores::session::SessionError;

/// Errors surfaced to callers of the gateway layer.
///
/// The `Display` implementation is the message shown to the user; nothing
/// here is fatal, every variant is recoverable by retry or user correction.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend could not be reached at all (no response).
    #[error("Could not connect to the server.")]
    Unreachable(#[source] reqwest::Error),

    /// The backend rejected the credential (401-class).
    #[error("Authorization error. Please log in again.")]
    Unauthorized,

    /// The backend rejected the submitted data with field errors (400-class).
    #[error("{0}")]
    Validation(String),

    /// Any other non-success response.
    #[error("Server returned code {status}.")]
    Server {
        /// HTTP status code of the response.
        status: u16,
    },

    /// A success response whose body did not match the expected shape.
    #[error("Unexpected response from server: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// Local precondition: order placement with an empty cart.
    #[error("Cannot place an order with an empty cart.")]
    EmptyCart,

    /// Local precondition: registration passwords do not match.
    #[error("Passwords do not match.")]
    PasswordMismatch,

    /// Local precondition: registration email is malformed.
    #[error("Invalid email address: {0}.")]
    InvalidEmail(#[from] EmailError),

    /// The backend reported success but the session could not be established.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    /// Map a transport-level failure (no HTTP response) to the taxonomy.
    pub(crate) fn from_transport(source: reqwest::Error) -> Self {
        Self::Unreachable(source)
    }
}

/// Normalize a non-success HTTP response into an [`ApiError`].
///
/// 401-class responses become [`ApiError::Unauthorized`]; 4xx responses whose
/// body carries field errors become [`ApiError::Validation`] with all field
/// messages concatenated; everything else is [`ApiError::Server`].
pub(crate) fn normalize_error_response(status: StatusCode, body: &str) -> ApiError {
    if status == StatusCode::UNAUTHORIZED {
        return ApiError::Unauthorized;
    }

    if status.is_client_error()
        && let Some(message) = collect_field_errors(body)
    {
        return ApiError::Validation(message);
    }

    ApiError::Server {
        status: status.as_u16(),
    }
}

/// Flatten a field-error body (`{"field": ["msg", ...], ...}`) into one
/// space-joined message, preserving the backend's field order.
fn collect_field_errors(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let fields = value.as_object()?;

    let mut messages = Vec::new();
    for field_value in fields.values() {
        match field_value {
            serde_json::Value::String(message) => messages.push(message.clone()),
            serde_json::Value::Array(items) => messages.extend(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(String::from)),
            ),
            _ => {}
        }
    }

    if messages.is_empty() {
        None
    } else {
        Some(messages.join(" "))
    }
}
