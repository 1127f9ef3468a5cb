//! API error taxonomy
//!
//! Every client-visible failure is one of these kinds. Each kind maps to an
//! HTTP status and, where the client can act on it, a machine-readable id
//! carried next to the human-readable message in the JSON body.

use hyper::StatusCode;
use thiserror::Error;

/// Classification of a request failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required parameter is absent or empty
    MissingParams,
    /// A parameter is present but malformed (non-numeric, inverted range, unknown filter value)
    InvalidParams,
    /// The nested finance object is absent or incomplete
    MissingParamsFinance,
    /// The timezones sequence is absent, empty, or its first entry is incomplete
    MissingParamsTimezones,
    /// A body or encoded nested payload could not be decoded as JSON
    InvalidJson,
    /// A named resource does not exist (no machine id in the body)
    NotFound,
    /// No route matches the method + path combination
    RouteNotFound,
}

impl ErrorKind {
    /// Machine-readable discriminator included in the response body, if any
    pub const fn id(self) -> Option<&'static str> {
        match self {
            Self::MissingParams => Some("missingParams"),
            Self::InvalidParams => Some("invalidParams"),
            Self::MissingParamsFinance => Some("missingParamsFinance"),
            Self::MissingParamsTimezones => Some("missingParamsTimezones"),
            Self::InvalidJson => Some("invalidJSON"),
            Self::NotFound => None,
            Self::RouteNotFound => Some("notFound"),
        }
    }

    /// HTTP status this kind is surfaced with
    pub const fn status(self) -> StatusCode {
        match self {
            Self::MissingParams
            | Self::InvalidParams
            | Self::MissingParamsFinance
            | Self::MissingParamsTimezones
            | Self::InvalidJson => StatusCode::BAD_REQUEST,
            Self::NotFound | Self::RouteNotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// A request failure with its client-facing message
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn missing_params(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingParams, message)
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidParams, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidJson, message)
    }

    pub fn route_not_found() -> Self {
        Self::new(
            ErrorKind::RouteNotFound,
            "The page you are looking for was not found",
        )
    }

    pub const fn status(&self) -> StatusCode {
        self.kind.status()
    }

    /// JSON body: `{"message": ...}` plus `"id"` for kinds that carry one
    pub fn to_body(&self) -> serde_json::Value {
        match self.kind.id() {
            Some(id) => serde_json::json!({ "message": self.message, "id": id }),
            None => serde_json::json!({ "message": self.message }),
        }
    }
}
