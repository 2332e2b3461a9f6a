//! Error types for the relay.

use crate::translate::types::ErrorEnvelope;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RelayError {
    #[error("Not found")]
    NotFound,

    #[error("Bad request: {details}")]
    BadRequest { details: String },

    #[error("Bad gateway: {details}")]
    BadGateway { details: String },

    #[error("Response conversion failed: {details}")]
    ResponseConversion { details: String },

    #[error("Environment variable '{env}' not set. Set it with your upstream API key.")]
    MissingCredential { env: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl RelayError {
    pub fn bad_request(details: impl ToString) -> Self {
        Self::BadRequest {
            details: details.to_string(),
        }
    }

    pub fn bad_gateway(details: impl ToString) -> Self {
        Self::BadGateway {
            details: details.to_string(),
        }
    }

    pub fn conversion(details: impl ToString) -> Self {
        Self::ResponseConversion {
            details: details.to_string(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The JSON body sent to the caller for this failure.
    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            Self::NotFound => ErrorEnvelope::new("Not found"),
            Self::BadRequest { details } => ErrorEnvelope::with_details("Bad Request", details),
            Self::BadGateway { details } => ErrorEnvelope::with_details("Bad Gateway", details),
            Self::ResponseConversion { details } => {
                ErrorEnvelope::with_details("Response conversion failed", details)
            }
            // Startup-only failures; never expose config internals to callers.
            _ => ErrorEnvelope::new("Internal Server Error"),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.envelope())).into_response()
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
