// Copyright (c) 2026 Roman Barinov <rbarinov@gmail.com>
// Licensed under the FSL-1.1-NC.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Superseded by a newer identical request. Callers treat this as a no-op.
    #[error("request canceled")]
    Canceled,

    #[error("request failed with status {status}")]
    Status {
        status: u16,
        body: Option<serde_json::Value>,
    },

    #[error("session refresh failed: {0}")]
    RefreshFailed(#[source] Box<Error>),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("session store error: {0}")]
    Session(String),
}

impl Error {
    pub fn is_canceled(&self) -> bool {
        matches!(self, Error::Canceled)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// The backend's `{"error": "..."}` message, if the response carried one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Status {
                body: Some(body), ..
            } => body.get("error").and_then(|v| v.as_str()),
            Error::RefreshFailed(inner) => inner.message(),
            _ => None,
        }
    }
}
