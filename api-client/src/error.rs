// Client-side error taxonomy
//
// Server failures are normalized into the Api variant carrying the status,
// the server's message, and field-level validation detail when present.

use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status
    #[error("{message} (status {status})")]
    Api {
        status: u16,
        message: String,
        validation_errors: Option<BTreeMap<String, Vec<String>>>,
    },

    /// The request never completed (connection refused, timeout, DNS)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered 2xx but the body did not match the contract
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The durable token store could not be read or written
    #[error("token storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl ApiError {
    /// HTTP status of a server-reported failure, None for local failures
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Field-level validation messages from a 400, when the server sent them
    pub fn validation_errors(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        match self {
            ApiError::Api {
                validation_errors, ..
            } => validation_errors.as_ref(),
            _ => None,
        }
    }
}

/// The server's shared error body. Parsed leniently: a body that does not
/// match still yields an Api error with a generic message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireErrorBody {
    message: String,
    #[serde(default)]
    validation_errors: Option<BTreeMap<String, Vec<String>>>,
}

pub(crate) fn normalize_error(status: u16, body: &[u8]) -> ApiError {
    match serde_json::from_slice::<WireErrorBody>(body) {
        Ok(wire) => ApiError::Api {
            status,
            message: wire.message,
            validation_errors: wire.validation_errors,
        },
        Err(_) => ApiError::Api {
            status,
            message: format!("request failed with status {}", status),
            validation_errors: None,
        },
    }
}
