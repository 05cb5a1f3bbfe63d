// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Error types returned by the quickstart clients and workflow.

use reqwest::StatusCode;
use serde::Deserialize;

/// A specialized [`Result`](std::result::Result) for quickstart operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while talking to a Cosmos DB account.
///
/// `AlreadyExists`, `NotFound` and `Unsupported` are the conditions callers are
/// expected to match on. Everything else is a hard failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The service answered `409 Conflict` for a create.
    #[error("resource '{resource}' already exists")]
    AlreadyExists { resource: String },

    /// The service answered `404 Not Found`.
    #[error("resource '{resource}' was not found")]
    NotFound { resource: String },

    /// The account does not support the operation, e.g. reading offers on a serverless account.
    #[error("operation not supported: {message}")]
    Unsupported { message: String },

    /// Any other non-success status.
    #[error("service returned {status}: {message}")]
    Service {
        status: StatusCode,
        code: Option<String>,
        message: String,
    },

    #[error("request could not be sent: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("payload could not be converted: {0}")]
    DataConversion(#[from] serde_json::Error),

    #[error("account key cannot be used: {message}")]
    Credential { message: String },

    #[error("account endpoint is not a valid URL: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("request date could not be formatted: {0}")]
    RequestDate(#[from] time::error::Format),

    #[error("unexpected response: {message}")]
    MalformedResponse { message: String },
}

impl Error {
    /// Builds an error from a non-success response.
    ///
    /// `resource` names the link the request was sent to.
    pub(crate) fn from_response(
        status: StatusCode,
        body: &[u8],
        resource: impl Into<String>,
    ) -> Self {
        let resource = resource.into();
        match status {
            StatusCode::NOT_FOUND => Error::NotFound { resource },
            StatusCode::CONFLICT => Error::AlreadyExists { resource },
            _ => {
                #[derive(Deserialize)]
                struct ErrorBody {
                    code: Option<String>,
                    message: Option<String>,
                }

                let parsed = serde_json::from_slice::<ErrorBody>(body).ok();
                let code = parsed.as_ref().and_then(|b| b.code.clone());
                let message = parsed
                    .and_then(|b| b.message)
                    .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned());
                Error::Service {
                    status,
                    code,
                    message,
                }
            }
        }
    }

    /// Returns the HTTP status this error corresponds to, if it came from the service.
    pub fn http_status(&self) -> Option<StatusCode> {
        match self {
            Error::AlreadyExists { .. } => Some(StatusCode::CONFLICT),
            Error::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            Error::Service { status, .. } => Some(*status),
            Error::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Error::AlreadyExists { .. })
    }
}
