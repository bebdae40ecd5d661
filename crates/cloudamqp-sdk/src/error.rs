// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for cloudamqp-sdk.

use std::time::Duration;

use thiserror::Error;

/// Result type using SdkError.
pub type Result<T> = std::result::Result<T, SdkError>;

/// Errors that can occur when using the CloudAMQP SDK.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Configuration error (missing or invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Could not reach the API.
    #[error("connection error: {0}")]
    Connection(String),

    /// Request timed out.
    #[error("request timed out after {0}ms")]
    Timeout(u64),

    /// API returned a non-success status.
    #[error("API error [{status}]: {message}")]
    Api { status: u16, message: String },

    /// Unexpected response from the API.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Instance not found.
    #[error("instance not found: {0}")]
    InstanceNotFound(i64),

    /// Invalid input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A status fetch failed while waiting for readiness.
    #[error("failed to check instance status: {0}")]
    StatusCheck(#[source] Box<SdkError>),

    /// The instance did not become ready before the deadline.
    #[error("timeout after {}s waiting for instance to be ready", .elapsed.as_secs())]
    WaitTimeout {
        /// Time spent waiting, rounded to whole seconds.
        elapsed: Duration,
    },
}

impl SdkError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::Api { status, .. } => Some(*status),
            SdkError::InstanceNotFound(_) => Some(404),
            SdkError::StatusCheck(inner) => inner.status(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SdkError::Serialization(err.to_string())
        } else {
            SdkError::Connection(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        SdkError::Serialization(err.to_string())
    }
}
