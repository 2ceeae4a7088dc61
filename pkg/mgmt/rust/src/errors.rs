// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while executing management operations or offline transforms.
///
/// These are surfaced to the caller as-is; nothing in this crate retries or
/// rolls back after one of them.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (configuration file missing, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// XML parsing error
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// XML serialization error
    #[error("XML write error: {0}")]
    XmlWrite(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The management endpoint could not be reached or rejected the request
    #[error("transport error: {0}")]
    Transport(String),

    /// The management endpoint replied with something that is not a
    /// management result
    #[error("invalid management response: {0}")]
    InvalidResponse(String),

    /// The server executed the operation and reported a failed outcome
    #[error("operation '{operation}' on {address} failed: {description}")]
    OperationFailed {
        operation: String,
        address: String,
        description: String,
    },

    #[error("subtree {0} not found in configuration")]
    SubtreeNotFound(String),

    /// An offline transform template rejected its input
    #[error("transform {template} failed: {message}")]
    Transform {
        template: &'static str,
        message: String,
    },

    #[error("timed out after {timeout:?} waiting for server to reach state '{state}'")]
    Timeout { timeout: Duration, state: String },
}
