// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use thiserror::Error;

/// A command could not be constructed from the values it was given.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("name of the {resource} must be specified as non empty value")]
    EmptyName { resource: &'static str },

    #[error("{field} of the {resource} must be specified as non empty value")]
    MissingField {
        resource: &'static str,
        field: &'static str,
    },
}

/// Unwraps a required builder field, treating an empty string as missing.
pub(crate) fn required(
    value: Option<String>,
    resource: &'static str,
    field: &'static str,
) -> Result<String, BuildError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(BuildError::MissingField { resource, field })
}

/// Checks the name given to a builder constructor.
pub(crate) fn named(name: String, resource: &'static str) -> Result<String, BuildError> {
    if name.is_empty() {
        return Err(BuildError::EmptyName { resource });
    }
    Ok(name)
}
