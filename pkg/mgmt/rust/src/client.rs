// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::errors::Error;
use crate::operations::{ModelNodeResult, Operation};

/// Connection to a live server's management interface.
///
/// A failed outcome is a successful `execute`: the `Err` side is reserved for
/// transport and protocol problems.
pub trait ManagementClient {
    fn execute(&self, operation: &Operation) -> Result<ModelNodeResult, Error>;
}
