// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Building blocks for managing a WildFly server: management addresses and
//! operations, a synchronous HTTP management client, reload administration,
//! and an offline engine that applies XML transforms to configuration files.
//!
//! Commands implement [`OnlineCommand`] and [`OfflineCommand`] and are run
//! through a [`CommandTarget`], which picks the execution path.

// Correctness
#![deny(clippy::indexing_slicing)]
#![deny(clippy::string_slice)]
#![deny(clippy::cast_possible_wrap)]
#![deny(clippy::undocumented_unsafe_blocks)]
// Panicking code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unimplemented)]
#![deny(clippy::todo)]
// Debug code that shouldn't be in production
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]

pub mod address;
pub mod admin;
pub mod client;
pub mod command;
mod digest;
mod errors;
pub mod http;
pub mod offline;
pub mod operations;
pub mod values;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use address::Address;
pub use admin::{Administration, AdministrationOptions};
pub use client::ManagementClient;
pub use command::{
    CommandTarget, OfflineCommand, OfflineCommandContext, OnlineCommand, OnlineCommandContext,
};
pub use errors::Error;
pub use http::{ClientOptions, HttpManagementClient};
pub use operations::{ModelNodeResult, Operation, Operations, Outcome};
pub use values::Values;
