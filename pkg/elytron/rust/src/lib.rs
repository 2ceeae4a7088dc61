// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Elytron TLS commands for WildFly: key stores, key managers, trust
//! managers and SSL contexts, each applicable to a running server or to a
//! configuration file.
//!
//! ```ignore
//! let command = AddTrustManager::builder("httpsTM")?
//!     .algorithm("PKIX")
//!     .key_store("httpsTS")
//!     .replace_existing()
//!     .build()?;
//! target.apply(command)?;
//! ```

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

pub mod changeset;
pub mod command;
mod errors;
pub mod tls;

pub use changeset::Changeset;
pub use command::ElytronCommand;
pub use errors::BuildError;
pub use tls::{
    AddClientSslContext, AddKeyManager, AddKeyStore, AddServerSslContext, AddTrustManager,
};
