// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Offline management: editing a server configuration file with XML
//! transforms instead of talking to a running server.

mod file;
mod subtree;
mod transform;
mod xml;

use crate::errors::Error;

pub use file::ConfigurationFile;
pub use subtree::{OfflineOptions, Subtree};
pub use transform::{
    Param, Parameters, Scope, Template, TemplateError, TemplateFn, XmlTransform,
    XmlTransformBuilder,
};
pub use xml::{Document, Element, Node, PathStep};

/// Applies transforms to a configuration document.
pub trait OfflineManagementClient {
    fn apply(&self, transform: &XmlTransform) -> Result<(), Error>;
}
