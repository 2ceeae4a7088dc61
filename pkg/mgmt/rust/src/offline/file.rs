// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use super::subtree::OfflineOptions;
use super::transform::XmlTransform;
use super::xml::Document;
use super::OfflineManagementClient;
use crate::errors::Error;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// A server configuration file edited in place. Each transform reads the
/// file, edits it and writes it back.
#[derive(Debug, Clone)]
pub struct ConfigurationFile {
    path: PathBuf,
    options: OfflineOptions,
}

impl ConfigurationFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: OfflineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: OfflineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &OfflineOptions {
        &self.options
    }
}

impl OfflineManagementClient for ConfigurationFile {
    fn apply(&self, transform: &XmlTransform) -> Result<(), Error> {
        let content = fs::read_to_string(&self.path)?;
        let mut document = Document::parse(&content)?;
        transform.apply_to(&mut document, &self.options)?;
        fs::write(&self.path, document.to_xml()?)?;
        info!(
            "applied {} to {}",
            transform.template_name(),
            self.path.display()
        );
        Ok(())
    }
}
