// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use super::xml::Element;
use crate::errors::Error;
use std::fmt;

const DEFAULT_PROFILE: &str = "default";

/// Options of an offline session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfflineOptions {
    /// Profile searched for subsystems when the document is a domain
    /// configuration. Ignored for standalone configurations.
    pub profile: String,
}

impl Default for OfflineOptions {
    fn default() -> Self {
        Self {
            profile: DEFAULT_PROFILE.to_string(),
        }
    }
}

/// Region of the configuration document a transform is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subtree {
    Root,
    /// The `subsystem` element whose namespace names this subsystem.
    Subsystem(String),
}

impl Subtree {
    pub fn root() -> Self {
        Subtree::Root
    }

    pub fn subsystem(name: impl Into<String>) -> Self {
        Subtree::Subsystem(name.into())
    }

    /// Finds the subtree in `root`, returning it with its nesting depth.
    pub(crate) fn locate<'a>(
        &self,
        root: &'a mut Element,
        options: &OfflineOptions,
    ) -> Result<(&'a mut Element, usize), Error> {
        let name = match self {
            Subtree::Root => return Ok((root, 0)),
            Subtree::Subsystem(name) => name,
        };

        let kind = root.local_name().to_string();
        let (profile, depth) = match kind.as_str() {
            "server" => (root.child_mut("profile"), 1),
            "domain" => (
                root.child_mut("profiles").and_then(|profiles| {
                    profiles.find_child_mut(|p| {
                        p.local_name() == "profile"
                            && p.attribute("name") == Some(options.profile.as_str())
                    })
                }),
                2,
            ),
            _ => (None, 0),
        };
        let profile = profile.ok_or_else(|| Error::SubtreeNotFound(self.to_string()))?;
        let subsystem = profile
            .find_child_mut(|e| {
                e.local_name() == "subsystem"
                    && e.attribute("xmlns").is_some_and(|ns| matches_namespace(ns, name))
            })
            .ok_or_else(|| Error::SubtreeNotFound(self.to_string()))?;
        Ok((subsystem, depth + 1))
    }
}

impl fmt::Display for Subtree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subtree::Root => write!(f, "document root"),
            Subtree::Subsystem(name) => write!(f, "subsystem {name}"),
        }
    }
}

/// `urn:jboss:domain:elytron:18.0` and `urn:wildfly:elytron:18.0` both name
/// the elytron subsystem.
fn matches_namespace(namespace: &str, subsystem: &str) -> bool {
    namespace
        .strip_prefix("urn:jboss:domain:")
        .or_else(|| namespace.strip_prefix("urn:wildfly:"))
        .and_then(|rest| rest.strip_prefix(subsystem))
        .is_some_and(|version| version.starts_with(':'))
}
