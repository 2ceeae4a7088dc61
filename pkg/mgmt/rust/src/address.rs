// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use serde_json::{Map, Value};
use std::fmt;

/// Address of a resource in the management model, as an ordered list of
/// `(type, name)` segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address {
    segments: Vec<(String, String)>,
}

impl Address {
    /// The root resource of the management model.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn subsystem(name: impl Into<String>) -> Self {
        Self::root().and("subsystem", name)
    }

    /// Appends a `type=name` segment.
    pub fn and(mut self, kind: impl Into<String>, name: impl Into<String>) -> Self {
        self.segments.push((kind.into(), name.into()));
        self
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = (&str, &str)> {
        self.segments.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Last `(type, name)` segment, `None` for the root.
    pub fn last(&self) -> Option<(&str, &str)> {
        self.segments.last().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Address of the parent resource, `None` for the root.
    pub fn parent(&self) -> Option<Address> {
        let (_, init) = self.segments.split_last()?;
        Some(Address {
            segments: init.to_vec(),
        })
    }

    /// Management model representation: `[{"subsystem": "elytron"}, ...]`.
    pub fn to_model(&self) -> Value {
        Value::Array(
            self.segments
                .iter()
                .map(|(kind, name)| {
                    let mut segment = Map::new();
                    segment.insert(kind.clone(), Value::String(name.clone()));
                    Value::Object(segment)
                })
                .collect(),
        )
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for (kind, name) in &self.segments {
            write!(f, "/{kind}={name}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display() {
        let tests = vec![
            ("root", Address::root(), "/"),
            ("subsystem", Address::subsystem("elytron"), "/subsystem=elytron"),
            (
                "nested",
                Address::subsystem("elytron").and("trust-managers", "myTM"),
                "/subsystem=elytron/trust-managers=myTM",
            ),
        ];

        for (name, address, expected) in tests {
            assert_eq!(address.to_string(), expected, "test case '{}' failed", name);
        }
    }

    #[test]
    fn test_to_model_keeps_segment_order() {
        let address = Address::subsystem("elytron").and("key-store", "ks");
        assert_eq!(
            address.to_model(),
            json!([{"subsystem": "elytron"}, {"key-store": "ks"}])
        );
        assert_eq!(Address::root().to_model(), json!([]));
    }

    #[test]
    fn test_parent_and_last() {
        let address = Address::subsystem("elytron").and("key-manager", "km");
        assert_eq!(address.last(), Some(("key-manager", "km")));
        assert_eq!(address.parent().unwrap(), Address::subsystem("elytron"));
        assert!(Address::root().parent().is_none());
        assert!(Address::root().last().is_none());
        assert!(Address::subsystem("elytron").parent().unwrap().is_root());
    }
}
