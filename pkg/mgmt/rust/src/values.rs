// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use serde_json::{Map, Value};

/// Parameters of a management operation.
///
/// Absent optional values are dropped here, at serialization time, so that
/// the server never sees a null or empty placeholder for a field the caller
/// did not set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Values {
    entries: Map<String, Value>,
}

impl Values {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds a value unconditionally.
    pub fn and(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Adds a value only when it is present: `None`, JSON null and empty
    /// strings are skipped.
    pub fn and_optional<V: Into<Value>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        let Some(value) = value.map(Into::into) else {
            return self;
        };
        if is_absent(&value) {
            return self;
        }
        self.and(key, value)
    }

    /// Adds a list value only when it is non-empty.
    pub fn and_list(self, key: impl Into<String>, values: &[String]) -> Self {
        if values.is_empty() {
            return self;
        }
        self.and(key, values.to_vec())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }
}

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_and_optional_skips_absent_values() {
        let values = Values::empty()
            .and("name", "myTM")
            .and_optional("provider", None::<String>)
            .and_optional("provider-loader", Some(""))
            .and_optional("key-store", Some("myKS"))
            .and_optional("required", Some(false));

        let keys: Vec<&str> = values.keys().collect();
        assert_eq!(keys, vec!["key-store", "name", "required"]);
        assert_eq!(values.get("key-store"), Some(&json!("myKS")));
        assert_eq!(values.get("required"), Some(&json!(false)));
    }

    #[test]
    fn test_and_keeps_explicit_values() {
        let values = Values::empty().and("algorithm", "").and("count", 3);
        assert_eq!(values.get("algorithm"), Some(&json!("")));
        assert_eq!(values.get("count"), Some(&json!(3)));
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_and_list() {
        let values = Values::empty()
            .and_list("protocols", &["TLSv1.2".to_string(), "TLSv1.3".to_string()])
            .and_list("cipher-suites", &[]);
        assert_eq!(values.get("protocols"), Some(&json!(["TLSv1.2", "TLSv1.3"])));
        assert!(!values.contains("cipher-suites"));
    }
}
