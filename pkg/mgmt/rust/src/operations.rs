// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::address::Address;
use crate::client::ManagementClient;
use crate::errors::Error;
use crate::values::Values;
use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};

pub const ADD: &str = "add";
pub const REMOVE: &str = "remove";
pub const READ_ATTRIBUTE: &str = "read-attribute";
pub const READ_CHILDREN_NAMES: &str = "read-children-names";

/// A single management request: operation name, target address and
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    name: String,
    address: Address,
    params: Values,
}

impl Operation {
    pub fn new(name: impl Into<String>, address: Address, params: Values) -> Self {
        Self {
            name: name.into(),
            address,
            params,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn params(&self) -> &Values {
        &self.params
    }

    /// Management model representation, as posted to the HTTP endpoint.
    pub fn to_model(&self) -> Value {
        let mut model = Map::new();
        model.insert("operation".to_string(), Value::String(self.name.clone()));
        model.insert("address".to_string(), self.address.to_model());
        for (key, value) in self.params.iter() {
            model.insert(key.clone(), value.clone());
        }
        Value::Object(model)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failed,
    Cancelled,
}

/// Reply to a management operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelNodeResult {
    pub outcome: Outcome,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(rename = "failure-description", default)]
    pub failure_description: Option<Value>,
    #[serde(rename = "response-headers", default)]
    pub response_headers: Option<Value>,
}

impl ModelNodeResult {
    pub fn success(result: Option<Value>) -> Self {
        Self {
            outcome: Outcome::Success,
            result,
            failure_description: None,
            response_headers: None,
        }
    }

    pub fn failed(description: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Failed,
            result: None,
            failure_description: Some(Value::String(description.into())),
            response_headers: None,
        }
    }

    pub fn from_value(value: Value) -> Result<Self, Error> {
        serde_json::from_value(value).map_err(|e| Error::InvalidResponse(e.to_string()))
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    /// Failure description as reported by the server. Structured descriptions
    /// (domain mode) are rendered as JSON.
    pub fn failure_description(&self) -> Option<String> {
        self.failure_description.as_ref().map(|d| match d {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    pub fn string_result(&self) -> Option<&str> {
        self.result.as_ref().and_then(Value::as_str)
    }

    /// Turns a failed or cancelled outcome into [`Error::OperationFailed`],
    /// keeping the server's description verbatim.
    pub fn assert_success(self, operation: &Operation) -> Result<Self, Error> {
        if self.is_success() {
            return Ok(self);
        }
        let description = self
            .failure_description()
            .unwrap_or_else(|| format!("outcome {:?}", self.outcome).to_lowercase());
        Err(Error::OperationFailed {
            operation: operation.name().to_string(),
            address: operation.address().to_string(),
            description,
        })
    }
}

/// Convenience wrappers for the common operations.
///
/// Methods return the raw [`ModelNodeResult`] when the outcome is meaningful
/// to the caller; helpers that interpret the result (`exists`,
/// `read_children_names`) fail on a failed outcome.
pub struct Operations<'a> {
    client: &'a dyn ManagementClient,
}

impl<'a> Operations<'a> {
    pub fn new(client: &'a dyn ManagementClient) -> Self {
        Self { client }
    }

    pub fn invoke(
        &self,
        name: &str,
        address: &Address,
        params: Values,
    ) -> Result<ModelNodeResult, Error> {
        let operation = Operation::new(name, address.clone(), params);
        debug!("executing {} on {}", operation.name(), operation.address());
        self.client.execute(&operation)
    }

    pub fn add(&self, address: &Address, params: Values) -> Result<ModelNodeResult, Error> {
        self.invoke(ADD, address, params)
    }

    pub fn remove(&self, address: &Address) -> Result<ModelNodeResult, Error> {
        self.invoke(REMOVE, address, Values::empty())
    }

    pub fn read_attribute(&self, address: &Address, name: &str) -> Result<ModelNodeResult, Error> {
        self.invoke(READ_ATTRIBUTE, address, Values::empty().and("name", name))
    }

    pub fn read_children_names(
        &self,
        address: &Address,
        child_type: &str,
    ) -> Result<Vec<String>, Error> {
        let params = Values::empty().and("child-type", child_type);
        let operation = Operation::new(READ_CHILDREN_NAMES, address.clone(), params);
        let result = self.client.execute(&operation)?.assert_success(&operation)?;
        match result.result {
            Some(Value::Array(names)) => Ok(names
                .into_iter()
                .filter_map(|n| n.as_str().map(str::to_string))
                .collect()),
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(other) => Err(Error::InvalidResponse(format!(
                "expected a list of names, got {other}"
            ))),
        }
    }

    /// Whether the resource exists, checked by listing the parent's children
    /// of the same type.
    pub fn exists(&self, address: &Address) -> Result<bool, Error> {
        let (Some(parent), Some((kind, name))) = (address.parent(), address.last()) else {
            // the root always exists
            return Ok(true);
        };
        let children = self.read_children_names(&parent, kind)?;
        Ok(children.iter().any(|child| child == name))
    }

    /// Removes the resource if it exists. An absent resource is not an
    /// error; returns whether a remove was issued.
    pub fn remove_if_exists(&self, address: &Address) -> Result<bool, Error> {
        if !self.exists(address)? {
            debug!("{address} does not exist, nothing to remove");
            return Ok(false);
        }
        let operation = Operation::new(REMOVE, address.clone(), Values::empty());
        self.client.execute(&operation)?.assert_success(&operation)?;
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::testing::FakeServer;
    use serde_json::json;

    #[test]
    fn test_operation_model() {
        let operation = Operation::new(
            ADD,
            Address::subsystem("elytron").and("trust-managers", "myTM"),
            Values::empty().and("name", "myTM").and("algorithm", "PKIX"),
        );
        assert_eq!(
            operation.to_model(),
            json!({
                "operation": "add",
                "address": [{"subsystem": "elytron"}, {"trust-managers": "myTM"}],
                "name": "myTM",
                "algorithm": "PKIX",
            })
        );
    }

    #[test]
    fn test_parse_results() {
        let success = ModelNodeResult::from_value(json!({
            "outcome": "success",
            "result": "running",
        }))
        .unwrap();
        assert!(success.is_success());
        assert_eq!(success.string_result(), Some("running"));

        let failed = ModelNodeResult::from_value(json!({
            "outcome": "failed",
            "failure-description": "WFLYCTL0212: Duplicate resource",
            "rolled-back": true,
        }))
        .unwrap();
        assert!(!failed.is_success());
        assert_eq!(
            failed.failure_description().as_deref(),
            Some("WFLYCTL0212: Duplicate resource")
        );

        assert!(ModelNodeResult::from_value(json!({"result": 1})).is_err());
    }

    #[test]
    fn test_assert_success_keeps_description() {
        let operation = Operation::new(ADD, Address::subsystem("elytron"), Values::empty());
        let err = ModelNodeResult::failed("WFLYCTL0212: Duplicate resource")
            .assert_success(&operation)
            .unwrap_err();
        match err {
            Error::OperationFailed {
                operation,
                address,
                description,
            } => {
                assert_eq!(operation, "add");
                assert_eq!(address, "/subsystem=elytron");
                assert_eq!(description, "WFLYCTL0212: Duplicate resource");
            }
            other => unreachable!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_exists_and_remove_if_exists() {
        let present = Address::subsystem("elytron").and("key-store", "present");
        let absent = Address::subsystem("elytron").and("key-store", "absent");
        let server = FakeServer::new().with_resource(present.clone());
        let ops = Operations::new(&server);

        assert!(ops.exists(&present).unwrap());
        assert!(!ops.exists(&absent).unwrap());
        assert!(ops.exists(&Address::root()).unwrap());

        assert!(!ops.remove_if_exists(&absent).unwrap());
        assert!(ops.remove_if_exists(&present).unwrap());
        assert!(!server.has_resource(&present));

        let names = server.operation_names();
        assert_eq!(
            names,
            vec![
                READ_CHILDREN_NAMES,
                READ_CHILDREN_NAMES,
                READ_CHILDREN_NAMES,
                READ_CHILDREN_NAMES,
                REMOVE
            ]
        );
    }

    #[test]
    fn test_add_returns_failed_outcome() {
        let address = Address::subsystem("elytron").and("key-store", "ks");
        let server = FakeServer::new().with_resource(address.clone());
        let ops = Operations::new(&server);

        let result = ops.add(&address, Values::empty()).unwrap();
        assert!(!result.is_success());
        assert!(result.failure_description().unwrap().contains("WFLYCTL0212"));
    }

    #[test]
    fn test_read_attribute() {
        let server = FakeServer::new();
        let ops = Operations::new(&server);
        let result = ops.read_attribute(&Address::root(), "server-state").unwrap();
        assert_eq!(result.string_result(), Some("running"));
    }
}
