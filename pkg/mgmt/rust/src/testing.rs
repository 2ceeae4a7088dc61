// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! In-process test doubles for the management clients.

use crate::address::Address;
use crate::client::ManagementClient;
use crate::errors::Error;
use crate::offline::{OfflineManagementClient, XmlTransform};
use crate::operations::{
    ADD, ModelNodeResult, Operation, READ_ATTRIBUTE, READ_CHILDREN_NAMES, REMOVE,
};
use crate::values::Values;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;

const RUNNING: &str = "running";
const RELOAD_REQUIRED: &str = "reload-required";

struct ServerModel {
    resources: BTreeMap<Address, Values>,
    state: String,
    stuck_after_reload: bool,
    log: Vec<Operation>,
}

/// A management model held in memory. Answers the operations the commands
/// use with the outcomes a standalone server would give; removing a
/// resource puts the server in `reload-required`.
pub struct FakeServer {
    model: RefCell<ServerModel>,
}

impl Default for FakeServer {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeServer {
    pub fn new() -> Self {
        Self {
            model: RefCell::new(ServerModel {
                resources: BTreeMap::new(),
                state: RUNNING.to_string(),
                stuck_after_reload: false,
                log: Vec::new(),
            }),
        }
    }

    pub fn with_resource(self, address: Address) -> Self {
        self.model
            .borrow_mut()
            .resources
            .insert(address, Values::empty());
        self
    }

    /// The server never reports `running` again after a reload.
    pub fn stuck_after_reload(self) -> Self {
        self.model.borrow_mut().stuck_after_reload = true;
        self
    }

    pub fn require_reload(&self) {
        self.model.borrow_mut().state = RELOAD_REQUIRED.to_string();
    }

    pub fn server_state(&self) -> String {
        self.model.borrow().state.clone()
    }

    pub fn has_resource(&self, address: &Address) -> bool {
        self.model.borrow().resources.contains_key(address)
    }

    /// Parameters the resource was added with.
    pub fn resource(&self, address: &Address) -> Option<Values> {
        self.model.borrow().resources.get(address).cloned()
    }

    pub fn executed(&self) -> Vec<Operation> {
        self.model.borrow().log.clone()
    }

    pub fn operation_names(&self) -> Vec<String> {
        self.model
            .borrow()
            .log
            .iter()
            .map(|op| op.name().to_string())
            .collect()
    }
}

impl ServerModel {
    fn handle(&mut self, operation: &Operation) -> ModelNodeResult {
        let address = operation.address();
        match operation.name() {
            ADD => {
                if self.resources.contains_key(address) {
                    return ModelNodeResult::failed(format!(
                        "WFLYCTL0212: Duplicate resource {address}"
                    ));
                }
                self.resources
                    .insert(address.clone(), operation.params().clone());
                ModelNodeResult::success(None)
            }
            REMOVE => {
                if self.resources.remove(address).is_none() {
                    return ModelNodeResult::failed(format!(
                        "WFLYCTL0216: Management resource '{address}' not found"
                    ));
                }
                self.state = RELOAD_REQUIRED.to_string();
                ModelNodeResult::success(None)
            }
            READ_CHILDREN_NAMES => {
                let Some(Value::String(child_type)) = operation.params().get("child-type") else {
                    return ModelNodeResult::failed("WFLYCTL0155: child-type may not be null");
                };
                let names = self
                    .resources
                    .keys()
                    .filter(|candidate| candidate.parent().as_ref() == Some(address))
                    .filter_map(|candidate| candidate.last())
                    .filter(|(kind, _)| *kind == child_type.as_str())
                    .map(|(_, name)| Value::String(name.to_string()))
                    .collect();
                ModelNodeResult::success(Some(Value::Array(names)))
            }
            READ_ATTRIBUTE => match operation.params().get("name").and_then(Value::as_str) {
                Some("server-state") if address.is_root() => {
                    ModelNodeResult::success(Some(Value::String(self.state.clone())))
                }
                Some(name) => ModelNodeResult::failed(format!(
                    "WFLYCTL0201: Unknown attribute '{name}'"
                )),
                None => ModelNodeResult::failed("WFLYCTL0155: name may not be null"),
            },
            "reload" => {
                self.state = if self.stuck_after_reload {
                    "starting".to_string()
                } else {
                    RUNNING.to_string()
                };
                ModelNodeResult::success(None)
            }
            other => ModelNodeResult::failed(format!(
                "WFLYCTL0031: No operation named '{other}' exists at address {address}"
            )),
        }
    }
}

impl ManagementClient for FakeServer {
    fn execute(&self, operation: &Operation) -> Result<ModelNodeResult, Error> {
        let mut model = self.model.borrow_mut();
        model.log.push(operation.clone());
        Ok(model.handle(operation))
    }
}

/// Records transforms instead of applying them.
#[derive(Default)]
pub struct RecordingOfflineClient {
    transforms: RefCell<Vec<XmlTransform>>,
}

impl RecordingOfflineClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transforms(&self) -> Vec<XmlTransform> {
        self.transforms.borrow().clone()
    }
}

impl OfflineManagementClient for RecordingOfflineClient {
    fn apply(&self, transform: &XmlTransform) -> Result<(), Error> {
        self.transforms.borrow_mut().push(transform.clone());
        Ok(())
    }
}
