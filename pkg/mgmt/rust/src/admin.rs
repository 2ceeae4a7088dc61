// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::address::Address;
use crate::client::ManagementClient;
use crate::errors::Error;
use crate::operations::{Operation, READ_ATTRIBUTE};
use crate::values::Values;
use log::{debug, info};
use std::thread;
use std::time::{Duration, Instant};

const SERVER_STATE: &str = "server-state";
const STATE_RUNNING: &str = "running";
const STATE_RELOAD_REQUIRED: &str = "reload-required";
const RELOAD: &str = "reload";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdministrationOptions {
    /// How long to wait for the server to come back after a reload.
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for AdministrationOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Server lifecycle operations on a standalone server.
pub struct Administration<'a> {
    client: &'a dyn ManagementClient,
    options: AdministrationOptions,
}

impl<'a> Administration<'a> {
    pub fn new(client: &'a dyn ManagementClient, options: AdministrationOptions) -> Self {
        Self { client, options }
    }

    fn server_state(&self) -> Result<String, Error> {
        let operation = Operation::new(
            READ_ATTRIBUTE,
            Address::root(),
            Values::empty().and("name", SERVER_STATE),
        );
        let result = self.client.execute(&operation)?.assert_success(&operation)?;
        result
            .string_result()
            .map(str::to_string)
            .ok_or_else(|| Error::InvalidResponse(format!("{SERVER_STATE} is not a string")))
    }

    pub fn is_reload_required(&self) -> Result<bool, Error> {
        Ok(self.server_state()? == STATE_RELOAD_REQUIRED)
    }

    /// Reloads the server and blocks until it reports `running` again.
    pub fn reload(&self) -> Result<(), Error> {
        info!("reloading server");
        let operation = Operation::new(RELOAD, Address::root(), Values::empty());
        self.client.execute(&operation)?.assert_success(&operation)?;
        self.wait_until_running()
    }

    /// Reloads only when the server says a reload is required. Returns
    /// whether a reload happened.
    pub fn reload_if_required(&self) -> Result<bool, Error> {
        if !self.is_reload_required()? {
            debug!("server does not require a reload");
            return Ok(false);
        }
        self.reload()?;
        Ok(true)
    }

    fn wait_until_running(&self) -> Result<(), Error> {
        let deadline = Instant::now() + self.options.timeout;
        loop {
            thread::sleep(self.options.poll_interval);
            // the interface drops connections while the server restarts
            match self.server_state() {
                Ok(state) if state == STATE_RUNNING => {
                    info!("server is running");
                    return Ok(());
                }
                Ok(state) => debug!("server state is {state}, waiting"),
                Err(e) => debug!("server not reachable yet: {e}"),
            }
            if Instant::now() >= deadline {
                return Err(Error::Timeout {
                    timeout: self.options.timeout,
                    state: STATE_RUNNING.to_string(),
                });
            }
        }
    }
}
