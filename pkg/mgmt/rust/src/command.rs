// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::admin::{Administration, AdministrationOptions};
use crate::client::ManagementClient;
use crate::errors::Error;
use crate::offline::OfflineManagementClient;
use log::info;
use std::fmt;

/// Everything an online command needs: the live management connection and
/// the ability to reload the server it points at.
pub struct OnlineCommandContext<'a> {
    pub client: &'a dyn ManagementClient,
    pub admin_options: AdministrationOptions,
}

impl<'a> OnlineCommandContext<'a> {
    pub fn new(client: &'a dyn ManagementClient) -> Self {
        Self {
            client,
            admin_options: AdministrationOptions::default(),
        }
    }

    pub fn with_admin_options(mut self, admin_options: AdministrationOptions) -> Self {
        self.admin_options = admin_options;
        self
    }

    pub fn administration(&self) -> Administration<'a> {
        Administration::new(self.client, self.admin_options)
    }
}

/// Everything an offline command needs: a client able to transform the
/// configuration document.
pub struct OfflineCommandContext<'a> {
    pub client: &'a dyn OfflineManagementClient,
}

impl<'a> OfflineCommandContext<'a> {
    pub fn new(client: &'a dyn OfflineManagementClient) -> Self {
        Self { client }
    }
}

/// A change applied to a live server. Consumes the command: each command
/// instance is applied once.
pub trait OnlineCommand {
    fn apply_online(self, ctx: &OnlineCommandContext<'_>) -> Result<(), Error>;
}

/// A change applied to a configuration file.
pub trait OfflineCommand {
    fn apply_offline(self, ctx: &OfflineCommandContext<'_>) -> Result<(), Error>;
}

/// Where commands are applied. The target, not the command, decides which
/// execution path runs.
pub enum CommandTarget<'a> {
    Online(OnlineCommandContext<'a>),
    Offline(OfflineCommandContext<'a>),
}

impl CommandTarget<'_> {
    pub fn is_online(&self) -> bool {
        matches!(self, CommandTarget::Online(_))
    }

    pub fn apply<C>(&self, command: C) -> Result<(), Error>
    where
        C: OnlineCommand + OfflineCommand + fmt::Display,
    {
        match self {
            CommandTarget::Online(ctx) => {
                info!("applying {command} (online)");
                command.apply_online(ctx)
            }
            CommandTarget::Offline(ctx) => {
                info!("applying {command} (offline)");
                command.apply_offline(ctx)
            }
        }
    }
}
