// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, Target};
use elytron_commands::{Changeset, ElytronCommand};
use log::info;
use wildfly_mgmt::offline::ConfigurationFile;
use wildfly_mgmt::{
    CommandTarget, HttpManagementClient, OfflineCommandContext, OnlineCommandContext,
};

fn main() -> Result<()> {
    let args = Args::parse();
    simple_logger::init_with_level(args.log_level.into())?;

    let commands = Changeset::load(&args.changeset)?.into_commands()?;
    info!(
        "elytron-apply {}: {} commands from {}",
        env!("CARGO_PKG_VERSION"),
        commands.len(),
        args.changeset.display()
    );

    match args.target {
        Target::Online(online) => {
            let client = HttpManagementClient::new(online.client_options());
            info!("connecting to {}", client.options().endpoint());
            let ctx = OnlineCommandContext::new(&client).with_admin_options(online.admin_options());
            run(&CommandTarget::Online(ctx), commands)
        }
        Target::Offline(offline) => {
            let file =
                ConfigurationFile::new(&offline.config).with_options(offline.offline_options());
            run(&CommandTarget::Offline(OfflineCommandContext::new(&file)), commands)
        }
    }
}

/// Applies the commands in order, stopping at the first failure.
fn run(target: &CommandTarget<'_>, commands: Vec<ElytronCommand>) -> Result<()> {
    let total = commands.len();
    for (i, command) in commands.into_iter().enumerate() {
        let description = command.to_string();
        target
            .apply(command)
            .with_context(|| format!("failed to {description} ({} of {total})", i + 1))?;
    }
    info!("applied {total} commands");
    Ok(())
}
