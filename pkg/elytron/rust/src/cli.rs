// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use wildfly_mgmt::{AdministrationOptions, ClientOptions};
use wildfly_mgmt::offline::OfflineOptions;

/// Apply Elytron TLS commands to a WildFly server or configuration file
#[derive(Parser, Debug)]
#[command(name = "elytron-apply")]
#[command(about = "Apply an Elytron TLS changeset to WildFly")]
pub struct Args {
    /// YAML changeset listing the commands to apply
    #[arg(long)]
    pub changeset: PathBuf,

    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub target: Target,
}

#[derive(Subcommand, Debug)]
pub enum Target {
    /// Apply to a running server through its HTTP management interface
    Online(OnlineArgs),
    /// Edit a configuration file in place
    Offline(OfflineArgs),
}

#[derive(clap::Args, Debug)]
pub struct OnlineArgs {
    #[arg(long, default_value = "localhost")]
    pub host: String,

    #[arg(long, default_value = "9990")]
    pub port: u16,

    /// Management user
    #[arg(long)]
    pub user: Option<String>,

    #[arg(long, env = "WILDFLY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Timeout of each management request
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    /// How long to wait for the server to come back after a reload
    #[arg(long, default_value = "60")]
    pub reload_timeout_secs: u64,
}

impl OnlineArgs {
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            host: self.host.clone(),
            port: self.port,
            username: self.user.clone(),
            password: self.password.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn admin_options(&self) -> AdministrationOptions {
        AdministrationOptions {
            timeout: Duration::from_secs(self.reload_timeout_secs),
            ..AdministrationOptions::default()
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct OfflineArgs {
    /// Server configuration file, e.g. standalone.xml
    #[arg(long)]
    pub config: PathBuf,

    /// Profile holding the subsystems of a domain configuration
    #[arg(long, default_value = "default")]
    pub profile: String,
}

impl OfflineArgs {
    pub fn offline_options(&self) -> OfflineOptions {
        OfflineOptions {
            profile: self.profile.clone(),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}
