// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! YAML description of a list of Elytron commands.
//!
//! ```yaml
//! commands:
//!   - key-store:
//!       name: httpsKS
//!       type: PKCS12
//!       path: server.p12
//!       relative-to: jboss.server.config.dir
//!   - trust-manager:
//!       name: httpsTM
//!       algorithm: PKIX
//!       key-store: httpsKS
//!       replace-existing: true
//! ```

use crate::command::ElytronCommand;
use crate::errors::BuildError;
use crate::tls::{
    AddClientSslContext, AddKeyManager, AddKeyStore, AddServerSslContext, AddTrustManager,
};
use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Changeset {
    /// Entries are single-key maps (`- key-store: {...}`), not YAML tags.
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub commands: Vec<CommandSpec>,
}

/// One entry of a changeset, keyed by the resource it adds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandSpec {
    KeyStore(KeyStoreSpec),
    KeyManager(KeyManagerSpec),
    TrustManager(TrustManagerSpec),
    ServerSslContext(ServerSslContextSpec),
    ClientSslContext(ClientSslContextSpec),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct KeyStoreSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub key_store_type: Option<String>,
    pub path: Option<String>,
    pub relative_to: Option<String>,
    pub required: Option<bool>,
    pub password: Option<String>,
    pub provider_name: Option<String>,
    pub providers: Option<String>,
    pub alias_filter: Option<String>,
    #[serde(default)]
    pub replace_existing: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct KeyManagerSpec {
    pub name: String,
    pub algorithm: Option<String>,
    pub key_store: Option<String>,
    pub password: Option<String>,
    pub provider_name: Option<String>,
    pub providers: Option<String>,
    pub alias_filter: Option<String>,
    #[serde(default)]
    pub replace_existing: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TrustManagerSpec {
    pub name: String,
    pub algorithm: Option<String>,
    pub key_store: Option<String>,
    pub provider: Option<String>,
    pub provider_loader: Option<String>,
    #[serde(default)]
    pub replace_existing: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ServerSslContextSpec {
    pub name: String,
    pub key_manager: Option<String>,
    pub trust_manager: Option<String>,
    #[serde(default)]
    pub protocols: Vec<String>,
    pub cipher_suite_filter: Option<String>,
    pub need_client_auth: Option<bool>,
    pub want_client_auth: Option<bool>,
    pub authentication_optional: Option<bool>,
    pub maximum_session_cache_size: Option<i64>,
    pub session_timeout: Option<i64>,
    pub provider_name: Option<String>,
    pub providers: Option<String>,
    pub security_domain: Option<String>,
    #[serde(default)]
    pub replace_existing: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ClientSslContextSpec {
    pub name: String,
    pub key_manager: Option<String>,
    pub trust_manager: Option<String>,
    #[serde(default)]
    pub protocols: Vec<String>,
    pub cipher_suite_filter: Option<String>,
    pub provider_name: Option<String>,
    pub providers: Option<String>,
    #[serde(default)]
    pub replace_existing: bool,
}

/// Applies `set` only when the value is present.
fn with<B, T>(builder: B, value: Option<T>, set: impl FnOnce(B, T) -> B) -> B {
    match value {
        Some(value) => set(builder, value),
        None => builder,
    }
}

fn replacing<B>(builder: B, replace_existing: bool, set: impl FnOnce(B) -> B) -> B {
    if replace_existing { set(builder) } else { builder }
}

impl CommandSpec {
    /// Runs the command's builder over the entry's fields.
    pub fn build(self) -> Result<ElytronCommand, BuildError> {
        let command = match self {
            CommandSpec::KeyStore(s) => {
                let b = AddKeyStore::builder(s.name)?;
                let b = with(b, s.key_store_type, |b, v| b.key_store_type(v));
                let b = with(b, s.path, |b, v| b.path(v));
                let b = with(b, s.relative_to, |b, v| b.relative_to(v));
                let b = with(b, s.required, |b, v| b.required(v));
                let b = with(b, s.password, |b, v| b.password(v));
                let b = with(b, s.provider_name, |b, v| b.provider_name(v));
                let b = with(b, s.providers, |b, v| b.providers(v));
                let b = with(b, s.alias_filter, |b, v| b.alias_filter(v));
                replacing(b, s.replace_existing, |b| b.replace_existing())
                    .build()?
                    .into()
            }
            CommandSpec::KeyManager(s) => {
                let b = AddKeyManager::builder(s.name)?;
                let b = with(b, s.algorithm, |b, v| b.algorithm(v));
                let b = with(b, s.key_store, |b, v| b.key_store(v));
                let b = with(b, s.password, |b, v| b.password(v));
                let b = with(b, s.provider_name, |b, v| b.provider_name(v));
                let b = with(b, s.providers, |b, v| b.providers(v));
                let b = with(b, s.alias_filter, |b, v| b.alias_filter(v));
                replacing(b, s.replace_existing, |b| b.replace_existing())
                    .build()?
                    .into()
            }
            CommandSpec::TrustManager(s) => {
                let b = AddTrustManager::builder(s.name)?;
                let b = with(b, s.algorithm, |b, v| b.algorithm(v));
                let b = with(b, s.key_store, |b, v| b.key_store(v));
                let b = with(b, s.provider, |b, v| b.provider(v));
                let b = with(b, s.provider_loader, |b, v| b.provider_loader(v));
                replacing(b, s.replace_existing, |b| b.replace_existing())
                    .build()?
                    .into()
            }
            CommandSpec::ServerSslContext(s) => {
                let b = AddServerSslContext::builder(s.name)?.protocols(s.protocols);
                let b = with(b, s.key_manager, |b, v| b.key_manager(v));
                let b = with(b, s.trust_manager, |b, v| b.trust_manager(v));
                let b = with(b, s.cipher_suite_filter, |b, v| b.cipher_suite_filter(v));
                let b = with(b, s.need_client_auth, |b, v| b.need_client_auth(v));
                let b = with(b, s.want_client_auth, |b, v| b.want_client_auth(v));
                let b = with(b, s.authentication_optional, |b, v| {
                    b.authentication_optional(v)
                });
                let b = with(b, s.maximum_session_cache_size, |b, v| {
                    b.maximum_session_cache_size(v)
                });
                let b = with(b, s.session_timeout, |b, v| b.session_timeout(v));
                let b = with(b, s.provider_name, |b, v| b.provider_name(v));
                let b = with(b, s.providers, |b, v| b.providers(v));
                let b = with(b, s.security_domain, |b, v| b.security_domain(v));
                replacing(b, s.replace_existing, |b| b.replace_existing())
                    .build()?
                    .into()
            }
            CommandSpec::ClientSslContext(s) => {
                let b = AddClientSslContext::builder(s.name)?.protocols(s.protocols);
                let b = with(b, s.key_manager, |b, v| b.key_manager(v));
                let b = with(b, s.trust_manager, |b, v| b.trust_manager(v));
                let b = with(b, s.cipher_suite_filter, |b, v| b.cipher_suite_filter(v));
                let b = with(b, s.provider_name, |b, v| b.provider_name(v));
                let b = with(b, s.providers, |b, v| b.providers(v));
                replacing(b, s.replace_existing, |b| b.replace_existing())
                    .build()?
                    .into()
            }
        };
        Ok(command)
    }
}

impl Changeset {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read changeset: {}", path.display()))?;
        let changeset = Self::parse(&contents)
            .with_context(|| format!("failed to parse changeset: {}", path.display()))?;
        debug!(
            "loaded {} commands from {}",
            changeset.commands.len(),
            path.display()
        );
        Ok(changeset)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Builds every entry, in order. Entries are numbered from 1 in errors.
    pub fn into_commands(self) -> Result<Vec<ElytronCommand>> {
        self.commands
            .into_iter()
            .enumerate()
            .map(|(i, spec)| {
                spec.build()
                    .with_context(|| format!("invalid changeset entry {}", i + 1))
            })
            .collect()
    }
}
