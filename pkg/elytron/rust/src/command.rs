// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::tls::{
    AddClientSslContext, AddKeyManager, AddKeyStore, AddServerSslContext, AddTrustManager,
};
use std::fmt;
use wildfly_mgmt::{
    Error, OfflineCommand, OfflineCommandContext, OnlineCommand, OnlineCommandContext,
};

/// Any of the Elytron commands, so that a heterogeneous list can be applied
/// in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElytronCommand {
    KeyStore(AddKeyStore),
    KeyManager(AddKeyManager),
    TrustManager(AddTrustManager),
    ServerSslContext(AddServerSslContext),
    ClientSslContext(AddClientSslContext),
}

impl OnlineCommand for ElytronCommand {
    fn apply_online(self, ctx: &OnlineCommandContext<'_>) -> Result<(), Error> {
        match self {
            ElytronCommand::KeyStore(c) => c.apply_online(ctx),
            ElytronCommand::KeyManager(c) => c.apply_online(ctx),
            ElytronCommand::TrustManager(c) => c.apply_online(ctx),
            ElytronCommand::ServerSslContext(c) => c.apply_online(ctx),
            ElytronCommand::ClientSslContext(c) => c.apply_online(ctx),
        }
    }
}

impl OfflineCommand for ElytronCommand {
    fn apply_offline(self, ctx: &OfflineCommandContext<'_>) -> Result<(), Error> {
        match self {
            ElytronCommand::KeyStore(c) => c.apply_offline(ctx),
            ElytronCommand::KeyManager(c) => c.apply_offline(ctx),
            ElytronCommand::TrustManager(c) => c.apply_offline(ctx),
            ElytronCommand::ServerSslContext(c) => c.apply_offline(ctx),
            ElytronCommand::ClientSslContext(c) => c.apply_offline(ctx),
        }
    }
}

impl fmt::Display for ElytronCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElytronCommand::KeyStore(c) => c.fmt(f),
            ElytronCommand::KeyManager(c) => c.fmt(f),
            ElytronCommand::TrustManager(c) => c.fmt(f),
            ElytronCommand::ServerSslContext(c) => c.fmt(f),
            ElytronCommand::ClientSslContext(c) => c.fmt(f),
        }
    }
}

impl From<AddKeyStore> for ElytronCommand {
    fn from(command: AddKeyStore) -> Self {
        ElytronCommand::KeyStore(command)
    }
}

impl From<AddKeyManager> for ElytronCommand {
    fn from(command: AddKeyManager) -> Self {
        ElytronCommand::KeyManager(command)
    }
}

impl From<AddTrustManager> for ElytronCommand {
    fn from(command: AddTrustManager) -> Self {
        ElytronCommand::TrustManager(command)
    }
}

impl From<AddServerSslContext> for ElytronCommand {
    fn from(command: AddServerSslContext) -> Self {
        ElytronCommand::ServerSslContext(command)
    }
}

impl From<AddClientSslContext> for ElytronCommand {
    fn from(command: AddClientSslContext) -> Self {
        ElytronCommand::ClientSslContext(command)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wildfly_mgmt::CommandTarget;
    use wildfly_mgmt::testing::{FakeServer, RecordingOfflineClient};

    fn commands() -> Vec<ElytronCommand> {
        vec![
            AddKeyStore::builder("ks")
                .unwrap()
                .key_store_type("JKS")
                .path("ks.jks")
                .build()
                .unwrap()
                .into(),
            AddKeyManager::builder("km")
                .unwrap()
                .algorithm("SunX509")
                .key_store("ks")
                .build()
                .unwrap()
                .into(),
            AddTrustManager::builder("tm")
                .unwrap()
                .algorithm("PKIX")
                .key_store("ks")
                .build()
                .unwrap()
                .into(),
            AddServerSslContext::builder("ssc")
                .unwrap()
                .key_manager("km")
                .build()
                .unwrap()
                .into(),
            AddClientSslContext::builder("csc")
                .unwrap()
                .build()
                .unwrap()
                .into(),
        ]
    }

    #[test]
    fn test_display_delegates() {
        let names: Vec<String> = commands().iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            vec![
                "add key-store ks",
                "add key-manager km",
                "add trust-manager tm",
                "add server-ssl-context ssc",
                "add client-ssl-context csc",
            ]
        );
    }

    #[test]
    fn test_online_through_target() {
        let server = FakeServer::new();
        let target = CommandTarget::Online(OnlineCommandContext::new(&server));
        for command in commands() {
            target.apply(command).unwrap();
        }
        assert_eq!(server.operation_names(), vec!["add"; 5]);
        let addresses: Vec<String> = server
            .executed()
            .iter()
            .map(|op| op.address().to_string())
            .collect();
        assert_eq!(
            addresses,
            vec![
                "/subsystem=elytron/key-stores=ks",
                "/subsystem=elytron/key-managers=km",
                "/subsystem=elytron/trust-managers=tm",
                "/subsystem=elytron/server-ssl-contexts=ssc",
                "/subsystem=elytron/client-ssl-contexts=csc",
            ]
        );
    }

    #[test]
    fn test_offline_through_target() {
        let client = RecordingOfflineClient::new();
        let target = CommandTarget::Offline(OfflineCommandContext::new(&client));
        for command in commands() {
            target.apply(command).unwrap();
        }
        let templates: Vec<&str> = client
            .transforms()
            .iter()
            .map(|t| t.template_name())
            .collect();
        assert_eq!(
            templates,
            vec![
                "AddKeyStore",
                "AddKeyManager",
                "AddTrustManager",
                "AddServerSslContext",
                "AddClientSslContext",
            ]
        );
    }
}
