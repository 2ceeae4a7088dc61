// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Commands adding resources under the Elytron subsystem's `tls` element.
//!
//! Every command follows the same two paths. Online, it issues an `add` on
//! `/subsystem=elytron/<type>=<name>`, preceded by a conditional remove and a
//! reload when replacing. Offline, it binds its fields as named parameters of
//! a template that edits `tls/<collection>` in the subsystem element.

mod client_ssl_context;
mod key_manager;
mod key_store;
mod server_ssl_context;
mod trust_manager;

pub use client_ssl_context::{AddClientSslContext, AddClientSslContextBuilder};
pub use key_manager::{AddKeyManager, AddKeyManagerBuilder};
pub use key_store::{AddKeyStore, AddKeyStoreBuilder};
pub use server_ssl_context::{AddServerSslContext, AddServerSslContextBuilder};
pub use trust_manager::{AddTrustManager, AddTrustManagerBuilder};

use log::debug;
use serde_json::{Value, json};
use wildfly_mgmt::offline::{Element, PathStep, Scope, Subtree, TemplateError};
use wildfly_mgmt::operations::{ADD, Operation};
use wildfly_mgmt::{Address, Error, OnlineCommandContext, Operations, Values};

pub(crate) const SUBSYSTEM: &str = "elytron";
/// Name the subsystem subtree is bound under in every transform.
pub(crate) const SUBTREE_NAME: &str = "elytronSubsystem";

/// Children of the subsystem element, in schema order.
const SUBSYSTEM_ORDER: &[&str] = &[
    "security-properties",
    "providers",
    "audit-logging",
    "security-domains",
    "security-realms",
    "credential-security-factories",
    "mappers",
    "http",
    "sasl",
    "tls",
    "credential-stores",
    "dir-contexts",
    "jaspi",
    "permission-sets",
];

/// Collections inside `tls`, in schema order.
const TLS_ORDER: &[&str] = &[
    "key-stores",
    "key-managers",
    "trust-managers",
    "server-ssl-contexts",
    "client-ssl-contexts",
    "certificate-authority-accounts",
    "server-ssl-sni-contexts",
];

/// `/subsystem=elytron/<collection>=<name>`
pub(crate) fn address(collection: &str, name: &str) -> Address {
    Address::subsystem(SUBSYSTEM).and(collection, name)
}

pub(crate) fn subtree() -> Subtree {
    Subtree::subsystem(SUBSYSTEM)
}

/// Adds the resource. When replacing, any existing resource is removed and
/// the server reloaded if it asks for it, both before the add is sent.
pub(crate) fn add_online(
    ctx: &OnlineCommandContext<'_>,
    address: Address,
    params: Values,
    replace_existing: bool,
) -> Result<(), Error> {
    if replace_existing {
        if Operations::new(ctx.client).remove_if_exists(&address)? {
            debug!("removed existing {address}");
        }
        ctx.administration().reload_if_required()?;
    }

    let operation = Operation::new(ADD, address, params);
    ctx.client
        .execute(&operation)?
        .assert_success(&operation)?;
    debug!("added {}", operation.address());
    Ok(())
}

/// Adds `element` to `tls/<collection>`.
pub(crate) fn add_offline(
    scope: &mut Scope<'_>,
    collection: &str,
    element: Element,
    replace_existing: bool,
) -> Result<(), TemplateError> {
    let path = [
        PathStep {
            name: "tls",
            order: SUBSYSTEM_ORDER,
        },
        PathStep {
            name: collection,
            order: TLS_ORDER,
        },
    ];
    scope.add_named(&path, element, replace_existing)
}

/// `credential-reference` holding a clear-text password, in model form.
pub(crate) fn clear_text(password: Option<&str>) -> Option<Value> {
    password
        .filter(|p| !p.is_empty())
        .map(|p| json!({ "clear-text": p }))
}

/// `credential-reference` holding a clear-text password, in XML form.
pub(crate) fn credential_reference(password: Option<String>) -> Option<Element> {
    password.map(|p| Element::new("credential-reference").with_attribute("clear-text", p))
}

/// List attribute as written in XML: space separated, absent when empty.
pub(crate) fn joined(values: &[String]) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    Some(values.join(" "))
}

pub(crate) fn with_child(element: Element, child: Option<Element>) -> Element {
    match child {
        Some(child) => element.with_child(child),
        None => element,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod testutil {
    use std::time::Duration;
    use wildfly_mgmt::AdministrationOptions;
    use wildfly_mgmt::offline::{Document, Element, OfflineOptions, XmlTransform};
    use wildfly_mgmt::testing::RecordingOfflineClient;
    use wildfly_mgmt::{OfflineCommand, OfflineCommandContext};

    pub(crate) const STANDALONE: &str = include_str!("../testdata/standalone.xml");

    pub(crate) fn fast_admin() -> AdministrationOptions {
        AdministrationOptions {
            timeout: Duration::from_secs(1),
            poll_interval: Duration::from_millis(1),
        }
    }

    /// Runs the command's offline path and returns the transform it produced.
    pub(crate) fn recorded_transform(command: impl OfflineCommand) -> XmlTransform {
        let client = RecordingOfflineClient::new();
        command
            .apply_offline(&OfflineCommandContext::new(&client))
            .unwrap();
        let mut transforms = client.transforms();
        assert_eq!(transforms.len(), 1);
        transforms.remove(0)
    }

    /// Applies the command's transform to a copy of the standalone fixture.
    pub(crate) fn apply_to_fixture(
        document: &mut Document,
        command: impl OfflineCommand,
    ) -> Result<(), wildfly_mgmt::Error> {
        recorded_transform(command).apply_to(document, &OfflineOptions::default())
    }

    pub(crate) fn fixture() -> Document {
        Document::parse(STANDALONE).unwrap()
    }

    pub(crate) fn tls(document: &Document) -> &Element {
        document
            .root()
            .descendant(&["profile"])
            .and_then(|profile| {
                profile
                    .children()
                    .find(|e| e.attribute("xmlns") == Some("urn:wildfly:elytron:18.0"))
            })
            .and_then(|subsystem| subsystem.child("tls"))
            .unwrap()
    }

    /// Element of `tls/<collection>` with the given name.
    pub(crate) fn find<'a>(
        document: &'a Document,
        collection: &str,
        name: &str,
    ) -> Option<&'a Element> {
        tls(document)
            .child(collection)?
            .children()
            .find(|e| e.attribute("name") == Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_text() {
        assert_eq!(
            clear_text(Some("secret")),
            Some(json!({"clear-text": "secret"}))
        );
        assert_eq!(clear_text(Some("")), None);
        assert_eq!(clear_text(None), None);
    }

    #[test]
    fn test_joined() {
        assert_eq!(joined(&[]), None);
        assert_eq!(
            joined(&["TLSv1.2".to_string(), "TLSv1.3".to_string()]),
            Some("TLSv1.2 TLSv1.3".to_string())
        );
    }

    #[test]
    fn test_address() {
        assert_eq!(
            address("key-stores", "ks").to_string(),
            "/subsystem=elytron/key-stores=ks"
        );
    }
}
