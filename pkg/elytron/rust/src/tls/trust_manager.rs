// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::errors::{BuildError, named, required};
use crate::tls;
use std::fmt;
use wildfly_mgmt::offline::{Element, Parameters, Scope, Template, TemplateError, XmlTransform};
use wildfly_mgmt::{
    Error, OfflineCommand, OfflineCommandContext, OnlineCommand, OnlineCommandContext, Values,
};

const RESOURCE: &str = "trust-manager";
/// Address type and XML collection of the resource.
const COLLECTION: &str = "trust-managers";

/// Adds a trust manager to the Elytron subsystem.
///
/// ```ignore
/// let command = AddTrustManager::builder("myTM")?
///     .algorithm("PKIX")
///     .key_store("myKS")
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTrustManager {
    name: String,
    algorithm: String,
    key_store: Option<String>,
    provider: Option<String>,
    provider_loader: Option<String>,
    replace_existing: bool,
}

impl AddTrustManager {
    pub fn builder(name: impl Into<String>) -> Result<AddTrustManagerBuilder, BuildError> {
        Ok(AddTrustManagerBuilder {
            name: named(name.into(), RESOURCE)?,
            algorithm: None,
            key_store: None,
            provider: None,
            provider_loader: None,
            replace_existing: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn key_store(&self) -> Option<&str> {
        self.key_store.as_deref()
    }

    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    pub fn provider_loader(&self) -> Option<&str> {
        self.provider_loader.as_deref()
    }

    pub fn replace_existing(&self) -> bool {
        self.replace_existing
    }
}

#[derive(Debug, Clone)]
pub struct AddTrustManagerBuilder {
    name: String,
    algorithm: Option<String>,
    key_store: Option<String>,
    provider: Option<String>,
    provider_loader: Option<String>,
    replace_existing: bool,
}

impl AddTrustManagerBuilder {
    /// Trust manager factory algorithm, e.g. `PKIX`. Required.
    pub fn algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    /// Key store holding the trusted certificates.
    pub fn key_store(mut self, key_store: impl Into<String>) -> Self {
        self.key_store = Some(key_store.into());
        self
    }

    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn provider_loader(mut self, provider_loader: impl Into<String>) -> Self {
        self.provider_loader = Some(provider_loader.into());
        self
    }

    /// Replace a trust manager of the same name instead of failing.
    pub fn replace_existing(mut self) -> Self {
        self.replace_existing = true;
        self
    }

    pub fn build(self) -> Result<AddTrustManager, BuildError> {
        Ok(AddTrustManager {
            algorithm: required(self.algorithm, RESOURCE, "algorithm")?,
            name: self.name,
            key_store: self.key_store,
            provider: self.provider,
            provider_loader: self.provider_loader,
            replace_existing: self.replace_existing,
        })
    }
}

impl OnlineCommand for AddTrustManager {
    fn apply_online(self, ctx: &OnlineCommandContext<'_>) -> Result<(), Error> {
        let address = tls::address(COLLECTION, &self.name);
        let params = Values::empty()
            .and("name", self.name)
            .and("algorithm", self.algorithm)
            .and_optional("key-store", self.key_store)
            .and_optional("provider", self.provider)
            .and_optional("provider-loader", self.provider_loader);
        tls::add_online(ctx, address, params, self.replace_existing)
    }
}

impl OfflineCommand for AddTrustManager {
    fn apply_offline(self, ctx: &OfflineCommandContext<'_>) -> Result<(), Error> {
        ctx.client.apply(
            &XmlTransform::of(&ADD_TRUST_MANAGER)
                .subtree(tls::SUBTREE_NAME, tls::subtree())
                .parameter("atrName", self.name)
                .parameter("atrAlgorithm", self.algorithm)
                .parameter("atrKeyStore", self.key_store)
                .parameter("atrProvider", self.provider)
                .parameter("atrProviderLoader", self.provider_loader)
                .parameter("atrReplaceExisting", self.replace_existing)
                .build(),
        )
    }
}

impl fmt::Display for AddTrustManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "add {RESOURCE} {}", self.name)
    }
}

static ADD_TRUST_MANAGER: Template = Template {
    name: "AddTrustManager",
    apply: add_trust_manager,
};

fn add_trust_manager(scope: &mut Scope<'_>, params: &Parameters) -> Result<(), TemplateError> {
    let element = Element::new(RESOURCE)
        .with_attribute("name", params.required("atrName")?)
        .with_attribute("algorithm", params.required("atrAlgorithm")?)
        .with_optional_attribute("key-store", params.attribute("atrKeyStore")?)
        .with_optional_attribute("provider", params.attribute("atrProvider")?)
        .with_optional_attribute("provider-loader", params.attribute("atrProviderLoader")?);
    tls::add_offline(
        scope,
        COLLECTION,
        element,
        params.flag("atrReplaceExisting")?,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tls::testutil::{
        STANDALONE, apply_to_fixture, fast_admin, find, fixture, recorded_transform,
    };
    use wildfly_mgmt::offline::{Param, Subtree};
    use wildfly_mgmt::testing::FakeServer;

    fn my_tm() -> AddTrustManager {
        AddTrustManager::builder("myTM")
            .unwrap()
            .algorithm("PKIX")
            .key_store("myKS")
            .build()
            .unwrap()
    }

    #[test]
    fn test_build() {
        let command = my_tm();
        assert_eq!(command.name(), "myTM");
        assert_eq!(command.algorithm(), "PKIX");
        assert_eq!(command.key_store(), Some("myKS"));
        assert_eq!(command.provider(), None);
        assert_eq!(command.provider_loader(), None);
        assert!(!command.replace_existing());
    }

    #[test]
    fn test_build_errors() {
        let err = AddTrustManager::builder("myTM").unwrap().build().unwrap_err();
        assert!(err.to_string().contains("algorithm"), "got {err}");

        let err = AddTrustManager::builder("myTM")
            .unwrap()
            .algorithm("")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::MissingField {
                resource: "trust-manager",
                field: "algorithm"
            }
        );

        assert_eq!(
            AddTrustManager::builder("").unwrap_err(),
            BuildError::EmptyName {
                resource: "trust-manager"
            }
        );
    }

    #[test]
    fn test_online_add() {
        let server = FakeServer::new();
        my_tm()
            .apply_online(&OnlineCommandContext::new(&server))
            .unwrap();

        assert_eq!(server.operation_names(), vec!["add"]);
        let executed = server.executed();
        assert_eq!(
            executed.first().map(|op| op.address().to_string()),
            Some("/subsystem=elytron/trust-managers=myTM".to_string())
        );
        let address = tls::address(COLLECTION, "myTM");
        let params = server.resource(&address).unwrap();
        let keys: Vec<&str> = params.keys().collect();
        assert_eq!(keys, vec!["algorithm", "key-store", "name"]);
        assert_eq!(params.get("algorithm").and_then(|v| v.as_str()), Some("PKIX"));
        assert_eq!(params.get("key-store").and_then(|v| v.as_str()), Some("myKS"));
    }

    #[test]
    fn test_online_add_existing_fails() {
        let address = tls::address(COLLECTION, "myTM");
        let server = FakeServer::new().with_resource(address);
        let err = my_tm()
            .apply_online(&OnlineCommandContext::new(&server))
            .unwrap_err();

        assert!(err.to_string().contains("WFLYCTL0212"), "got {err}");
        assert_eq!(server.operation_names(), vec!["add"]);
    }

    #[test]
    fn test_online_replace_existing() {
        let address = tls::address(COLLECTION, "myTM");
        let server = FakeServer::new().with_resource(address.clone());
        let command = AddTrustManager::builder("myTM")
            .unwrap()
            .algorithm("SunX509")
            .replace_existing()
            .build()
            .unwrap();
        command
            .apply_online(&OnlineCommandContext::new(&server).with_admin_options(fast_admin()))
            .unwrap();

        assert_eq!(
            server.operation_names(),
            vec![
                "read-children-names",
                "remove",
                "read-attribute",
                "reload",
                "read-attribute",
                "add"
            ]
        );
        let params = server.resource(&address).unwrap();
        assert_eq!(params.get("algorithm").and_then(|v| v.as_str()), Some("SunX509"));
        assert!(!params.contains("key-store"));
        assert_eq!(server.server_state(), "running");
    }

    #[test]
    fn test_online_replace_missing() {
        let server = FakeServer::new();
        let command = AddTrustManager::builder("myTM")
            .unwrap()
            .algorithm("PKIX")
            .replace_existing()
            .build()
            .unwrap();
        command
            .apply_online(&OnlineCommandContext::new(&server).with_admin_options(fast_admin()))
            .unwrap();

        assert_eq!(
            server.operation_names(),
            vec!["read-children-names", "read-attribute", "add"]
        );
    }

    #[test]
    fn test_offline_parameters() {
        let transform = recorded_transform(my_tm());
        assert_eq!(transform.template_name(), "AddTrustManager");
        assert_eq!(transform.subtree(), &Subtree::subsystem("elytron"));
        assert_eq!(transform.subtree_name(), "elytronSubsystem");

        let params = transform.parameters();
        let tests = vec![
            ("atrName", Param::String("myTM".to_string())),
            ("atrAlgorithm", Param::String("PKIX".to_string())),
            ("atrKeyStore", Param::String("myKS".to_string())),
            ("atrProvider", Param::Null),
            ("atrProviderLoader", Param::Null),
            ("atrReplaceExisting", Param::Bool(false)),
        ];
        assert_eq!(params.len(), tests.len());
        for (key, expected) in tests {
            assert_eq!(params.get(key), Some(&expected), "parameter {key}");
        }
    }

    #[test]
    fn test_offline_inserts_in_schema_order() {
        let mut document = fixture();
        apply_to_fixture(&mut document, my_tm()).unwrap();

        let expected = STANDALONE.replace(
            "                <server-ssl-contexts>",
            "                <trust-managers>
                    <trust-manager name=\"myTM\" algorithm=\"PKIX\" key-store=\"myKS\"/>
                </trust-managers>
                <server-ssl-contexts>",
        );
        assert_eq!(document.to_xml().unwrap(), expected);
    }

    #[test]
    fn test_offline_duplicate_and_replace() {
        let mut document = fixture();
        apply_to_fixture(&mut document, my_tm()).unwrap();

        let err = apply_to_fixture(&mut document, my_tm()).unwrap_err();
        assert!(
            err.to_string()
                .contains("trust-manager with name myTM already exists in configuration"),
            "got {err}"
        );

        let replacement = AddTrustManager::builder("myTM")
            .unwrap()
            .algorithm("SunX509")
            .provider("openssl")
            .replace_existing()
            .build()
            .unwrap();
        apply_to_fixture(&mut document, replacement).unwrap();

        let element = find(&document, "trust-managers", "myTM").unwrap();
        assert_eq!(element.attribute("algorithm"), Some("SunX509"));
        assert_eq!(element.attribute("key-store"), None);
        assert_eq!(element.attribute("provider"), Some("openssl"));
        let count = crate::tls::testutil::tls(&document)
            .child("trust-managers")
            .unwrap()
            .children()
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(my_tm().to_string(), "add trust-manager myTM");
    }
}
