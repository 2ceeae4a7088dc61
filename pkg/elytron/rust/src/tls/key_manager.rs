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

const RESOURCE: &str = "key-manager";
/// Address type and XML collection of the resource.
const COLLECTION: &str = "key-managers";

/// Adds a key manager backed by a key store of the Elytron subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddKeyManager {
    name: String,
    algorithm: String,
    key_store: String,
    password: Option<String>,
    provider_name: Option<String>,
    providers: Option<String>,
    alias_filter: Option<String>,
    replace_existing: bool,
}

impl AddKeyManager {
    pub fn builder(name: impl Into<String>) -> Result<AddKeyManagerBuilder, BuildError> {
        Ok(AddKeyManagerBuilder {
            name: named(name.into(), RESOURCE)?,
            algorithm: None,
            key_store: None,
            password: None,
            provider_name: None,
            providers: None,
            alias_filter: None,
            replace_existing: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn key_store(&self) -> &str {
        &self.key_store
    }
}

#[derive(Debug, Clone)]
pub struct AddKeyManagerBuilder {
    name: String,
    algorithm: Option<String>,
    key_store: Option<String>,
    password: Option<String>,
    provider_name: Option<String>,
    providers: Option<String>,
    alias_filter: Option<String>,
    replace_existing: bool,
}

impl AddKeyManagerBuilder {
    /// Key manager factory algorithm, e.g. `SunX509`. Required.
    pub fn algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    /// Key store holding the keys. Required.
    pub fn key_store(mut self, key_store: impl Into<String>) -> Self {
        self.key_store = Some(key_store.into());
        self
    }

    /// Clear-text password of the keys.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn provider_name(mut self, provider_name: impl Into<String>) -> Self {
        self.provider_name = Some(provider_name.into());
        self
    }

    pub fn providers(mut self, providers: impl Into<String>) -> Self {
        self.providers = Some(providers.into());
        self
    }

    /// Filter over the aliases of the key store, e.g. `server,!client`.
    pub fn alias_filter(mut self, alias_filter: impl Into<String>) -> Self {
        self.alias_filter = Some(alias_filter.into());
        self
    }

    pub fn replace_existing(mut self) -> Self {
        self.replace_existing = true;
        self
    }

    pub fn build(self) -> Result<AddKeyManager, BuildError> {
        Ok(AddKeyManager {
            algorithm: required(self.algorithm, RESOURCE, "algorithm")?,
            key_store: required(self.key_store, RESOURCE, "key-store")?,
            name: self.name,
            password: self.password,
            provider_name: self.provider_name,
            providers: self.providers,
            alias_filter: self.alias_filter,
            replace_existing: self.replace_existing,
        })
    }
}

impl OnlineCommand for AddKeyManager {
    fn apply_online(self, ctx: &OnlineCommandContext<'_>) -> Result<(), Error> {
        let address = tls::address(COLLECTION, &self.name);
        let params = Values::empty()
            .and("algorithm", self.algorithm)
            .and("key-store", self.key_store)
            .and_optional("credential-reference", tls::clear_text(self.password.as_deref()))
            .and_optional("provider-name", self.provider_name)
            .and_optional("providers", self.providers)
            .and_optional("alias-filter", self.alias_filter);
        tls::add_online(ctx, address, params, self.replace_existing)
    }
}

impl OfflineCommand for AddKeyManager {
    fn apply_offline(self, ctx: &OfflineCommandContext<'_>) -> Result<(), Error> {
        ctx.client.apply(
            &XmlTransform::of(&ADD_KEY_MANAGER)
                .subtree(tls::SUBTREE_NAME, tls::subtree())
                .parameter("akmName", self.name)
                .parameter("akmAlgorithm", self.algorithm)
                .parameter("akmKeyStore", self.key_store)
                .parameter("akmPassword", self.password)
                .parameter("akmProviderName", self.provider_name)
                .parameter("akmProviders", self.providers)
                .parameter("akmAliasFilter", self.alias_filter)
                .parameter("akmReplaceExisting", self.replace_existing)
                .build(),
        )
    }
}

impl fmt::Display for AddKeyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "add {RESOURCE} {}", self.name)
    }
}

static ADD_KEY_MANAGER: Template = Template {
    name: "AddKeyManager",
    apply: add_key_manager,
};

fn add_key_manager(scope: &mut Scope<'_>, params: &Parameters) -> Result<(), TemplateError> {
    let element = Element::new(RESOURCE)
        .with_attribute("name", params.required("akmName")?)
        .with_attribute("algorithm", params.required("akmAlgorithm")?)
        .with_attribute("key-store", params.required("akmKeyStore")?)
        .with_optional_attribute("alias-filter", params.attribute("akmAliasFilter")?)
        .with_optional_attribute("provider-name", params.attribute("akmProviderName")?)
        .with_optional_attribute("providers", params.attribute("akmProviders")?);
    let password = tls::credential_reference(params.attribute("akmPassword")?);
    let element = tls::with_child(element, password);
    tls::add_offline(scope, COLLECTION, element, params.flag("akmReplaceExisting")?)
}
