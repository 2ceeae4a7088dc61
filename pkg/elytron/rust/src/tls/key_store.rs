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

const RESOURCE: &str = "key-store";
/// Address type and XML collection of the resource.
const COLLECTION: &str = "key-stores";

/// Adds a key store to the Elytron subsystem. File-backed when a path is
/// given, otherwise the store type must not need one (e.g. `PKCS11`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddKeyStore {
    name: String,
    key_store_type: String,
    path: Option<String>,
    relative_to: Option<String>,
    required: Option<bool>,
    password: Option<String>,
    provider_name: Option<String>,
    providers: Option<String>,
    alias_filter: Option<String>,
    replace_existing: bool,
}

impl AddKeyStore {
    pub fn builder(name: impl Into<String>) -> Result<AddKeyStoreBuilder, BuildError> {
        Ok(AddKeyStoreBuilder {
            name: named(name.into(), RESOURCE)?,
            key_store_type: None,
            path: None,
            relative_to: None,
            required: None,
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

    pub fn key_store_type(&self) -> &str {
        &self.key_store_type
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn relative_to(&self) -> Option<&str> {
        self.relative_to.as_deref()
    }

    pub fn replace_existing(&self) -> bool {
        self.replace_existing
    }
}

#[derive(Debug, Clone)]
pub struct AddKeyStoreBuilder {
    name: String,
    key_store_type: Option<String>,
    path: Option<String>,
    relative_to: Option<String>,
    required: Option<bool>,
    password: Option<String>,
    provider_name: Option<String>,
    providers: Option<String>,
    alias_filter: Option<String>,
    replace_existing: bool,
}

impl AddKeyStoreBuilder {
    /// Key store type, e.g. `JKS` or `PKCS12`. Required.
    pub fn key_store_type(mut self, key_store_type: impl Into<String>) -> Self {
        self.key_store_type = Some(key_store_type.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Path the `path` is relative to, e.g. `jboss.server.config.dir`.
    pub fn relative_to(mut self, relative_to: impl Into<String>) -> Self {
        self.relative_to = Some(relative_to.into());
        self
    }

    /// Whether the file must exist when the service starts.
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Clear-text password, stored as the store's credential reference.
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

    pub fn alias_filter(mut self, alias_filter: impl Into<String>) -> Self {
        self.alias_filter = Some(alias_filter.into());
        self
    }

    pub fn replace_existing(mut self) -> Self {
        self.replace_existing = true;
        self
    }

    pub fn build(self) -> Result<AddKeyStore, BuildError> {
        let key_store_type = required(self.key_store_type, RESOURCE, "type")?;
        let path = self.path.filter(|p| !p.is_empty());
        // file attributes are meaningless without the file
        if path.is_none() && (self.relative_to.is_some() || self.required.is_some()) {
            return Err(BuildError::MissingField {
                resource: RESOURCE,
                field: "path",
            });
        }
        Ok(AddKeyStore {
            name: self.name,
            key_store_type,
            path,
            relative_to: self.relative_to,
            required: self.required,
            password: self.password,
            provider_name: self.provider_name,
            providers: self.providers,
            alias_filter: self.alias_filter,
            replace_existing: self.replace_existing,
        })
    }
}

impl OnlineCommand for AddKeyStore {
    fn apply_online(self, ctx: &OnlineCommandContext<'_>) -> Result<(), Error> {
        let address = tls::address(COLLECTION, &self.name);
        let params = Values::empty()
            .and("type", self.key_store_type)
            .and_optional("path", self.path)
            .and_optional("relative-to", self.relative_to)
            .and_optional("required", self.required)
            .and_optional("credential-reference", tls::clear_text(self.password.as_deref()))
            .and_optional("provider-name", self.provider_name)
            .and_optional("providers", self.providers)
            .and_optional("alias-filter", self.alias_filter);
        tls::add_online(ctx, address, params, self.replace_existing)
    }
}

impl OfflineCommand for AddKeyStore {
    fn apply_offline(self, ctx: &OfflineCommandContext<'_>) -> Result<(), Error> {
        ctx.client.apply(
            &XmlTransform::of(&ADD_KEY_STORE)
                .subtree(tls::SUBTREE_NAME, tls::subtree())
                .parameter("aksName", self.name)
                .parameter("aksType", self.key_store_type)
                .parameter("aksPath", self.path)
                .parameter("aksRelativeTo", self.relative_to)
                .parameter("aksRequired", self.required)
                .parameter("aksPassword", self.password)
                .parameter("aksProviderName", self.provider_name)
                .parameter("aksProviders", self.providers)
                .parameter("aksAliasFilter", self.alias_filter)
                .parameter("aksReplaceExisting", self.replace_existing)
                .build(),
        )
    }
}

impl fmt::Display for AddKeyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "add {RESOURCE} {}", self.name)
    }
}

static ADD_KEY_STORE: Template = Template {
    name: "AddKeyStore",
    apply: add_key_store,
};

fn add_key_store(scope: &mut Scope<'_>, params: &Parameters) -> Result<(), TemplateError> {
    let relative_to = params.attribute("aksRelativeTo")?;
    let file_required = params.attribute("aksRequired")?;
    let file = params.attribute("aksPath")?.map(|path| {
        Element::new("file")
            .with_attribute("path", path)
            .with_optional_attribute("relative-to", relative_to)
            .with_optional_attribute("required", file_required)
    });
    let implementation =
        Element::new("implementation").with_attribute("type", params.required("aksType")?);

    let element = Element::new(RESOURCE)
        .with_attribute("name", params.required("aksName")?)
        .with_optional_attribute("alias-filter", params.attribute("aksAliasFilter")?)
        .with_optional_attribute("provider-name", params.attribute("aksProviderName")?)
        .with_optional_attribute("providers", params.attribute("aksProviders")?);
    let password = tls::credential_reference(params.attribute("aksPassword")?);
    let element = tls::with_child(element, password);
    let element = tls::with_child(element.with_child(implementation), file);

    tls::add_offline(scope, COLLECTION, element, params.flag("aksReplaceExisting")?)
}
