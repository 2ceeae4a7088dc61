// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::errors::{BuildError, named};
use crate::tls;
use std::fmt;
use wildfly_mgmt::offline::{Element, Parameters, Scope, Template, TemplateError, XmlTransform};
use wildfly_mgmt::{
    Error, OfflineCommand, OfflineCommandContext, OnlineCommand, OnlineCommandContext, Values,
};

const RESOURCE: &str = "client-ssl-context";
/// Address type and XML collection of the resource.
const COLLECTION: &str = "client-ssl-contexts";

/// Adds an SSL context for outbound connections. Nothing besides the name is
/// required: without a trust manager the JVM defaults apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddClientSslContext {
    name: String,
    key_manager: Option<String>,
    trust_manager: Option<String>,
    protocols: Vec<String>,
    cipher_suite_filter: Option<String>,
    provider_name: Option<String>,
    providers: Option<String>,
    replace_existing: bool,
}

impl AddClientSslContext {
    pub fn builder(name: impl Into<String>) -> Result<AddClientSslContextBuilder, BuildError> {
        Ok(AddClientSslContextBuilder {
            context: AddClientSslContext {
                name: named(name.into(), RESOURCE)?,
                key_manager: None,
                trust_manager: None,
                protocols: Vec::new(),
                cipher_suite_filter: None,
                provider_name: None,
                providers: None,
                replace_existing: false,
            },
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn trust_manager(&self) -> Option<&str> {
        self.trust_manager.as_deref()
    }
}

/// With no required fields the builder only wraps the finished command.
#[derive(Debug, Clone)]
pub struct AddClientSslContextBuilder {
    context: AddClientSslContext,
}

impl AddClientSslContextBuilder {
    /// Key manager presenting a client certificate.
    pub fn key_manager(mut self, key_manager: impl Into<String>) -> Self {
        self.context.key_manager = Some(key_manager.into());
        self
    }

    pub fn trust_manager(mut self, trust_manager: impl Into<String>) -> Self {
        self.context.trust_manager = Some(trust_manager.into());
        self
    }

    pub fn protocols<I, S>(mut self, protocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.context.protocols = protocols.into_iter().map(Into::into).collect();
        self
    }

    pub fn cipher_suite_filter(mut self, cipher_suite_filter: impl Into<String>) -> Self {
        self.context.cipher_suite_filter = Some(cipher_suite_filter.into());
        self
    }

    pub fn provider_name(mut self, provider_name: impl Into<String>) -> Self {
        self.context.provider_name = Some(provider_name.into());
        self
    }

    pub fn providers(mut self, providers: impl Into<String>) -> Self {
        self.context.providers = Some(providers.into());
        self
    }

    pub fn replace_existing(mut self) -> Self {
        self.context.replace_existing = true;
        self
    }

    pub fn build(self) -> Result<AddClientSslContext, BuildError> {
        Ok(self.context)
    }
}

impl OnlineCommand for AddClientSslContext {
    fn apply_online(self, ctx: &OnlineCommandContext<'_>) -> Result<(), Error> {
        let address = tls::address(COLLECTION, &self.name);
        let params = Values::empty()
            .and_optional("key-manager", self.key_manager)
            .and_optional("trust-manager", self.trust_manager)
            .and_list("protocols", &self.protocols)
            .and_optional("cipher-suite-filter", self.cipher_suite_filter)
            .and_optional("provider-name", self.provider_name)
            .and_optional("providers", self.providers);
        tls::add_online(ctx, address, params, self.replace_existing)
    }
}

impl OfflineCommand for AddClientSslContext {
    fn apply_offline(self, ctx: &OfflineCommandContext<'_>) -> Result<(), Error> {
        ctx.client.apply(
            &XmlTransform::of(&ADD_CLIENT_SSL_CONTEXT)
                .subtree(tls::SUBTREE_NAME, tls::subtree())
                .parameter("acscName", self.name)
                .parameter("acscKeyManager", self.key_manager)
                .parameter("acscTrustManager", self.trust_manager)
                .parameter("acscProtocols", tls::joined(&self.protocols))
                .parameter("acscCipherSuiteFilter", self.cipher_suite_filter)
                .parameter("acscProviderName", self.provider_name)
                .parameter("acscProviders", self.providers)
                .parameter("acscReplaceExisting", self.replace_existing)
                .build(),
        )
    }
}

impl fmt::Display for AddClientSslContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "add {RESOURCE} {}", self.name)
    }
}

static ADD_CLIENT_SSL_CONTEXT: Template = Template {
    name: "AddClientSslContext",
    apply: add_client_ssl_context,
};

fn add_client_ssl_context(scope: &mut Scope<'_>, params: &Parameters) -> Result<(), TemplateError> {
    let element = Element::new(RESOURCE)
        .with_attribute("name", params.required("acscName")?)
        .with_optional_attribute("cipher-suite-filter", params.attribute("acscCipherSuiteFilter")?)
        .with_optional_attribute("protocols", params.attribute("acscProtocols")?)
        .with_optional_attribute("key-manager", params.attribute("acscKeyManager")?)
        .with_optional_attribute("trust-manager", params.attribute("acscTrustManager")?)
        .with_optional_attribute("provider-name", params.attribute("acscProviderName")?)
        .with_optional_attribute("providers", params.attribute("acscProviders")?);
    tls::add_offline(
        scope,
        COLLECTION,
        element,
        params.flag("acscReplaceExisting")?,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tls::testutil::{STANDALONE, apply_to_fixture, find, fixture};
    use wildfly_mgmt::testing::FakeServer;

    #[test]
    fn test_minimal_context() {
        let command = AddClientSslContext::builder("default").unwrap().build().unwrap();
        assert_eq!(command.name(), "default");
        assert_eq!(command.trust_manager(), None);

        let server = FakeServer::new();
        command
            .apply_online(&OnlineCommandContext::new(&server))
            .unwrap();
        let params = server
            .resource(&tls::address(COLLECTION, "default"))
            .unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_empty_values_are_omitted() {
        let server = FakeServer::new();
        AddClientSslContext::builder("outbound")
            .unwrap()
            .trust_manager("applicationTM")
            .cipher_suite_filter("")
            .protocols(Vec::<String>::new())
            .build()
            .unwrap()
            .apply_online(&OnlineCommandContext::new(&server))
            .unwrap();

        let params = server
            .resource(&tls::address(COLLECTION, "outbound"))
            .unwrap();
        let keys: Vec<&str> = params.keys().collect();
        assert_eq!(keys, vec!["trust-manager"]);
    }

    #[test]
    fn test_offline_creates_collection_last() {
        let mut document = fixture();
        let command = AddClientSslContext::builder("outbound")
            .unwrap()
            .trust_manager("applicationTM")
            .build()
            .unwrap();
        apply_to_fixture(&mut document, command).unwrap();

        let expected = STANDALONE.replace(
            "                </server-ssl-contexts>\n",
            "                </server-ssl-contexts>
                <client-ssl-contexts>
                    <client-ssl-context name=\"outbound\" trust-manager=\"applicationTM\"/>
                </client-ssl-contexts>\n",
        );
        assert_eq!(document.to_xml().unwrap(), expected);
        assert!(find(&document, "client-ssl-contexts", "outbound").is_some());
    }
}
