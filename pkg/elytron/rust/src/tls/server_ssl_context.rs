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

const RESOURCE: &str = "server-ssl-context";
/// Address type and XML collection of the resource.
const COLLECTION: &str = "server-ssl-contexts";

/// Adds an SSL context used by the server side of connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddServerSslContext {
    name: String,
    key_manager: String,
    trust_manager: Option<String>,
    protocols: Vec<String>,
    cipher_suite_filter: Option<String>,
    need_client_auth: Option<bool>,
    want_client_auth: Option<bool>,
    authentication_optional: Option<bool>,
    maximum_session_cache_size: Option<i64>,
    session_timeout: Option<i64>,
    provider_name: Option<String>,
    providers: Option<String>,
    security_domain: Option<String>,
    replace_existing: bool,
}

impl AddServerSslContext {
    pub fn builder(name: impl Into<String>) -> Result<AddServerSslContextBuilder, BuildError> {
        Ok(AddServerSslContextBuilder {
            name: named(name.into(), RESOURCE)?,
            key_manager: None,
            trust_manager: None,
            protocols: Vec::new(),
            cipher_suite_filter: None,
            need_client_auth: None,
            want_client_auth: None,
            authentication_optional: None,
            maximum_session_cache_size: None,
            session_timeout: None,
            provider_name: None,
            providers: None,
            security_domain: None,
            replace_existing: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key_manager(&self) -> &str {
        &self.key_manager
    }

    pub fn trust_manager(&self) -> Option<&str> {
        self.trust_manager.as_deref()
    }

    pub fn protocols(&self) -> &[String] {
        &self.protocols
    }
}

#[derive(Debug, Clone)]
pub struct AddServerSslContextBuilder {
    name: String,
    key_manager: Option<String>,
    trust_manager: Option<String>,
    protocols: Vec<String>,
    cipher_suite_filter: Option<String>,
    need_client_auth: Option<bool>,
    want_client_auth: Option<bool>,
    authentication_optional: Option<bool>,
    maximum_session_cache_size: Option<i64>,
    session_timeout: Option<i64>,
    provider_name: Option<String>,
    providers: Option<String>,
    security_domain: Option<String>,
    replace_existing: bool,
}

impl AddServerSslContextBuilder {
    /// Key manager presenting the server's certificate. Required.
    pub fn key_manager(mut self, key_manager: impl Into<String>) -> Self {
        self.key_manager = Some(key_manager.into());
        self
    }

    /// Trust manager verifying client certificates.
    pub fn trust_manager(mut self, trust_manager: impl Into<String>) -> Self {
        self.trust_manager = Some(trust_manager.into());
        self
    }

    /// Enabled protocols, e.g. `TLSv1.2`, `TLSv1.3`.
    pub fn protocols<I, S>(mut self, protocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protocols = protocols.into_iter().map(Into::into).collect();
        self
    }

    pub fn cipher_suite_filter(mut self, cipher_suite_filter: impl Into<String>) -> Self {
        self.cipher_suite_filter = Some(cipher_suite_filter.into());
        self
    }

    pub fn need_client_auth(mut self, need_client_auth: bool) -> Self {
        self.need_client_auth = Some(need_client_auth);
        self
    }

    pub fn want_client_auth(mut self, want_client_auth: bool) -> Self {
        self.want_client_auth = Some(want_client_auth);
        self
    }

    pub fn authentication_optional(mut self, authentication_optional: bool) -> Self {
        self.authentication_optional = Some(authentication_optional);
        self
    }

    pub fn maximum_session_cache_size(mut self, size: i64) -> Self {
        self.maximum_session_cache_size = Some(size);
        self
    }

    /// Session timeout in seconds.
    pub fn session_timeout(mut self, seconds: i64) -> Self {
        self.session_timeout = Some(seconds);
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

    pub fn security_domain(mut self, security_domain: impl Into<String>) -> Self {
        self.security_domain = Some(security_domain.into());
        self
    }

    pub fn replace_existing(mut self) -> Self {
        self.replace_existing = true;
        self
    }

    pub fn build(self) -> Result<AddServerSslContext, BuildError> {
        Ok(AddServerSslContext {
            key_manager: required(self.key_manager, RESOURCE, "key-manager")?,
            name: self.name,
            trust_manager: self.trust_manager,
            protocols: self.protocols,
            cipher_suite_filter: self.cipher_suite_filter,
            need_client_auth: self.need_client_auth,
            want_client_auth: self.want_client_auth,
            authentication_optional: self.authentication_optional,
            maximum_session_cache_size: self.maximum_session_cache_size,
            session_timeout: self.session_timeout,
            provider_name: self.provider_name,
            providers: self.providers,
            security_domain: self.security_domain,
            replace_existing: self.replace_existing,
        })
    }
}

impl OnlineCommand for AddServerSslContext {
    fn apply_online(self, ctx: &OnlineCommandContext<'_>) -> Result<(), Error> {
        let address = tls::address(COLLECTION, &self.name);
        let params = Values::empty()
            .and("key-manager", self.key_manager)
            .and_optional("trust-manager", self.trust_manager)
            .and_list("protocols", &self.protocols)
            .and_optional("cipher-suite-filter", self.cipher_suite_filter)
            .and_optional("need-client-auth", self.need_client_auth)
            .and_optional("want-client-auth", self.want_client_auth)
            .and_optional("authentication-optional", self.authentication_optional)
            .and_optional("maximum-session-cache-size", self.maximum_session_cache_size)
            .and_optional("session-timeout", self.session_timeout)
            .and_optional("provider-name", self.provider_name)
            .and_optional("providers", self.providers)
            .and_optional("security-domain", self.security_domain);
        tls::add_online(ctx, address, params, self.replace_existing)
    }
}

impl OfflineCommand for AddServerSslContext {
    fn apply_offline(self, ctx: &OfflineCommandContext<'_>) -> Result<(), Error> {
        ctx.client.apply(
            &XmlTransform::of(&ADD_SERVER_SSL_CONTEXT)
                .subtree(tls::SUBTREE_NAME, tls::subtree())
                .parameter("asscName", self.name)
                .parameter("asscKeyManager", self.key_manager)
                .parameter("asscTrustManager", self.trust_manager)
                .parameter("asscProtocols", tls::joined(&self.protocols))
                .parameter("asscCipherSuiteFilter", self.cipher_suite_filter)
                .parameter("asscNeedClientAuth", self.need_client_auth)
                .parameter("asscWantClientAuth", self.want_client_auth)
                .parameter("asscAuthenticationOptional", self.authentication_optional)
                .parameter("asscMaximumSessionCacheSize", self.maximum_session_cache_size)
                .parameter("asscSessionTimeout", self.session_timeout)
                .parameter("asscProviderName", self.provider_name)
                .parameter("asscProviders", self.providers)
                .parameter("asscSecurityDomain", self.security_domain)
                .parameter("asscReplaceExisting", self.replace_existing)
                .build(),
        )
    }
}

impl fmt::Display for AddServerSslContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "add {RESOURCE} {}", self.name)
    }
}

static ADD_SERVER_SSL_CONTEXT: Template = Template {
    name: "AddServerSslContext",
    apply: add_server_ssl_context,
};

fn add_server_ssl_context(scope: &mut Scope<'_>, params: &Parameters) -> Result<(), TemplateError> {
    let element = Element::new(RESOURCE)
        .with_attribute("name", params.required("asscName")?)
        .with_optional_attribute("security-domain", params.attribute("asscSecurityDomain")?)
        .with_optional_attribute("cipher-suite-filter", params.attribute("asscCipherSuiteFilter")?)
        .with_optional_attribute("protocols", params.attribute("asscProtocols")?)
        .with_optional_attribute("want-client-auth", params.attribute("asscWantClientAuth")?)
        .with_optional_attribute("need-client-auth", params.attribute("asscNeedClientAuth")?)
        .with_optional_attribute(
            "authentication-optional",
            params.attribute("asscAuthenticationOptional")?,
        )
        .with_optional_attribute(
            "maximum-session-cache-size",
            params.attribute("asscMaximumSessionCacheSize")?,
        )
        .with_optional_attribute("session-timeout", params.attribute("asscSessionTimeout")?)
        .with_attribute("key-manager", params.required("asscKeyManager")?)
        .with_optional_attribute("trust-manager", params.attribute("asscTrustManager")?)
        .with_optional_attribute("provider-name", params.attribute("asscProviderName")?)
        .with_optional_attribute("providers", params.attribute("asscProviders")?);
    tls::add_offline(
        scope,
        COLLECTION,
        element,
        params.flag("asscReplaceExisting")?,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tls::testutil::{apply_to_fixture, find, fixture, recorded_transform};
    use serde_json::json;
    use wildfly_mgmt::offline::Param;
    use wildfly_mgmt::testing::FakeServer;

    fn https_ssc() -> AddServerSslContext {
        AddServerSslContext::builder("httpsSSC")
            .unwrap()
            .key_manager("applicationKM")
            .trust_manager("applicationTM")
            .protocols(["TLSv1.2", "TLSv1.3"])
            .need_client_auth(true)
            .session_timeout(300)
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_requires_key_manager() {
        let err = AddServerSslContext::builder("ssc")
            .unwrap()
            .trust_manager("tm")
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "key-manager of the server-ssl-context must be specified as non empty value"
        );
    }

    #[test]
    fn test_online_payload_types() {
        let server = FakeServer::new();
        https_ssc()
            .apply_online(&OnlineCommandContext::new(&server))
            .unwrap();

        let params = server
            .resource(&tls::address(COLLECTION, "httpsSSC"))
            .unwrap();
        let tests = vec![
            ("key-manager", json!("applicationKM")),
            ("trust-manager", json!("applicationTM")),
            ("protocols", json!(["TLSv1.2", "TLSv1.3"])),
            ("need-client-auth", json!(true)),
            ("session-timeout", json!(300)),
        ];
        assert_eq!(params.len(), tests.len());
        for (key, expected) in tests {
            assert_eq!(params.get(key), Some(&expected), "parameter {key}");
        }
    }

    #[test]
    fn test_offline_parameters() {
        let transform = recorded_transform(https_ssc());
        let params = transform.parameters();
        assert_eq!(params.len(), 14);
        assert_eq!(
            params.get("asscProtocols"),
            Some(&Param::String("TLSv1.2 TLSv1.3".to_string()))
        );
        assert_eq!(params.get("asscNeedClientAuth"), Some(&Param::Bool(true)));
        assert_eq!(params.get("asscWantClientAuth"), Some(&Param::Null));
        assert_eq!(params.get("asscSessionTimeout"), Some(&Param::Int(300)));
    }

    #[test]
    fn test_offline_attributes() {
        let mut document = fixture();
        apply_to_fixture(&mut document, https_ssc()).unwrap();

        let element = find(&document, "server-ssl-contexts", "httpsSSC").unwrap();
        let attributes: Vec<(&str, &str)> = element.attributes().collect();
        assert_eq!(
            attributes,
            vec![
                ("name", "httpsSSC"),
                ("protocols", "TLSv1.2 TLSv1.3"),
                ("need-client-auth", "true"),
                ("session-timeout", "300"),
                ("key-manager", "applicationKM"),
                ("trust-manager", "applicationTM"),
            ]
        );
    }
}
