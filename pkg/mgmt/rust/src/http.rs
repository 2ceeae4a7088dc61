// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::client::ManagementClient;
use crate::digest::DigestChallenge;
use crate::errors::Error;
use crate::operations::{ModelNodeResult, Operation};
use log::{debug, warn};
use rand_core::{OsRng, RngCore};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

const MANAGEMENT_PATH: &str = "/management";
const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 9990;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`HttpManagementClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            username: None,
            password: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientOptions {
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, MANAGEMENT_PATH)
    }
}

enum Reply {
    Body(String),
    Unauthorized(Option<DigestChallenge>),
}

/// Management client speaking JSON to the HTTP management interface
/// (`POST /management`), authenticating with HTTP Digest.
pub struct HttpManagementClient {
    agent: ureq::Agent,
    options: ClientOptions,
    endpoint: String,
    challenge: Mutex<Option<DigestChallenge>>,
    nonce_count: AtomicU32,
}

impl HttpManagementClient {
    pub fn new(options: ClientOptions) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(options.timeout).build();
        let endpoint = options.endpoint();
        Self {
            agent,
            options,
            endpoint,
            challenge: Mutex::new(None),
            nonce_count: AtomicU32::new(0),
        }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    fn post(&self, body: &str, authorization: Option<&str>) -> Result<Reply, Error> {
        let mut request = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .set("Accept", "application/json");
        if let Some(authorization) = authorization {
            request = request.set("Authorization", authorization);
        }

        match request.send_string(body) {
            Ok(response) => Ok(Reply::Body(response.into_string()?)),
            Err(ureq::Error::Status(401, response)) => {
                let challenge = response
                    .all("WWW-Authenticate")
                    .into_iter()
                    .find_map(DigestChallenge::parse);
                Ok(Reply::Unauthorized(challenge))
            }
            Err(ureq::Error::Status(code, response)) => {
                // failed operations come back as 500 with a JSON body
                let text = response.into_string()?;
                if text.trim_start().starts_with('{') {
                    debug!("management endpoint replied {code}");
                    Ok(Reply::Body(text))
                } else {
                    Err(Error::Transport(format!(
                        "{} replied with status {code}: {}",
                        self.endpoint,
                        text.trim()
                    )))
                }
            }
            Err(e) => Err(Error::Transport(e.to_string())),
        }
    }

    /// `Authorization` header for the cached challenge, if any.
    fn authorization(&self) -> Option<String> {
        let username = self.options.username.as_ref()?;
        let password = self.options.password.as_ref()?;
        let challenge = self
            .challenge
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()?;
        let nonce_count = self.nonce_count.fetch_add(1, Ordering::SeqCst) + 1;
        Some(challenge.authorization(
            username,
            password,
            "POST",
            MANAGEMENT_PATH,
            nonce_count,
            &client_nonce(),
        ))
    }

    fn send(&self, body: &str) -> Result<String, Error> {
        match self.post(body, self.authorization().as_deref())? {
            Reply::Body(text) => return Ok(text),
            Reply::Unauthorized(None) => {
                return Err(Error::Transport(format!(
                    "{} requires authentication but offered no Digest challenge",
                    self.endpoint
                )));
            }
            Reply::Unauthorized(Some(challenge)) => {
                let missing = match (&self.options.username, &self.options.password) {
                    (None, _) => Some("credentials"),
                    (Some(_), None) => Some("password"),
                    (Some(_), Some(_)) => None,
                };
                if let Some(missing) = missing {
                    return Err(Error::Transport(format!(
                        "{} requires authentication, no {missing} configured",
                        self.endpoint
                    )));
                }
                debug!("answering Digest challenge from realm {}", challenge.realm);
                *self.challenge.lock().unwrap_or_else(PoisonError::into_inner) = Some(challenge);
                self.nonce_count.store(0, Ordering::SeqCst);
            }
        }

        match self.post(body, self.authorization().as_deref())? {
            Reply::Body(text) => Ok(text),
            Reply::Unauthorized(_) => {
                warn!("authentication to {} was rejected", self.endpoint);
                Err(Error::Transport(format!(
                    "authentication to {} failed",
                    self.endpoint
                )))
            }
        }
    }
}

impl ManagementClient for HttpManagementClient {
    fn execute(&self, operation: &Operation) -> Result<ModelNodeResult, Error> {
        let body = serde_json::to_string(&operation.to_model())?;
        let text = self.send(&body)?;
        let value = serde_json::from_str(&text)
            .map_err(|e| Error::InvalidResponse(format!("{e}: {}", text.trim())))?;
        ModelNodeResult::from_value(value)
    }
}

fn client_nonce() -> String {
    format!("{:016x}", OsRng.next_u64())
}
