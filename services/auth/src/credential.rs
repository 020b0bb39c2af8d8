// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{self, Debug};

use gworkspace_core::utils::Redact;
use gworkspace_core::{Error, Result};
use serde::Deserialize;

use crate::constants::{DEFAULT_AUTH_URI, DEFAULT_REDIRECT_URI, DEFAULT_TOKEN_URI};

/// ServiceAccountKey is the JSON key file downloaded from the Google Cloud console.
///
/// Only the fields needed for the JWT bearer flow are kept.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServiceAccountKey {
    /// The client email of the service account, used as JWT issuer.
    pub client_email: String,
    /// PEM encoded RSA private key.
    pub private_key: String,
    /// Endpoint the signed assertion is exchanged at.
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    /// Identifier of the private key.
    #[serde(default)]
    pub private_key_id: Option<String>,
    /// Project owning the service account.
    #[serde(default)]
    pub project_id: Option<String>,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &Redact::from(&self.private_key))
            .field("token_uri", &self.token_uri)
            .field("private_key_id", &self.private_key_id)
            .field("project_id", &self.project_id)
            .finish()
    }
}

impl ServiceAccountKey {
    /// Parse a key file.
    pub fn from_slice(bs: &[u8]) -> Result<Self> {
        let key: ServiceAccountKey = serde_json::from_slice(bs).map_err(|e| {
            Error::credential_load("failed to parse service account key").with_source(e)
        })?;

        if key.client_email.is_empty() {
            return Err(Error::credential_load(
                "service account key has an empty client_email",
            ));
        }
        if key.private_key.is_empty() {
            return Err(Error::credential_load(
                "service account key has an empty private_key",
            ));
        }
        Ok(key)
    }
}

/// OAuthClientConfig is the configuration of an OAuth2 client for the authorization code flow.
#[derive(Clone)]
pub struct OAuthClientConfig {
    /// The client ID.
    pub client_id: String,
    /// The client secret.
    pub client_secret: String,
    /// Where the consent screen sends the user back to.
    pub redirect_uri: String,
    /// The token endpoint.
    pub token_uri: String,
    /// The consent endpoint.
    pub auth_uri: String,
}

impl Debug for OAuthClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &Redact::from(&self.client_secret))
            .field("redirect_uri", &self.redirect_uri)
            .field("token_uri", &self.token_uri)
            .field("auth_uri", &self.auth_uri)
            .finish()
    }
}

impl OAuthClientConfig {
    /// Create a config with Google's endpoints and the loopback redirect.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            token_uri: DEFAULT_TOKEN_URI.to_string(),
            auth_uri: DEFAULT_AUTH_URI.to_string(),
        }
    }

    /// Set the redirect URI.
    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = redirect_uri.into();
        self
    }

    /// Set the token endpoint.
    pub fn with_token_uri(mut self, token_uri: impl Into<String>) -> Self {
        self.token_uri = token_uri.into();
        self
    }

    /// Set the consent endpoint.
    pub fn with_auth_uri(mut self, auth_uri: impl Into<String>) -> Self {
        self.auth_uri = auth_uri.into();
        self
    }
}
