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

use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use log::debug;
use serde::Serialize;

use gworkspace_core::time::now;
use gworkspace_core::{
    Authenticate, Context, Credential, Error, InMemoryTokenStore, Result, Scopes, TokenStore,
};

use crate::cache::TokenCache;
use crate::constants::{JWT_BEARER_GRANT_TYPE, JWT_LIFETIME_SECS};
use crate::credential::ServiceAccountKey;
use crate::oauth2::helpers::{credential_from_response, exchange_token};

/// Claims is used to build the JWT bearer assertion.
#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    exp: u64,
    iat: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    sub: Option<&'a str>,
}

/// ServiceAccountTokenProvider exchanges a signed JWT for an access token.
///
/// Every scope set gets its own cached credential, kept until it enters the expiry safety
/// margin, and its own single-flight guard. Alternating between scope sets costs one
/// exchange per set, not one per switch.
pub struct ServiceAccountTokenProvider {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    subject: Option<String>,
    store: Option<Arc<dyn TokenStore>>,
    caches: Mutex<HashMap<Scopes, Arc<TokenCache>>>,
}

impl Debug for ServiceAccountTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountTokenProvider")
            .field("key", &self.key)
            .field("subject", &self.subject)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountTokenProvider {
    /// Create a provider for `key`.
    ///
    /// Fails with [`ErrorKind::CredentialLoad`](gworkspace_core::ErrorKind::CredentialLoad)
    /// if the private key is not a PEM encoded RSA key.
    pub fn new(key: ServiceAccountKey) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
            Error::credential_load("failed to parse service account private key").with_source(e)
        })?;

        Ok(Self {
            key,
            encoding_key,
            subject: None,
            store: None,
            caches: Mutex::new(HashMap::new()),
        })
    }

    /// Create a provider from the content of a key file.
    pub fn from_slice(bs: &[u8]) -> Result<Self> {
        Self::new(ServiceAccountKey::from_slice(bs)?)
    }

    /// Create a provider from a key file, `~` is expanded to the home directory.
    pub async fn from_file(ctx: &Context, path: &str) -> Result<Self> {
        let path = ctx.expand_home_dir(path).ok_or_else(|| {
            Error::credential_load(format!("cannot expand home directory in {path}"))
        })?;
        debug!("loading service account key from {path}");

        let content = ctx.file_read(&path).await.map_err(|e| {
            Error::credential_load(format!("failed to read service account key {path}"))
                .with_source(e)
        })?;
        Self::from_slice(&content)
    }

    /// Also keep the latest credential in `store`.
    ///
    /// The store holds a single credential. It is only reused for the scope set it was
    /// issued for, other sets are served from memory.
    pub fn with_token_store(mut self, store: impl TokenStore) -> Self {
        self.store = Some(Arc::new(store));
        self.caches.lock().expect("lock poisoned").clear();
        self
    }

    /// Act on behalf of `subject` through domain-wide delegation.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// The loaded key.
    pub fn key(&self) -> &ServiceAccountKey {
        &self.key
    }

    fn cache_for(&self, scopes: &Scopes) -> Arc<TokenCache> {
        let mut caches = self.caches.lock().expect("lock poisoned");
        caches
            .entry(scopes.clone())
            .or_insert_with(|| {
                Arc::new(TokenCache::new(Arc::new(ScopedStore {
                    scopes: scopes.clone(),
                    memory: InMemoryTokenStore::new(),
                    shared: self.store.clone(),
                })))
            })
            .clone()
    }

    fn assertion(&self, scopes: &Scopes) -> Result<String> {
        let iat = now().timestamp() as u64;
        let claims = Claims {
            iss: &self.key.client_email,
            scope: scopes.to_string(),
            aud: &self.key.token_uri,
            exp: iat + JWT_LIFETIME_SECS,
            iat,
            sub: self.subject.as_deref(),
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        jsonwebtoken::encode(&header, &claims, &self.encoding_key)
            .map_err(|e| Error::credential_load("failed to sign JWT assertion").with_source(e))
    }

    async fn exchange(&self, ctx: &Context, scopes: &Scopes) -> Result<Credential> {
        debug!(
            "exchanging service account {} for token with scopes: {}",
            self.key.client_email, scopes
        );

        let assertion = self.assertion(scopes)?;
        let resp = exchange_token(
            ctx,
            &self.key.token_uri,
            &[
                ("grant_type", JWT_BEARER_GRANT_TYPE),
                ("assertion", &assertion),
            ],
        )
        .await?;

        credential_from_response(resp, scopes.clone())
    }
}

#[async_trait]
impl Authenticate for ServiceAccountTokenProvider {
    async fn authenticate(&self, ctx: &Context, scopes: &Scopes) -> Result<Credential> {
        if scopes.is_empty() {
            return Err(Error::request_invalid(
                "at least one scope is required for a service account token",
            ));
        }

        self.cache_for(scopes)
            .get_or_refresh(
                |cred| cred.is_valid_for(scopes),
                |_| self.exchange(ctx, scopes),
            )
            .await
    }
}

/// ScopedStore is the store behind the cache of one scope set.
///
/// Writes go to memory and to the shared store. Reads fall back to the shared store when
/// memory is empty, ignoring credentials issued for another scope set.
#[derive(Debug)]
struct ScopedStore {
    scopes: Scopes,
    memory: InMemoryTokenStore,
    shared: Option<Arc<dyn TokenStore>>,
}

#[async_trait]
impl TokenStore for ScopedStore {
    async fn get(&self) -> Result<Option<Credential>> {
        if let Some(cred) = self.memory.get().await? {
            return Ok(Some(cred));
        }
        let Some(shared) = &self.shared else {
            return Ok(None);
        };
        Ok(shared
            .get()
            .await?
            .filter(|cred| cred.scopes == self.scopes))
    }

    async fn set(&self, credential: Credential) -> Result<()> {
        self.memory.set(credential.clone()).await?;
        if let Some(shared) = &self.shared {
            shared.set(credential).await?;
        }
        Ok(())
    }
}
