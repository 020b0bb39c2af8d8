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
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use log::{debug, warn};
use rand::distributions::Alphanumeric;
use rand::Rng;

use gworkspace_core::hash::base64_url_sha256;
use gworkspace_core::utils::Redact;
use gworkspace_core::{
    Authenticate, Context, Credential, Error, InMemoryTokenStore, Result, Scopes, TokenStore,
};

use crate::cache::TokenCache;
use crate::credential::OAuthClientConfig;
use crate::oauth2::helpers::{credential_from_response, exchange_token, is_invalid_grant};

/// AuthorizationUrl is a consent screen URL together with its anti-forgery state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationUrl {
    /// URL the user must open in a browser.
    pub url: String,
    /// The `state` parameter embedded in `url`; the redirect must echo it back.
    pub state: String,
}

/// AuthorizationCodeCallback drives the interactive part of the authorization code flow.
///
/// It receives the consent URL, gets the user through it and returns the code the
/// redirect carried. Implementations are responsible for checking the returned `state`.
#[async_trait]
pub trait AuthorizationCodeCallback: Debug + Send + Sync + 'static {
    /// Return the authorization code obtained for `url`.
    async fn authorization_code(&self, url: &AuthorizationUrl) -> Result<String>;
}

#[async_trait]
impl<T: AuthorizationCodeCallback + ?Sized> AuthorizationCodeCallback for Arc<T> {
    async fn authorization_code(&self, url: &AuthorizationUrl) -> Result<String> {
        self.as_ref().authorization_code(url).await
    }
}

/// OAuth2TokenProvider runs the authorization code flow and keeps its tokens fresh.
///
/// On each call:
///
/// 1. An unexpired access token in the store is returned as-is.
/// 2. Otherwise a refresh token (from the store, or the seed given with
///    [`with_refresh_token`](Self::with_refresh_token)) is exchanged for a new access
///    token. A rotated refresh token replaces the previous one. A refresh token the
///    endpoint rejects with `invalid_grant` is discarded and the next step is tried.
/// 3. Otherwise the authorization code, either given once with
///    [`with_authorization_code`](Self::with_authorization_code) or obtained from the
///    [`AuthorizationCodeCallback`], is exchanged for both tokens.
/// 4. Otherwise the call fails with the `invalid_grant` rejection if one happened, or
///    with [`ErrorKind::AuthorizationRequired`](gworkspace_core::ErrorKind::AuthorizationRequired).
pub struct OAuth2TokenProvider {
    config: OAuthClientConfig,
    cache: TokenCache,
    refresh_token: Mutex<Option<String>>,
    authorization_code: Mutex<Option<String>>,
    code_callback: Option<Arc<dyn AuthorizationCodeCallback>>,
    code_verifier: Mutex<Option<String>>,
}

impl Debug for OAuth2TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let refresh_token = self.refresh_token.lock().expect("lock poisoned").clone();
        f.debug_struct("OAuth2TokenProvider")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .field("refresh_token", &Redact::from(&refresh_token))
            .field("code_callback", &self.code_callback)
            .finish_non_exhaustive()
    }
}

impl OAuth2TokenProvider {
    /// Create a provider for `config` with an in-memory store.
    pub fn new(config: OAuthClientConfig) -> Self {
        Self {
            config,
            cache: TokenCache::new(Arc::new(InMemoryTokenStore::new())),
            refresh_token: Mutex::new(None),
            authorization_code: Mutex::new(None),
            code_callback: None,
            code_verifier: Mutex::new(None),
        }
    }

    /// Use `store` instead of the in-memory default.
    pub fn with_token_store(mut self, store: impl TokenStore) -> Self {
        self.cache = TokenCache::new(Arc::new(store));
        self
    }

    /// Use a refresh token obtained out of band when the store holds none.
    pub fn with_refresh_token(self, refresh_token: impl Into<String>) -> Self {
        *self.refresh_token.lock().expect("lock poisoned") = Some(refresh_token.into());
        self
    }

    /// Exchange `code` the first time no refresh token is available.
    ///
    /// The code is consumed by that exchange whatever its outcome.
    pub fn with_authorization_code(self, code: impl Into<String>) -> Self {
        *self.authorization_code.lock().expect("lock poisoned") = Some(code.into());
        self
    }

    /// Ask `callback` for an authorization code whenever user consent is needed.
    pub fn with_code_callback(mut self, callback: impl AuthorizationCodeCallback) -> Self {
        self.code_callback = Some(Arc::new(callback));
        self
    }

    /// The client configuration.
    pub fn config(&self) -> &OAuthClientConfig {
        &self.config
    }

    /// Build the consent screen URL for `scopes`.
    ///
    /// The URL asks for offline access with a forced consent prompt, so that Google issues
    /// a refresh token, and carries a PKCE S256 challenge. The matching verifier is kept by
    /// the provider and sent with the next authorization code exchange.
    pub fn authorization_url(&self, scopes: &Scopes) -> AuthorizationUrl {
        let state = random_string(32);
        let verifier = random_string(64);
        let challenge = base64_url_sha256(verifier.as_bytes());
        *self.code_verifier.lock().expect("lock poisoned") = Some(verifier);

        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("scope", &scopes.to_string())
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent")
            .append_pair("state", &state)
            .append_pair("code_challenge", &challenge)
            .append_pair("code_challenge_method", "S256")
            .finish();

        let separator = if self.config.auth_uri.contains('?') { '&' } else { '?' };
        AuthorizationUrl {
            url: format!("{}{}{}", self.config.auth_uri, separator, query),
            state,
        }
    }

    async fn refresh(
        &self,
        ctx: &Context,
        refresh_token: String,
        scopes: &Scopes,
    ) -> Result<Credential> {
        debug!("refreshing access token");

        let resp = exchange_token(
            ctx,
            &self.config.token_uri,
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", &refresh_token),
                ("client_id", &self.config.client_id),
                ("client_secret", &self.config.client_secret),
            ],
        )
        .await?;

        let granted = granted_scopes(resp.scope.as_deref(), scopes);
        let mut cred = credential_from_response(resp, granted)?;
        if cred.refresh_token.is_none() {
            cred.refresh_token = Some(refresh_token);
        } else {
            debug!("refresh token has been rotated");
        }
        Ok(cred)
    }

    async fn exchange_code(&self, ctx: &Context, code: String, scopes: &Scopes) -> Result<Credential> {
        debug!("exchanging authorization code for tokens");

        let verifier = self.code_verifier.lock().expect("lock poisoned").take();
        let mut params = vec![
            ("grant_type", "authorization_code"),
            ("code", code.as_str()),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];
        if let Some(verifier) = verifier.as_deref() {
            params.push(("code_verifier", verifier));
        }

        let resp = exchange_token(ctx, &self.config.token_uri, &params).await?;
        let granted = granted_scopes(resp.scope.as_deref(), scopes);
        let cred = credential_from_response(resp, granted)?;
        if cred.refresh_token.is_none() {
            debug!("authorization code exchange returned no refresh token");
        }
        Ok(cred)
    }

    async fn acquire(
        &self,
        ctx: &Context,
        scopes: &Scopes,
        current: Option<Credential>,
    ) -> Result<Credential> {
        let stored = current.as_ref().and_then(|cred| cred.refresh_token.clone());
        let from_store = stored.is_some();
        let refresh_token =
            stored.or_else(|| self.refresh_token.lock().expect("lock poisoned").clone());

        let mut rejected = None;
        if let Some(refresh_token) = refresh_token {
            match self.refresh(ctx, refresh_token, scopes).await {
                Err(err) if is_invalid_grant(&err) => {
                    warn!("refresh token was rejected with invalid_grant, discarding it");
                    self.discard_refresh_token(current, from_store).await?;
                    rejected = Some(err);
                }
                result => return result,
            }
        }

        let code = self.authorization_code.lock().expect("lock poisoned").take();
        if let Some(code) = code {
            return self.exchange_code(ctx, code, scopes).await;
        }

        if let Some(callback) = &self.code_callback {
            let url = self.authorization_url(scopes);
            debug!("requesting authorization code from callback");
            let code = callback.authorization_code(&url).await?;
            return self.exchange_code(ctx, code, scopes).await;
        }

        Err(rejected.unwrap_or_else(|| {
            Error::authorization_required(
                "no refresh token or authorization code available, user consent is required",
            )
        }))
    }

    /// Forget a refresh token the endpoint no longer accepts, so it is never sent again.
    async fn discard_refresh_token(
        &self,
        current: Option<Credential>,
        from_store: bool,
    ) -> Result<()> {
        match current {
            Some(mut cred) if from_store => {
                cred.refresh_token = None;
                self.cache.store().set(cred).await
            }
            _ => {
                self.refresh_token.lock().expect("lock poisoned").take();
                Ok(())
            }
        }
    }
}

#[async_trait]
impl Authenticate for OAuth2TokenProvider {
    async fn authenticate(&self, ctx: &Context, scopes: &Scopes) -> Result<Credential> {
        self.cache
            .get_or_refresh(Credential::is_valid, |current| {
                self.acquire(ctx, scopes, current)
            })
            .await
    }
}

fn granted_scopes(granted: Option<&str>, requested: &Scopes) -> Scopes {
    match granted {
        Some(s) if !s.trim().is_empty() => Scopes::parse(s),
        _ => requested.clone(),
    }
}

fn random_string(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
