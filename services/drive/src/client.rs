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

use gworkspace_auth::{OAuth2TokenProvider, OAuthClientConfig, ServiceAccountTokenProvider};
use gworkspace_core::{Authenticate, Context, Result, Scopes, TokenStore, Transport};
use log::debug;

use crate::types::FileList;

/// Default endpoint of the Drive API.
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com";
/// Scopes requested unless overridden.
pub const DEFAULT_SCOPES: &[&str] = &["https://www.googleapis.com/auth/drive"];

const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 1000;

fn default_scopes() -> Scopes {
    DEFAULT_SCOPES.iter().copied().collect()
}

/// Parameters of `files.list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilesParams {
    /// Search query, e.g. `name contains 'test'`. `None` lists everything visible.
    pub q: Option<String>,
    /// Clamped to `1..=1000` when sent.
    pub page_size: u32,
    /// `next_page_token` of the previous page.
    pub page_token: Option<String>,
}

impl Default for ListFilesParams {
    fn default() -> Self {
        Self {
            q: None,
            page_size: DEFAULT_PAGE_SIZE,
            page_token: None,
        }
    }
}

impl ListFilesParams {
    /// Only list files matching the Drive search query `q`.
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Ask for up to `page_size` files per page.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Continue listing from a previous page's `next_page_token`.
    pub fn with_page_token(mut self, page_token: impl Into<String>) -> Self {
        self.page_token = Some(page_token.into());
        self
    }

    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![(
            "pageSize",
            self.page_size.clamp(1, MAX_PAGE_SIZE).to_string(),
        )];
        if let Some(token) = &self.page_token {
            query.push(("pageToken", token.clone()));
        }
        if let Some(q) = &self.q {
            query.push(("q", q.clone()));
        }
        query
    }
}

/// Client for the Google Drive API.
#[derive(Debug, Clone)]
pub struct Client {
    transport: Transport,
}

impl Client {
    /// Create a client authorized by an existing provider.
    pub fn new(ctx: Context, authenticator: impl Authenticate) -> Self {
        Self {
            transport: Transport::new(ctx, DEFAULT_ENDPOINT, authenticator, default_scopes()),
        }
    }

    /// Create a client authorized by a service account key file.
    pub async fn from_service_account_file(ctx: Context, path: &str) -> Result<Self> {
        let provider = ServiceAccountTokenProvider::from_file(&ctx, path).await?;
        Ok(Self::new(ctx, provider))
    }

    /// Create a client running the OAuth2 flow for `config`, keeping tokens in `store`.
    pub fn from_oauth2(ctx: Context, config: OAuthClientConfig, store: impl TokenStore) -> Self {
        Self::new(ctx, OAuth2TokenProvider::new(config).with_token_store(store))
    }

    /// Request `scopes` instead of the defaults. An empty set restores the defaults.
    pub fn with_scopes(mut self, scopes: Scopes) -> Self {
        let scopes = if scopes.is_empty() {
            default_scopes()
        } else {
            scopes
        };
        self.transport = self.transport.with_scopes(scopes);
        self
    }

    /// Send requests to `endpoint` instead of the default.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.transport = self.transport.with_endpoint(endpoint);
        self
    }

    /// Scopes requested for every call.
    pub fn scopes(&self) -> &Scopes {
        self.transport.scopes()
    }

    /// List one page of files visible to the caller.
    pub async fn files_list(&self, params: &ListFilesParams) -> Result<FileList> {
        let query = params.to_query();
        debug!("listing files: {query:?}");
        self.transport.get("/drive/v3/files", &query).await
    }
}
