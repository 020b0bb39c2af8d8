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
use gworkspace_core::utils::encode_path_segment;
use gworkspace_core::{Authenticate, Context, Error, Result, Scopes, TokenStore, Transport};
use log::debug;
use serde::Serialize;

use crate::types::{BatchUpdateDocumentResponse, Document, Request};

/// Default endpoint of the Docs API.
pub const DEFAULT_ENDPOINT: &str = "https://docs.googleapis.com";
/// Scopes requested unless overridden.
pub const DEFAULT_SCOPES: &[&str] = &["https://www.googleapis.com/auth/documents"];

fn default_scopes() -> Scopes {
    DEFAULT_SCOPES.iter().copied().collect()
}

#[derive(Serialize)]
struct BatchUpdateBody<'a> {
    requests: &'a [Request],
}

/// Client for the Google Docs API.
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

    /// Apply `requests` to a document. Either all of them succeed or none is applied.
    pub async fn documents_batch_update(
        &self,
        document_id: &str,
        requests: &[Request],
    ) -> Result<BatchUpdateDocumentResponse> {
        let path = format!("{}:batchUpdate", document_path(document_id)?);

        debug!("applying {} updates to document {document_id}", requests.len());
        self.transport
            .post_json(&path, &[], &BatchUpdateBody { requests })
            .await
    }

    /// Fetch the full structure of a document.
    pub async fn documents_get(&self, document_id: &str) -> Result<Document> {
        let path = document_path(document_id)?;

        debug!("fetching document {document_id}");
        self.transport.get(&path, &[]).await
    }
}

fn document_path(document_id: &str) -> Result<String> {
    if document_id.is_empty() {
        return Err(Error::request_invalid("document id must not be empty"));
    }
    Ok(format!("/v1/documents/{}", encode_path_segment(document_id)))
}
