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

use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::Method;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{ApiResponse, AuthMiddleware, Authenticate, Context, Result, Scopes};

/// Transport issues authorized JSON calls against one API endpoint.
///
/// Every product client owns exactly one transport, which owns exactly one
/// [`AuthMiddleware`].
#[derive(Clone, Debug)]
pub struct Transport {
    ctx: Context,
    endpoint: String,
    middleware: AuthMiddleware,
}

impl Transport {
    /// Create a transport for `endpoint`, authorized by `authenticator` with `scopes`.
    pub fn new(
        ctx: Context,
        endpoint: impl Into<String>,
        authenticator: impl Authenticate,
        scopes: Scopes,
    ) -> Self {
        Self {
            ctx,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            middleware: AuthMiddleware::new(authenticator, scopes),
        }
    }

    /// Override the endpoint, mostly useful to target an emulator.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the scopes requested for every call.
    pub fn with_scopes(mut self, scopes: Scopes) -> Self {
        self.middleware = self.middleware.with_scopes(scopes);
        self
    }

    /// The configured endpoint without trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The scopes requested for every call.
    pub fn scopes(&self) -> &Scopes {
        self.middleware.scopes()
    }

    /// Send `GET {endpoint}{path}?{query}` and decode the JSON result.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let req = self.build(Method::GET, path, query, None)?;
        self.execute(req).await
    }

    /// Send `POST {endpoint}{path}?{query}` with a JSON body and decode the JSON result.
    pub async fn post_json<B, T>(&self, path: &str, query: &[(&str, String)], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let body = serde_json::to_vec(body)?;
        let req = self.build(Method::POST, path, query, Some(body.into()))?;
        self.execute(req).await
    }

    /// Authorize and send a prepared request, then unwrap the JSON payload.
    pub async fn execute<T: DeserializeOwned>(&self, req: http::Request<Bytes>) -> Result<T> {
        let resp = self.middleware.send(&self.ctx, req).await?;
        debug!("got response status: {}", resp.status());
        ApiResponse::<T>::from_http(resp)?.into_json()
    }

    fn build(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Bytes>,
    ) -> Result<http::Request<Bytes>> {
        let mut url = format!("{}{}", self.endpoint, path);
        if !query.is_empty() {
            let qs = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())))
                .finish();
            url.push('?');
            url.push_str(&qs);
        }

        let mut builder = http::Request::builder()
            .method(method)
            .uri(url)
            .header(ACCEPT, "application/json");
        if body.is_some() {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        Ok(builder.body(body.unwrap_or_default())?)
    }
}
