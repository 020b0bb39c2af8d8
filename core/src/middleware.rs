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

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use http::header;
use log::debug;

use crate::{Authenticate, Context, Result, Scopes};

/// AuthMiddleware is the single interception point of a client's outgoing requests.
///
/// Every request gets an `Authorization: Bearer <token>` header from the configured
/// [`Authenticate`] implementation. The scope set is fixed at construction.
///
/// There is no retry on `401`: the remote error surfaces as-is and the next call picks
/// up a refreshed token once the cached one is judged expired.
#[derive(Clone, Debug)]
pub struct AuthMiddleware {
    authenticator: Arc<dyn Authenticate>,
    scopes: Scopes,
}

impl AuthMiddleware {
    /// Create a new middleware requesting `scopes` from `authenticator`.
    pub fn new(authenticator: impl Authenticate, scopes: Scopes) -> Self {
        Self {
            authenticator: Arc::new(authenticator),
            scopes,
        }
    }

    /// Replace the scope set.
    pub fn with_scopes(mut self, scopes: Scopes) -> Self {
        self.scopes = scopes;
        self
    }

    /// The scopes requested for every request.
    pub fn scopes(&self) -> &Scopes {
        &self.scopes
    }

    /// Attach a bearer token to the request parts.
    pub async fn authorize(&self, ctx: &Context, parts: &mut http::request::Parts) -> Result<()> {
        let cred = self.authenticator.authenticate(ctx, &self.scopes).await?;

        let mut value: http::HeaderValue = cred.bearer().parse()?;
        value.set_sensitive(true);
        parts.headers.insert(header::AUTHORIZATION, value);
        Ok(())
    }

    /// Authorize `req` and hand it to `next`, returning its response unmodified.
    pub async fn intercept<F, Fut>(
        &self,
        ctx: &Context,
        req: http::Request<Bytes>,
        next: F,
    ) -> Result<http::Response<Bytes>>
    where
        F: FnOnce(http::Request<Bytes>) -> Fut + Send,
        Fut: Future<Output = Result<http::Response<Bytes>>> + Send,
    {
        let (mut parts, body) = req.into_parts();
        self.authorize(ctx, &mut parts).await?;

        debug!("sending authorized request: {} {}", parts.method, parts.uri);
        next(http::Request::from_parts(parts, body)).await
    }

    /// Authorize `req` and send it through the context's [`HttpSend`](crate::HttpSend).
    pub async fn send(
        &self,
        ctx: &Context,
        req: http::Request<Bytes>,
    ) -> Result<http::Response<Bytes>> {
        self.intercept(ctx, req, |req| ctx.http_send(req)).await
    }
}
