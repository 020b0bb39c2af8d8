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

use crate::types::{Event, SendUpdates};

/// Default endpoint of the Calendar API.
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com";
/// Scopes requested unless overridden.
pub const DEFAULT_SCOPES: &[&str] = &["https://www.googleapis.com/auth/calendar"];

fn default_scopes() -> Scopes {
    DEFAULT_SCOPES.iter().copied().collect()
}

/// Client for the Google Calendar API.
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

    /// Create `event` in `calendar_id` and return it as stored by the server.
    pub async fn events_insert(
        &self,
        calendar_id: &str,
        event: &Event,
        send_updates: SendUpdates,
    ) -> Result<Event> {
        if calendar_id.is_empty() {
            return Err(Error::request_invalid("calendar id must not be empty"));
        }
        if let (Some(start), Some(end)) = (event.start.date_time, event.end.date_time) {
            if end < start {
                return Err(Error::request_invalid(format!(
                    "event ends at {end} before it starts at {start}"
                )));
            }
        }

        let path = format!(
            "/calendar/v3/calendars/{}/events",
            encode_path_segment(calendar_id)
        );

        debug!("inserting event {:?} into calendar {calendar_id}", event.summary);
        self.transport
            .post_json(
                &path,
                &[("sendUpdates", send_updates.as_str().to_string())],
                event,
            )
            .await
    }
}
