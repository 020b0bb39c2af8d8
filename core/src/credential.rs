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

use std::collections::BTreeSet;
use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};

use crate::time::{now, DateTime};
use crate::utils::Redact;

/// Tokens expiring within this window are treated as already expired.
pub const EXPIRY_SAFETY_MARGIN_SECS: i64 = 2 * 60;

/// Credential is an OAuth2 access token plus the material needed to judge and renew it.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// The bearer token presented on every API call.
    pub access_token: String,
    /// When the access token stops being accepted, `None` means never.
    #[serde(default)]
    pub expires_at: Option<DateTime>,
    /// Long-lived token used to obtain new access tokens without user interaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Scopes the access token was issued for.
    #[serde(default)]
    pub scopes: Scopes,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &Redact::from(&self.access_token))
            .field("expires_at", &self.expires_at)
            .field("refresh_token", &Redact::from(&self.refresh_token))
            .field("scopes", &self.scopes)
            .finish()
    }
}

impl Credential {
    /// Create a credential with the given access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Default::default()
        }
    }

    /// Create a credential holding only a refresh token.
    ///
    /// The credential is not valid for use until it has been refreshed.
    pub fn from_refresh_token(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: Some(refresh_token.into()),
            ..Default::default()
        }
    }

    /// Set the expiration time.
    pub fn with_expires_at(mut self, expires_at: DateTime) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Set the refresh token.
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Set the scopes this token was issued for.
    pub fn with_scopes(mut self, scopes: Scopes) -> Self {
        self.scopes = scopes;
        self
    }

    /// Check if the access token can still be used.
    ///
    /// A token that expires within [`EXPIRY_SAFETY_MARGIN_SECS`] is considered invalid.
    pub fn is_valid(&self) -> bool {
        if self.access_token.is_empty() {
            return false;
        }

        match self.expires_at {
            Some(expires_at) => {
                let buffer =
                    chrono::TimeDelta::try_seconds(EXPIRY_SAFETY_MARGIN_SECS).expect("in bounds");
                now() < expires_at - buffer
            }
            None => true,
        }
    }

    /// Check if the access token is valid and was issued for exactly `scopes`.
    pub fn is_valid_for(&self, scopes: &Scopes) -> bool {
        self.is_valid() && &self.scopes == scopes
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Scopes is the set of permission strings requested for a token.
///
/// Duplicates are dropped and ordering is canonical, so two sets listing the same
/// scopes in a different order compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scopes(BTreeSet<String>);

impl Scopes {
    /// Create an empty scope set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a space separated scope string, as used by the OAuth2 `scope` parameter.
    pub fn parse(s: &str) -> Self {
        s.split_whitespace().collect()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of scopes in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the scopes.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Scopes {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl Display for Scopes {
    /// Space separated, the wire format of the OAuth2 `scope` parameter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, scope) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(scope)?;
        }
        Ok(())
    }
}
