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

//! Token providers for Google Workspace APIs.
//!
//! - [`ServiceAccountTokenProvider`]: exchanges an RS256 signed JWT for an access token.
//! - [`OAuth2TokenProvider`]: authorization code grant plus refresh token renewal.
//! - [`StaticTokenProvider`]: a token acquired elsewhere.
//!
//! Every provider implements [`gworkspace_core::Authenticate`] and keeps its credential in a
//! [`gworkspace_core::TokenStore`], in memory unless told otherwise. Concurrent callers
//! share a single in-flight token exchange.
//!
//! ```no_run
//! use gworkspace_auth::ServiceAccountTokenProvider;
//! use gworkspace_core::{Authenticate, Context, Scopes};
//!
//! # async fn example(ctx: Context) -> gworkspace_core::Result<()> {
//! let provider = ServiceAccountTokenProvider::from_file(&ctx, "~/keys/sa.json").await?;
//! let cred = provider
//!     .authenticate(&ctx, &Scopes::from_iter(["https://www.googleapis.com/auth/drive"]))
//!     .await?;
//! println!("token expires at {:?}", cred.expires_at);
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::*;

mod config;
pub use config::Config;

mod credential;
pub use credential::{OAuthClientConfig, ServiceAccountKey};

mod cache;
mod oauth2;
pub use oauth2::helpers::INVALID_GRANT;

mod provide_token;
pub use provide_token::{
    AuthorizationCodeCallback, AuthorizationUrl, OAuth2TokenProvider, ServiceAccountTokenProvider,
    StaticTokenProvider,
};
