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

//! Core components for authenticating Google Workspace API calls.
//!
//! This crate provides the foundational types and traits shared by the gworkspace
//! token providers and product clients.
//!
//! ## Overview
//!
//! The crate is built around several key concepts:
//!
//! - **Context**: A container that holds implementations for file reading, HTTP sending, and environment access
//! - **Credential**: An access token with its expiry, optional refresh token and granted scopes
//! - **TokenStore**: Pure storage for one provider's credential, in memory by default
//! - **Authenticate**: The trait implemented by token providers
//! - **AuthMiddleware**: Attaches a bearer token to every outgoing request
//! - **Transport**: Builds, authorizes and sends JSON calls, then unwraps the [`ApiResponse`]
//!
//! ## Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use gworkspace_core::{Authenticate, Context, Credential, Result, Scopes, Transport};
//! use serde_json::Value;
//!
//! #[derive(Debug)]
//! struct FixedToken;
//!
//! #[async_trait]
//! impl Authenticate for FixedToken {
//!     async fn authenticate(&self, _: &Context, _: &Scopes) -> Result<Credential> {
//!         Ok(Credential::new("ya29.token"))
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new();
//! let transport = Transport::new(
//!     ctx,
//!     "https://www.googleapis.com",
//!     FixedToken,
//!     Scopes::from_iter(["https://www.googleapis.com/auth/drive"]),
//! );
//!
//! let files: Value = transport.get("/drive/v3/files", &[]).await?;
//! println!("{files}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Traits
//!
//! - [`FileRead`]: For asynchronous file reading
//! - [`HttpSend`]: For sending HTTP requests
//! - [`Env`]: For environment variable access
//! - [`TokenStore`]: For storing credentials
//! - [`Authenticate`]: For obtaining valid credentials
//!
//! ## Utilities
//!
//! - [`hash`]: Encoding and hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, Env, FileRead, HttpSend, NoopEnv, NoopFileRead, NoopHttpSend, OsEnv, StaticEnv};
mod error;
pub use error::{Error, ErrorKind, Result};

mod credential;
pub use credential::{Credential, Scopes, EXPIRY_SAFETY_MARGIN_SECS};
mod store;
pub use store::{InMemoryTokenStore, TokenStore};
mod api;
pub use api::Authenticate;

mod middleware;
pub use middleware::AuthMiddleware;
mod response;
pub use response::{snippet, ApiResponse, Body, MAX_ERROR_BODY_BYTES};
mod transport;
pub use transport::Transport;
