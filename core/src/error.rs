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

use std::fmt;

use http::StatusCode;
use thiserror::Error;

/// The error type for gworkspace operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    retryable: bool,
    status: Option<StatusCode>,
    body: Option<String>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Key material is missing, unreadable or malformed.
    CredentialLoad,

    /// The token endpoint rejected an exchange or could not be reached.
    ///
    /// Check [`Error::is_retryable`] to tell a revoked grant from a transient failure.
    TokenExchange,

    /// No usable grant exists, an interactive consent step is required.
    AuthorizationRequired,

    /// The remote API answered with a status the client does not document.
    UnexpectedResponse,

    /// A persistent token store failed.
    Storage,

    /// Configuration error (missing fields, invalid values)
    ConfigInvalid,

    /// Request cannot be built (invalid header, uri, etc.)
    RequestInvalid,

    /// Unexpected errors (I/O, decoding, etc.)
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable: false,
            status: None,
            body: None,
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Mark whether the caller may retry the failed operation.
    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    /// Attach the HTTP status returned by the remote side.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach the (possibly truncated) body returned by the remote side.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Whether retrying the same operation later may succeed.
    ///
    /// gworkspace never retries by itself.
    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    /// HTTP status of the failed remote call, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Body of the failed remote call, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

// Convenience constructors
impl Error {
    /// Create a credential load error
    pub fn credential_load(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialLoad, message)
    }

    /// Create a token exchange error, not retryable unless marked otherwise.
    pub fn token_exchange(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenExchange, message)
    }

    /// Create an authorization required error
    pub fn authorization_required(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AuthorizationRequired, message)
    }

    /// Create an unexpected response error carrying status and body snippet.
    pub fn unexpected_response(status: StatusCode, body: Option<String>) -> Self {
        let message = match &body {
            Some(body) => format!("HTTP {}: {}", status.as_u16(), body),
            None => format!("HTTP {}", status.as_u16()),
        };
        let mut err = Self::new(ErrorKind::UnexpectedResponse, message).with_status(status);
        err.body = body;
        err
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::CredentialLoad => write!(f, "credential load failed"),
            ErrorKind::TokenExchange => write!(f, "token exchange failed"),
            ErrorKind::AuthorizationRequired => write!(f, "authorization required"),
            ErrorKind::UnexpectedResponse => write!(f, "unexpected response"),
            ErrorKind::Storage => write!(f, "token storage failed"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
