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

//! Tokio-based file reading for gworkspace.
//!
//! `TokioFileRead` implements the `FileRead` trait from `gworkspace_core` on top of
//! `tokio::fs`. It is what token providers use to load a service account key or a
//! persisted OAuth2 token.
//!
//! ## Example
//!
//! ```no_run
//! use gworkspace_core::{Context, OsEnv};
//! use gworkspace_file_read_tokio::TokioFileRead;
//!
//! #[tokio::main]
//! async fn main() {
//!     let ctx = Context::new()
//!         .with_file_read(TokioFileRead)
//!         .with_env(OsEnv);
//!
//!     match ctx.file_read("/path/to/service-account.json").await {
//!         Ok(content) => println!("Read {} bytes", content.len()),
//!         Err(e) => eprintln!("Failed to read file: {}", e),
//!     }
//! }
//! ```

use async_trait::async_trait;
use gworkspace_core::{Error, FileRead, Result};
use log::debug;

/// Tokio-based implementation of the `FileRead` trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileRead;

#[async_trait]
impl FileRead for TokioFileRead {
    async fn file_read(&self, path: &str) -> Result<Vec<u8>> {
        debug!("reading file: {path}");
        tokio::fs::read(path)
            .await
            .map_err(|e| Error::credential_load(format!("failed to read file {path}")).with_source(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gworkspace_core::{Context, ErrorKind};
    use std::io::Write;

    #[tokio::test]
    async fn test_read_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(br#"{"client_email":"sa@example.iam.gserviceaccount.com"}"#)
            .unwrap();

        let ctx = Context::new().with_file_read(TokioFileRead);
        let content = ctx.file_read(f.path().to_str().unwrap()).await.unwrap();
        assert!(content.starts_with(br#"{"client_email""#));
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = TokioFileRead
            .file_read(path.to_str().unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialLoad);
    }
}
