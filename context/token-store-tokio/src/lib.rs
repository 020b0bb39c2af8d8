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

//! File backed [`TokenStore`] for gworkspace.
//!
//! `TokioFileTokenStore` persists the credential of one provider as a JSON document, so
//! a refresh token obtained through the consent screen survives process restarts.
//!
//! ```no_run
//! use gworkspace_core::TokenStore;
//! use gworkspace_token_store_tokio::TokioFileTokenStore;
//!
//! # async fn example() -> gworkspace_core::Result<()> {
//! let store = TokioFileTokenStore::new("/home/me/.config/gworkspace/token.json");
//! if let Some(cred) = store.get().await? {
//!     println!("found credential expiring at {:?}", cred.expires_at);
//! }
//! # Ok(())
//! # }
//! ```

use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use gworkspace_core::{Credential, Error, Result, TokenStore};
use log::debug;
use tokio::sync::Mutex;

/// Store the credential as JSON in a single file.
///
/// A missing file reads as an empty store. Writes go to a sibling temporary file that
/// is renamed over the target, so readers never observe a half written document. On
/// unix the file is created with mode `0600`.
#[derive(Debug)]
pub struct TokioFileTokenStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TokioFileTokenStore {
    /// Create a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The file holding the credential.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for TokioFileTokenStore {
    async fn get(&self) -> Result<Option<Credential>> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == IoErrorKind::NotFound => {
                debug!("token file {} not found", self.path.display());
                return Ok(None);
            }
            Err(err) => {
                return Err(Error::storage(format!(
                    "failed to read token file {}",
                    self.path.display()
                ))
                .with_source(err))
            }
        };

        let cred = serde_json::from_slice(&content).map_err(|e| {
            Error::storage(format!("failed to parse token file {}", self.path.display()))
                .with_source(e)
        })?;
        Ok(Some(cred))
    }

    async fn set(&self, credential: Credential) -> Result<()> {
        let content = serde_json::to_vec_pretty(&credential)
            .map_err(|e| Error::storage("failed to serialize credential").with_source(e))?;

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::storage(format!("failed to create directory {}", parent.display()))
                    .with_source(e)
            })?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        write_private(&tmp, &content).await.map_err(|e| {
            Error::storage(format!("failed to write token file {}", tmp.display())).with_source(e)
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            Error::storage(format!("failed to replace token file {}", self.path.display()))
                .with_source(e)
        })?;

        debug!("credential persisted to {}", self.path.display());
        Ok(())
    }
}

#[cfg(unix)]
async fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    use tokio::io::AsyncWriteExt;

    let mut f = tokio::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
        .await?;
    f.write_all(content).await?;
    f.sync_all().await
}

#[cfg(not(unix))]
async fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    tokio::fs::write(path, content).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use gworkspace_core::{ErrorKind, Scopes};

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokioFileTokenStore::new(dir.path().join("token.json"));
        assert_eq!(store.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokioFileTokenStore::new(dir.path().join("nested").join("token.json"));

        let expires_at = gworkspace_core::time::now() + chrono::TimeDelta::try_hours(1).unwrap();
        let cred = Credential::new("ya29.first")
            .with_expires_at(expires_at)
            .with_refresh_token("1//refresh")
            .with_scopes(Scopes::from_iter(["https://www.googleapis.com/auth/drive"]));
        store.set(cred.clone()).await.unwrap();
        assert_eq!(store.get().await.unwrap(), Some(cred));

        // Overwritten on every refresh.
        store.set(Credential::new("ya29.second")).await.unwrap();
        assert_eq!(
            store.get().await.unwrap().map(|c| c.access_token),
            Some("ya29.second".to_string())
        );

        // A fresh instance over the same file sees the persisted value.
        let reopened = TokioFileTokenStore::new(store.path());
        assert_eq!(
            reopened.get().await.unwrap().map(|c| c.access_token),
            Some("ya29.second".to_string())
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = TokioFileTokenStore::new(dir.path().join("token.json"));
        store.set(Credential::new("ya29.token")).await.unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn test_corrupted_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, "not json").unwrap();

        let err = TokioFileTokenStore::new(&path).get().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
    }

    #[tokio::test]
    async fn test_unwritable_location_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        // Parent "directory" is a regular file.
        let store = TokioFileTokenStore::new(blocker.join("token.json"));
        let err = store.set(Credential::new("t")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
    }
}
