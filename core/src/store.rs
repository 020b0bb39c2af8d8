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

use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{Credential, Result};

/// TokenStore holds the credential of one provider.
///
/// A store is pure storage: it never judges expiry. It starts empty, gets populated on
/// the first successful exchange and is overwritten on every refresh.
///
/// Implementations backed by persistent storage must report backend failures as
/// [`ErrorKind::Storage`](crate::ErrorKind::Storage).
#[async_trait]
pub trait TokenStore: Debug + Send + Sync + 'static {
    /// Load the stored credential.
    ///
    /// - If a credential has been stored, return `Ok(Some(cred))`
    /// - If the store is empty, return `Ok(None)`
    async fn get(&self) -> Result<Option<Credential>>;

    /// Replace the stored credential.
    async fn set(&self, credential: Credential) -> Result<()>;
}

#[async_trait]
impl<T: TokenStore + ?Sized> TokenStore for Arc<T> {
    async fn get(&self) -> Result<Option<Credential>> {
        self.as_ref().get().await
    }

    async fn set(&self, credential: Credential) -> Result<()> {
        self.as_ref().set(credential).await
    }
}

/// InMemoryTokenStore keeps the credential in process memory.
///
/// This is the default store of every provider.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    credential: Mutex<Option<Credential>>,
}

impl InMemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `credential`.
    ///
    /// Useful to seed a provider with a refresh token obtained out of band.
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: Mutex::new(Some(credential)),
        }
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn get(&self) -> Result<Option<Credential>> {
        Ok(self.credential.lock().expect("lock poisoned").clone())
    }

    async fn set(&self, credential: Credential) -> Result<()> {
        *self.credential.lock().expect("lock poisoned") = Some(credential);
        Ok(())
    }
}
