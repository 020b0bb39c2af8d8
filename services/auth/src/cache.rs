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

use gworkspace_core::{Credential, Result, TokenStore};
use log::debug;
use tokio::sync::Mutex;

/// TokenCache puts a single-flight guard in front of a [`TokenStore`].
///
/// At most one refresh is in flight per cache. Callers arriving while a refresh runs wait
/// for it, then find the fresh credential in the store and reuse it.
#[derive(Debug)]
pub(crate) struct TokenCache {
    store: Arc<dyn TokenStore>,
    refresh_lock: Mutex<()>,
}

impl TokenCache {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            store,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Return the stored credential if `is_fresh` accepts it, otherwise run `refresh` with
    /// the stored credential (possibly stale) and store its result.
    pub async fn get_or_refresh<P, F, Fut>(&self, is_fresh: P, refresh: F) -> Result<Credential>
    where
        P: Fn(&Credential) -> bool,
        F: FnOnce(Option<Credential>) -> Fut,
        Fut: Future<Output = Result<Credential>>,
    {
        if let Some(cred) = self.store.get().await? {
            if is_fresh(&cred) {
                debug!("reusing cached credential");
                return Ok(cred);
            }
        }

        let _guard = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we were waiting.
        let current = self.store.get().await?;
        if let Some(cred) = &current {
            if is_fresh(cred) {
                debug!("reusing credential refreshed by a concurrent caller");
                return Ok(cred.clone());
            }
        }

        let cred = refresh(current).await?;
        self.store.set(cred.clone()).await?;
        Ok(cred)
    }
}
