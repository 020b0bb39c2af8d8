use async_trait::async_trait;
use log::debug;

use gworkspace_core::time::DateTime;
use gworkspace_core::{Authenticate, Context, Credential, Error, Result, Scopes};

use crate::constants::GOOGLE_ACCESS_TOKEN;

/// StaticTokenProvider hands out an access token acquired elsewhere.
///
/// It never renews anything: once the token expires every call fails with
/// [`ErrorKind::AuthorizationRequired`](gworkspace_core::ErrorKind::AuthorizationRequired).
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    credential: Credential,
}

impl StaticTokenProvider {
    /// Create a provider returning `access_token`.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            credential: Credential::new(access_token),
        }
    }

    /// Load the token from `GOOGLE_ACCESS_TOKEN`.
    pub fn from_env(ctx: &Context) -> Option<Self> {
        ctx.env_var(GOOGLE_ACCESS_TOKEN)
            .filter(|v| !v.is_empty())
            .map(Self::new)
    }

    /// Set when the token stops being accepted.
    pub fn with_expires_at(mut self, expires_at: DateTime) -> Self {
        self.credential.expires_at = Some(expires_at);
        self
    }
}

#[async_trait]
impl Authenticate for StaticTokenProvider {
    async fn authenticate(&self, _: &Context, scopes: &Scopes) -> Result<Credential> {
        if !self.credential.is_valid() {
            return Err(Error::authorization_required(
                "static access token is empty or expired",
            ));
        }

        debug!("using static access token");
        Ok(self.credential.clone().with_scopes(scopes.clone()))
    }
}
