use crate::{Context, Credential, Result, Scopes};
use std::fmt::Debug;
use std::sync::Arc;

/// Authenticate is the trait used by the middleware to obtain an access token.
///
/// Implementations decide where tokens come from (a service account key, an OAuth2
/// grant, a static value) and how long they are cached.
#[async_trait::async_trait]
pub trait Authenticate: Debug + Send + Sync + 'static {
    /// Return a credential whose access token is valid for `scopes`.
    ///
    /// Never returns an expired credential: if the cached one is no longer usable,
    /// implementations must renew it or fail.
    async fn authenticate(&self, ctx: &Context, scopes: &Scopes) -> Result<Credential>;
}

#[async_trait::async_trait]
impl<T: Authenticate + ?Sized> Authenticate for Arc<T> {
    async fn authenticate(&self, ctx: &Context, scopes: &Scopes) -> Result<Credential> {
        self.as_ref().authenticate(ctx, scopes).await
    }
}
