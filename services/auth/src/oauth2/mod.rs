//! OAuth2 token endpoint plumbing shared by the providers.

pub(crate) mod helpers;
pub(crate) mod types;
