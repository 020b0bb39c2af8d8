use std::fmt::{self, Debug};

use gworkspace_core::utils::Redact;
use gworkspace_core::{Context, Scopes};

use crate::constants::*;
use crate::credential::OAuthClientConfig;

/// Config carries the authentication settings of an application.
#[derive(Clone, Default)]
pub struct Config {
    /// Path of the service account key file.
    pub service_account_path: Option<String>,
    /// OAuth2 client ID.
    pub oauth_client_id: Option<String>,
    /// OAuth2 client secret.
    pub oauth_client_secret: Option<String>,
    /// Redirect URI registered for the OAuth2 client.
    pub oauth_redirect_uri: Option<String>,
    /// Refresh token obtained out of band.
    pub oauth_refresh_token: Option<String>,
    /// Where OAuth2 tokens are persisted.
    pub oauth_token_path: Option<String>,
    /// Scopes overriding the per-product defaults.
    pub scopes: Option<Scopes>,
    /// Pre-acquired access token.
    pub access_token: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("service_account_path", &self.service_account_path)
            .field("oauth_client_id", &self.oauth_client_id)
            .field("oauth_client_secret", &Redact::from(&self.oauth_client_secret))
            .field("oauth_redirect_uri", &self.oauth_redirect_uri)
            .field("oauth_refresh_token", &Redact::from(&self.oauth_refresh_token))
            .field("oauth_token_path", &self.oauth_token_path)
            .field("scopes", &self.scopes)
            .field("access_token", &Redact::from(&self.access_token))
            .finish()
    }
}

impl Config {
    /// Create a new config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service account key file path.
    pub fn with_service_account_path(mut self, path: impl Into<String>) -> Self {
        self.service_account_path = Some(path.into());
        self
    }

    /// Set the OAuth2 client credentials.
    pub fn with_oauth_client(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.oauth_client_id = Some(client_id.into());
        self.oauth_client_secret = Some(client_secret.into());
        self
    }

    /// Set the OAuth2 redirect URI.
    pub fn with_oauth_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.oauth_redirect_uri = Some(uri.into());
        self
    }

    /// Set the OAuth2 refresh token.
    pub fn with_oauth_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.oauth_refresh_token = Some(token.into());
        self
    }

    /// Set the OAuth2 token file path.
    pub fn with_oauth_token_path(mut self, path: impl Into<String>) -> Self {
        self.oauth_token_path = Some(path.into());
        self
    }

    /// Set the scopes.
    pub fn with_scopes(mut self, scopes: Scopes) -> Self {
        self.scopes = Some(scopes);
        self
    }

    /// Load config from environment variables.
    ///
    /// Empty values are ignored. Paths have `~` expanded to the home directory.
    pub fn from_env(ctx: &Context) -> Self {
        let var = |key: &str| ctx.env_var(key).filter(|v| !v.trim().is_empty());
        let path = |key: &str| var(key).map(|v| ctx.expand_home_dir(&v).unwrap_or(v));

        Self {
            service_account_path: path(GOOGLE_SERVICE_ACCOUNT_PATH),
            oauth_client_id: var(GOOGLE_OAUTH_CLIENT_ID),
            oauth_client_secret: var(GOOGLE_OAUTH_CLIENT_SECRET),
            oauth_redirect_uri: var(GOOGLE_OAUTH_REDIRECT_URI),
            oauth_refresh_token: var(GOOGLE_OAUTH_REFRESH_TOKEN),
            oauth_token_path: path(GOOGLE_OAUTH_TOKEN_PATH),
            scopes: var(GOOGLE_SCOPES).map(|v| Scopes::parse(&v)),
            access_token: var(GOOGLE_ACCESS_TOKEN),
        }
    }

    /// Build the OAuth2 client configuration if both client ID and secret are set.
    pub fn oauth_client_config(&self) -> Option<OAuthClientConfig> {
        let id = self.oauth_client_id.as_ref()?;
        let secret = self.oauth_client_secret.as_ref()?;

        let mut config = OAuthClientConfig::new(id, secret);
        if let Some(uri) = &self.oauth_redirect_uri {
            config = config.with_redirect_uri(uri);
        }
        Some(config)
    }

    /// The configured scopes, or `default` when none are set.
    pub fn scopes_or(&self, default: &[&str]) -> Scopes {
        match &self.scopes {
            Some(scopes) if !scopes.is_empty() => scopes.clone(),
            _ => default.iter().copied().collect(),
        }
    }
}
