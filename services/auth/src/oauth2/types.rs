//! OAuth2 wire types for Google's token endpoint.

use serde::Deserialize;

/// Token endpoint success response, shared by the JWT bearer, authorization code and
/// refresh token grants.
#[derive(Debug, Clone, Deserialize)]
#[allow(dead_code)]
pub struct TokenResponse {
    /// The access token issued by the authorization server.
    pub access_token: String,

    /// The lifetime in seconds of the access token.
    #[serde(default)]
    pub expires_in: Option<u64>,

    /// Present on the authorization code grant, and when the refresh token is rotated.
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Space separated scopes actually granted.
    #[serde(default)]
    pub scope: Option<String>,

    /// The type of token issued (typically "Bearer").
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Token endpoint error response, RFC 6749 section 5.2.
#[derive(Debug, Clone, Deserialize)]
#[allow(dead_code)]
pub struct ErrorResponse {
    /// Error code such as `invalid_grant`.
    pub error: String,

    /// Human readable explanation.
    #[serde(default)]
    pub error_description: Option<String>,
}
