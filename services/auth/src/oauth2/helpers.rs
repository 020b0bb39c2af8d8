//! OAuth2 helper functions for Google's token endpoint.

use http::header::{ACCEPT, CONTENT_TYPE};
use http::{Method, StatusCode};
use log::{debug, error};

use gworkspace_core::snippet;
use gworkspace_core::time::{add_seconds, now};
use gworkspace_core::{Context, Credential, Error, ErrorKind, Result, Scopes};

use super::types::{ErrorResponse, TokenResponse};

/// Error code returned for revoked, expired or already used grants.
pub const INVALID_GRANT: &str = "invalid_grant";

/// POST `params` as a form to `token_uri` and parse the token response.
///
/// Failures are reported as [`ErrorKind::TokenExchange`](gworkspace_core::ErrorKind::TokenExchange):
///
/// - transport failures, `408`, `429` and `5xx` are retryable
/// - `invalid_grant` and every other rejection are not
pub async fn exchange_token(
    ctx: &Context,
    token_uri: &str,
    params: &[(&str, &str)],
) -> Result<TokenResponse> {
    let body = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();

    let req = http::Request::builder()
        .method(Method::POST)
        .uri(token_uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(ACCEPT, "application/json")
        .body(body.into_bytes().into())
        .map_err(|e| Error::request_invalid("failed to build token request").with_source(e))?;

    let resp = ctx.http_send(req).await.map_err(|e| {
        Error::token_exchange(format!("failed to send token request to {token_uri}"))
            .with_retryable(true)
            .with_source(e)
    })?;

    let status = resp.status();
    if !status.is_success() {
        error!("token exchange at {token_uri} got unexpected status: {status}");
        return Err(classify_failure(status, resp.body()));
    }

    debug!("token exchange at {token_uri} succeeded");
    serde_json::from_slice(resp.body()).map_err(|e| {
        Error::token_exchange("failed to parse token response")
            .with_status(status)
            .with_source(e)
    })
}

fn classify_failure(status: StatusCode, body: &[u8]) -> Error {
    let text = snippet(body);
    let code = serde_json::from_slice::<ErrorResponse>(body)
        .ok()
        .map(|e| e.error);

    let retryable = code.as_deref() != Some(INVALID_GRANT)
        && (status.is_server_error()
            || status == StatusCode::REQUEST_TIMEOUT
            || status == StatusCode::TOO_MANY_REQUESTS);

    let message = match code.as_deref() {
        Some(INVALID_GRANT) => format!(
            "token endpoint rejected the grant, re-authorization required: HTTP {}: {}",
            status.as_u16(),
            text
        ),
        _ => format!("token exchange failed: HTTP {}: {}", status.as_u16(), text),
    };

    Error::token_exchange(message)
        .with_status(status)
        .with_body(text)
        .with_retryable(retryable)
}

/// Check if `err` is the token endpoint rejecting a grant with `invalid_grant`.
pub(crate) fn is_invalid_grant(err: &Error) -> bool {
    err.kind() == ErrorKind::TokenExchange
        && err
            .body()
            .and_then(|body| serde_json::from_str::<ErrorResponse>(body).ok())
            .is_some_and(|resp| resp.error == INVALID_GRANT)
}

/// Turn a token response into a [`Credential`] issued for `scopes`.
///
/// A response without `expires_in` yields a credential that never expires.
pub fn credential_from_response(resp: TokenResponse, scopes: Scopes) -> Result<Credential> {
    let mut cred = Credential::new(resp.access_token).with_scopes(scopes);
    if let Some(expires_in) = resp.expires_in {
        cred = cred.with_expires_at(add_seconds(now(), expires_in)?);
    }
    cred.refresh_token = resp.refresh_token;
    Ok(cred)
}
