use std::sync::{Arc, Mutex};
use std::time::Duration;

use gworkspace_auth::{
    AuthorizationCodeCallback, AuthorizationUrl, OAuth2TokenProvider, OAuthClientConfig,
};
use gworkspace_core::hash::base64_url_sha256;
use gworkspace_core::time::now;
use gworkspace_core::{
    Authenticate, Credential, ErrorKind, InMemoryTokenStore, Result, Scopes, TokenStore,
};
use gworkspace_token_store_tokio::TokioFileTokenStore;
use pretty_assertions::assert_eq;

use crate::mock::{MockTokenEndpoint, Reply};

fn config() -> OAuthClientConfig {
    OAuthClientConfig::new("client-id.apps.googleusercontent.com", "GOCSPX-secret")
}

fn scopes() -> Scopes {
    Scopes::from_iter([
        "https://www.googleapis.com/auth/gmail.modify",
        "https://www.googleapis.com/auth/drive",
    ])
}

fn expired(access_token: &str, refresh_token: &str) -> Credential {
    Credential::new(access_token)
        .with_expires_at(now() - chrono::TimeDelta::try_minutes(5).unwrap())
        .with_refresh_token(refresh_token)
}

const CODE_RESPONSE: &str = r#"{"access_token":"ya29.from-code","expires_in":3599,"refresh_token":"1//first","scope":"https://www.googleapis.com/auth/drive https://www.googleapis.com/auth/gmail.modify","token_type":"Bearer"}"#;

#[tokio::test]
async fn test_no_grant_requires_authorization() {
    let endpoint = MockTokenEndpoint::new();
    let provider = OAuth2TokenProvider::new(config());

    let err = provider
        .authenticate(&endpoint.context(), &scopes())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AuthorizationRequired);
    assert_eq!(endpoint.calls(), 0);
}

#[tokio::test]
async fn test_authorization_code_exchange() -> Result<()> {
    let endpoint = MockTokenEndpoint::new();
    endpoint.push(Reply::Status(200, CODE_RESPONSE.to_string()));
    let ctx = endpoint.context();

    let store = Arc::new(InMemoryTokenStore::new());
    let provider = OAuth2TokenProvider::new(config())
        .with_token_store(store.clone())
        .with_authorization_code("4/0Acode");

    let cred = provider.authenticate(&ctx, &scopes()).await?;
    assert_eq!(cred.access_token, "ya29.from-code");
    assert_eq!(cred.refresh_token.as_deref(), Some("1//first"));
    assert_eq!(cred.scopes, scopes());
    assert_eq!(store.get().await?, Some(cred.clone()));

    let form = endpoint.form(0);
    assert_eq!(form["grant_type"], "authorization_code");
    assert_eq!(form["code"], "4/0Acode");
    assert_eq!(form["client_id"], "client-id.apps.googleusercontent.com");
    assert_eq!(form["client_secret"], "GOCSPX-secret");
    assert_eq!(form["redirect_uri"], "http://localhost");
    assert!(!form.contains_key("code_verifier"));

    // Cached afterwards.
    assert_eq!(provider.authenticate(&ctx, &scopes()).await?, cred);
    assert_eq!(endpoint.calls(), 1);
    Ok(())
}

#[tokio::test]
async fn test_authorization_code_is_used_once() {
    let endpoint = MockTokenEndpoint::new();
    endpoint.push(Reply::Status(
        400,
        r#"{"error":"invalid_grant","error_description":"Malformed auth code."}"#.to_string(),
    ));
    let ctx = endpoint.context();
    let provider = OAuth2TokenProvider::new(config()).with_authorization_code("4/0Abad");

    let err = provider.authenticate(&ctx, &scopes()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TokenExchange);

    let err = provider.authenticate(&ctx, &scopes()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AuthorizationRequired);
    assert_eq!(endpoint.calls(), 1);
}

#[tokio::test]
async fn test_refresh_with_seeded_refresh_token() -> Result<()> {
    let endpoint = MockTokenEndpoint::new();
    let ctx = endpoint.context();
    let provider = OAuth2TokenProvider::new(config()).with_refresh_token("1//seed");

    let cred = provider.authenticate(&ctx, &scopes()).await?;
    assert_eq!(cred.access_token, "ya29.token-0");
    assert_eq!(cred.refresh_token.as_deref(), Some("1//seed"));

    let form = endpoint.form(0);
    assert_eq!(form["grant_type"], "refresh_token");
    assert_eq!(form["refresh_token"], "1//seed");
    assert_eq!(form["client_secret"], "GOCSPX-secret");
    Ok(())
}

#[tokio::test]
async fn test_expired_token_is_refreshed_from_store() -> Result<()> {
    let endpoint = MockTokenEndpoint::new();
    let ctx = endpoint.context();

    let store = Arc::new(InMemoryTokenStore::with_credential(expired("ya29.old", "1//stored")));
    let provider = OAuth2TokenProvider::new(config())
        .with_token_store(store.clone())
        .with_refresh_token("1//seed-is-ignored");

    let cred = provider.authenticate(&ctx, &scopes()).await?;
    assert_eq!(cred.access_token, "ya29.token-0");
    assert_eq!(endpoint.form(0)["refresh_token"], "1//stored");
    assert_eq!(store.get().await?.unwrap().refresh_token.as_deref(), Some("1//stored"));
    Ok(())
}

#[tokio::test]
async fn test_rotated_refresh_token_replaces_old_one() -> Result<()> {
    let endpoint = MockTokenEndpoint::new();
    endpoint.push(Reply::Status(
        200,
        r#"{"access_token":"ya29.rotated","expires_in":3599,"refresh_token":"1//rotated"}"#
            .to_string(),
    ));
    let ctx = endpoint.context();

    let store = Arc::new(InMemoryTokenStore::with_credential(expired("ya29.old", "1//old")));
    let provider = OAuth2TokenProvider::new(config()).with_token_store(store.clone());

    provider.authenticate(&ctx, &scopes()).await?;
    let stored = store.get().await?.unwrap();
    assert_eq!(stored.access_token, "ya29.rotated");
    assert_eq!(stored.refresh_token.as_deref(), Some("1//rotated"));
    Ok(())
}

#[tokio::test]
async fn test_invalid_grant_is_not_retryable() {
    let endpoint = MockTokenEndpoint::new();
    endpoint.push(Reply::Status(
        400,
        r#"{"error":"invalid_grant","error_description":"Token has been expired or revoked."}"#
            .to_string(),
    ));
    let ctx = endpoint.context();

    let store = Arc::new(InMemoryTokenStore::with_credential(expired("ya29.old", "1//revoked")));
    let provider = OAuth2TokenProvider::new(config()).with_token_store(store.clone());

    let err = provider.authenticate(&ctx, &scopes()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TokenExchange);
    assert!(!err.is_retryable());
    assert_eq!(err.status(), Some(http::StatusCode::BAD_REQUEST));
    assert!(err.to_string().contains("invalid_grant"));

    // The revoked refresh token is dropped from the store and never sent again.
    let stored = store.get().await.unwrap().unwrap();
    assert_eq!(stored.refresh_token, None);
    assert_eq!(stored.access_token, "ya29.old");

    let err = provider.authenticate(&ctx, &scopes()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AuthorizationRequired);
    assert_eq!(endpoint.calls(), 1);
}

const INVALID_GRANT_BODY: &str =
    r#"{"error":"invalid_grant","error_description":"Token has been expired or revoked."}"#;

#[tokio::test]
async fn test_revoked_refresh_token_falls_back_to_authorization_code() -> Result<()> {
    let endpoint = MockTokenEndpoint::new();
    endpoint.push(Reply::Status(400, INVALID_GRANT_BODY.to_string()));
    endpoint.push(Reply::Status(200, CODE_RESPONSE.to_string()));
    let ctx = endpoint.context();

    let store = Arc::new(InMemoryTokenStore::with_credential(expired("ya29.old", "1//revoked")));
    let provider = OAuth2TokenProvider::new(config())
        .with_token_store(store.clone())
        .with_authorization_code("4/0Afresh");

    let cred = provider.authenticate(&ctx, &scopes()).await?;
    assert_eq!(cred.access_token, "ya29.from-code");
    assert_eq!(cred.refresh_token.as_deref(), Some("1//first"));
    assert_eq!(store.get().await?, Some(cred));

    assert_eq!(endpoint.calls(), 2);
    assert_eq!(endpoint.form(0)["grant_type"], "refresh_token");
    assert_eq!(endpoint.form(0)["refresh_token"], "1//revoked");
    assert_eq!(endpoint.form(1)["grant_type"], "authorization_code");
    assert_eq!(endpoint.form(1)["code"], "4/0Afresh");
    Ok(())
}

#[tokio::test]
async fn test_revoked_seed_is_not_resent() {
    let endpoint = MockTokenEndpoint::new();
    endpoint.push(Reply::Status(400, INVALID_GRANT_BODY.to_string()));
    let ctx = endpoint.context();
    let provider = OAuth2TokenProvider::new(config()).with_refresh_token("1//revoked-seed");

    let err = provider.authenticate(&ctx, &scopes()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TokenExchange);
    assert!(!err.is_retryable());

    let err = provider.authenticate(&ctx, &scopes()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AuthorizationRequired);
    assert_eq!(endpoint.calls(), 1);
}

#[tokio::test]
async fn test_server_error_is_retryable() -> Result<()> {
    let endpoint = MockTokenEndpoint::new();
    endpoint.push(Reply::Status(500, "Internal Server Error".to_string()));
    let ctx = endpoint.context();
    let provider = OAuth2TokenProvider::new(config()).with_refresh_token("1//seed");

    let err = provider.authenticate(&ctx, &scopes()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TokenExchange);
    assert!(err.is_retryable());

    // No internal retry: the caller retries and succeeds.
    assert_eq!(endpoint.calls(), 1);
    provider.authenticate(&ctx, &scopes()).await?;
    assert_eq!(endpoint.calls(), 2);
    Ok(())
}

#[tokio::test]
async fn test_network_failure_is_retryable() {
    let endpoint = MockTokenEndpoint::new();
    endpoint.push(Reply::Fail);
    let provider = OAuth2TokenProvider::new(config()).with_refresh_token("1//seed");

    let err = provider
        .authenticate(&endpoint.context(), &scopes())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TokenExchange);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_concurrent_refresh_is_single_flight() -> Result<()> {
    let endpoint = MockTokenEndpoint::with_delay(Duration::from_millis(50));
    let ctx = endpoint.context();
    let provider = Arc::new(OAuth2TokenProvider::new(config()).with_refresh_token("1//seed"));

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let provider = provider.clone();
            let ctx = ctx.clone();
            tokio::spawn(async move { provider.authenticate(&ctx, &scopes()).await })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap()?.access_token, "ya29.token-0");
    }
    assert_eq!(endpoint.calls(), 1);
    Ok(())
}

#[derive(Debug, Default)]
struct RecordingCallback {
    urls: Mutex<Vec<AuthorizationUrl>>,
}

#[async_trait::async_trait]
impl AuthorizationCodeCallback for RecordingCallback {
    async fn authorization_code(&self, url: &AuthorizationUrl) -> Result<String> {
        self.urls.lock().unwrap().push(url.clone());
        Ok("4/0Acallback".to_string())
    }
}

#[tokio::test]
async fn test_code_callback_with_pkce() -> Result<()> {
    let endpoint = MockTokenEndpoint::new();
    endpoint.push(Reply::Status(200, CODE_RESPONSE.to_string()));
    let ctx = endpoint.context();

    let callback = Arc::new(RecordingCallback::default());
    let provider = OAuth2TokenProvider::new(config()).with_code_callback(callback.clone());

    let cred = provider.authenticate(&ctx, &scopes()).await?;
    assert_eq!(cred.refresh_token.as_deref(), Some("1//first"));

    let urls = callback.urls.lock().unwrap();
    assert_eq!(urls.len(), 1);
    let (_, qs) = urls[0].url.split_once('?').unwrap();
    let challenge = form_urlencoded::parse(qs.as_bytes())
        .find(|(k, _)| k == "code_challenge")
        .map(|(_, v)| v.into_owned())
        .unwrap();

    let form = endpoint.form(0);
    assert_eq!(form["code"], "4/0Acallback");
    assert_eq!(base64_url_sha256(form["code_verifier"].as_bytes()), challenge);
    Ok(())
}

#[tokio::test]
async fn test_persisted_tokens_survive_restart() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token.json");

    let endpoint = MockTokenEndpoint::new();
    endpoint.push(Reply::Status(200, CODE_RESPONSE.to_string()));
    let ctx = endpoint.context();

    let first = OAuth2TokenProvider::new(config())
        .with_token_store(TokioFileTokenStore::new(&path))
        .with_authorization_code("4/0Acode");
    let cred = first.authenticate(&ctx, &scopes()).await?;

    // A new process: no code, no seed, same file.
    let second = OAuth2TokenProvider::new(config()).with_token_store(TokioFileTokenStore::new(&path));
    assert_eq!(second.authenticate(&ctx, &scopes()).await?, cred);
    assert_eq!(endpoint.calls(), 1);
    Ok(())
}
