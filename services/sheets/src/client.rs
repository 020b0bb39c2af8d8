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

use gworkspace_auth::{OAuth2TokenProvider, OAuthClientConfig, ServiceAccountTokenProvider};
use gworkspace_core::utils::encode_path_segment;
use gworkspace_core::{Authenticate, Context, Error, Result, Scopes, TokenStore, Transport};
use log::debug;
use serde_json::Value;

use crate::types::{AppendValuesResponse, Dimension, ValueInputOption, ValueRange};

/// Default endpoint of the Sheets API.
pub const DEFAULT_ENDPOINT: &str = "https://sheets.googleapis.com";
/// Scopes requested unless overridden.
pub const DEFAULT_SCOPES: &[&str] = &["https://www.googleapis.com/auth/spreadsheets"];

fn default_scopes() -> Scopes {
    DEFAULT_SCOPES.iter().copied().collect()
}

/// Client for the Google Sheets API.
#[derive(Debug, Clone)]
pub struct Client {
    transport: Transport,
}

impl Client {
    /// Create a client authorized by an existing provider.
    pub fn new(ctx: Context, authenticator: impl Authenticate) -> Self {
        Self {
            transport: Transport::new(ctx, DEFAULT_ENDPOINT, authenticator, default_scopes()),
        }
    }

    /// Create a client authorized by a service account key file.
    pub async fn from_service_account_file(ctx: Context, path: &str) -> Result<Self> {
        let provider = ServiceAccountTokenProvider::from_file(&ctx, path).await?;
        Ok(Self::new(ctx, provider))
    }

    /// Create a client running the OAuth2 flow for `config`, keeping tokens in `store`.
    pub fn from_oauth2(ctx: Context, config: OAuthClientConfig, store: impl TokenStore) -> Self {
        Self::new(ctx, OAuth2TokenProvider::new(config).with_token_store(store))
    }

    /// Request `scopes` instead of the defaults. An empty set restores the defaults.
    pub fn with_scopes(mut self, scopes: Scopes) -> Self {
        let scopes = if scopes.is_empty() {
            default_scopes()
        } else {
            scopes
        };
        self.transport = self.transport.with_scopes(scopes);
        self
    }

    /// Send requests to `endpoint` instead of the default.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.transport = self.transport.with_endpoint(endpoint);
        self
    }

    /// Scopes requested for every call.
    pub fn scopes(&self) -> &Scopes {
        self.transport.scopes()
    }

    /// Append rows after the last row with data in `sheet_name`.
    ///
    /// Values are parsed as if typed into the UI. `range` optionally narrows the table
    /// the rows are appended to.
    pub async fn values_append(
        &self,
        spreadsheet_id: &str,
        sheet_name: &str,
        range: Option<&str>,
        values: Vec<Vec<Value>>,
    ) -> Result<AppendValuesResponse> {
        if spreadsheet_id.is_empty() {
            return Err(Error::request_invalid("spreadsheet id must not be empty"));
        }
        if sheet_name.is_empty() {
            return Err(Error::request_invalid("sheet name must not be empty"));
        }

        let body = ValueRange {
            range: range.map(str::to_string),
            major_dimension: Some(Dimension::Rows),
            values,
        };
        let path = format!(
            "/v4/spreadsheets/{}/values/{}:append",
            encode_path_segment(spreadsheet_id),
            encode_path_segment(sheet_name)
        );

        debug!("appending {} rows to {spreadsheet_id}/{sheet_name}", body.values.len());
        self.transport
            .post_json(
                &path,
                &[(
                    "valueInputOption",
                    ValueInputOption::UserEntered.as_str().to_string(),
                )],
                &body,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use gworkspace_auth::StaticTokenProvider;
    use gworkspace_core::{ErrorKind, HttpSend};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    struct Recorder {
        status: u16,
        body: &'static str,
        requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
    }

    #[async_trait::async_trait]
    impl HttpSend for Recorder {
        async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            self.requests.lock().unwrap().push(req);
            Ok(http::Response::builder()
                .status(self.status)
                .header(http::header::CONTENT_TYPE, "application/json; charset=UTF-8")
                .body(Bytes::from_static(self.body.as_bytes()))
                .unwrap())
        }
    }

    fn client(status: u16, body: &'static str) -> (Client, Recorder) {
        let _ = env_logger::builder().is_test(true).try_init();
        let recorder = Recorder {
            status,
            body,
            requests: Arc::default(),
        };
        let ctx = Context::new().with_http_send(recorder.clone());
        (Client::new(ctx, StaticTokenProvider::new("ya29.test")), recorder)
    }

    #[tokio::test]
    async fn test_values_append() {
        let (client, recorder) = client(
            200,
            r#"{"spreadsheetId":"sheet-id","tableRange":"Sheet1!A1:C3","updates":{"updatedRange":"Sheet1!A4:C4","updatedRows":1,"updatedColumns":3,"updatedCells":3}}"#,
        );

        let resp = client
            .values_append(
                "sheet-id",
                "Sheet1",
                None,
                vec![vec![
                    json!("Test Recipe"),
                    json!("test, ingredients, api"),
                    json!("This is a test recipe added via API"),
                ]],
            )
            .await
            .unwrap();
        assert_eq!(resp.table_range.as_deref(), Some("Sheet1!A1:C3"));
        assert_eq!(resp.updates.unwrap().updated_cells, Some(3));

        let requests = recorder.requests.lock().unwrap();
        let req = &requests[0];
        assert_eq!(req.method(), http::Method::POST);
        assert_eq!(
            req.uri().to_string(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-id/values/Sheet1:append?valueInputOption=USER_ENTERED"
        );
        assert_eq!(req.headers()[http::header::AUTHORIZATION], "Bearer ya29.test");

        let body: Value = serde_json::from_slice(req.body()).unwrap();
        assert_eq!(
            body,
            json!({
                "majorDimension": "ROWS",
                "values": [["Test Recipe", "test, ingredients, api", "This is a test recipe added via API"]],
            })
        );
    }

    #[tokio::test]
    async fn test_values_append_with_range_and_spaced_sheet() {
        let (client, recorder) = client(200, "{}");
        client
            .values_append("sheet-id", "My Sheet", Some("My Sheet!A1:B1"), vec![vec![json!(1)]])
            .await
            .unwrap();

        let requests = recorder.requests.lock().unwrap();
        assert_eq!(
            requests[0].uri().path(),
            "/v4/spreadsheets/sheet-id/values/My%20Sheet:append"
        );
        let body: Value = serde_json::from_slice(requests[0].body()).unwrap();
        assert_eq!(body["range"], "My Sheet!A1:B1");
    }

    #[tokio::test]
    async fn test_values_append_rejected() {
        let (client, _) = client(403, r#"{"error":{"code":403,"message":"The caller does not have permission","status":"PERMISSION_DENIED"}}"#);
        let err = client
            .values_append("sheet-id", "Sheet1", None, vec![])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedResponse);
        assert_eq!(err.status(), Some(http::StatusCode::FORBIDDEN));
        assert!(err.to_string().contains("PERMISSION_DENIED"));
    }

    #[tokio::test]
    async fn test_values_append_requires_ids() {
        let (client, recorder) = client(200, "{}");
        let err = client
            .values_append("", "Sheet1", None, vec![])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        assert!(recorder.requests.lock().unwrap().is_empty());
    }

    #[test]
    fn test_scopes() {
        let (client, _) = client(200, "{}");
        assert_eq!(client.scopes(), &default_scopes());

        let client = client.with_scopes(Scopes::from_iter(["https://www.googleapis.com/auth/drive"]));
        assert_eq!(client.scopes().len(), 1);
        assert!(client.scopes().iter().any(|s| s.ends_with("/drive")));

        let client = client.with_scopes(Scopes::new());
        assert_eq!(client.scopes(), &default_scopes());
    }
}
