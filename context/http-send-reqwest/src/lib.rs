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

//! Reqwest-based HTTP transport for gworkspace.
//!
//! ## Example
//!
//! ```no_run
//! use gworkspace_core::Context;
//! use gworkspace_http_send_reqwest::ReqwestHttpSend;
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), reqwest::Error> {
//! let client = reqwest::Client::builder()
//!     .timeout(Duration::from_secs(30))
//!     .build()?;
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use gworkspace_core::{Error, HttpSend, Result, MAX_ERROR_BODY_BYTES};
use http_body_util::BodyExt;
use reqwest::{Body, Client, Request};

/// Send requests with a shared [`reqwest::Client`].
///
/// Bodies of non-2xx responses are only read up to [`MAX_ERROR_BODY_BYTES`], the rest
/// is dropped unread.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req).map_err(|e| {
            Error::request_invalid("failed to convert http request").with_source(e)
        })?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| {
                Error::unexpected("failed to send http request")
                    .with_retryable(true)
                    .with_source(e)
            })?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = if parts.status.is_success() {
            BodyExt::collect(body).await.map(|buf| buf.to_bytes())
        } else {
            read_prefix(body, MAX_ERROR_BODY_BYTES).await
        };
        let bs = bs.map_err(|e| {
                Error::unexpected("failed to read http response body")
                    .with_retryable(true)
                    .with_source(e)
            })?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

async fn read_prefix(body: Body, limit: usize) -> std::result::Result<Bytes, reqwest::Error> {
    let mut body = std::pin::pin!(body);
    let mut buf = BytesMut::new();
    while buf.len() < limit {
        let Some(frame) = body.frame().await else {
            break;
        };
        if let Ok(data) = frame?.into_data() {
            let n = data.len().min(limit - buf.len());
            buf.extend_from_slice(&data[..n]);
        }
    }
    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gworkspace_core::ErrorKind;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one request with `status` and a body of `len` bytes, return its URL.
    async fn serve_once(status: u16, len: usize) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await.unwrap();
            let head = format!(
                "HTTP/1.1 {status} Whatever\r\ncontent-type: text/plain\r\ncontent-length: {len}\r\nconnection: close\r\n\r\n"
            );
            stream.write_all(head.as_bytes()).await.unwrap();
            // The client may hang up early, write errors are expected then.
            let _ = stream.write_all(&vec![b'x'; len]).await;
        });
        format!("http://{addr}/")
    }

    async fn get(url: &str) -> http::Response<Bytes> {
        let req = http::Request::builder().uri(url).body(Bytes::new()).unwrap();
        ReqwestHttpSend::default().http_send(req).await.unwrap()
    }

    #[tokio::test]
    async fn test_error_body_is_bounded() {
        let resp = get(&serve_once(500, 64 * 1024).await).await;
        assert_eq!(resp.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.body().len(), MAX_ERROR_BODY_BYTES);
    }

    #[tokio::test]
    async fn test_success_body_is_read_fully() {
        let resp = get(&serve_once(200, 64 * 1024).await).await;
        assert_eq!(resp.status(), http::StatusCode::OK);
        assert_eq!(resp.body().len(), 64 * 1024);
    }

    #[tokio::test]
    async fn test_connection_failure_is_retryable() {
        let req = http::Request::builder()
            .uri("http://127.0.0.1:1/token")
            .body(Bytes::new())
            .unwrap();

        let err = ReqwestHttpSend::default().http_send(req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert!(err.is_retryable());
    }
}
