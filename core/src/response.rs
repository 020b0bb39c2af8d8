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

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::StatusCode;
use log::debug;
use serde::de::DeserializeOwned;

use crate::{Error, Result};

/// Upper bound of the body snippet kept in [`ErrorKind::UnexpectedResponse`](crate::ErrorKind::UnexpectedResponse).
pub const MAX_ERROR_BODY_BYTES: usize = 1024;

/// Body of a documented response.
#[derive(Debug, Clone, PartialEq)]
pub enum Body<T> {
    /// Structured payload, the common case.
    Json(T),
    /// `text/*` payload.
    Text(String),
    /// Anything else.
    Binary(Bytes),
}

/// ApiResponse is the envelope produced by the transport for every call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    /// The remote returned a documented success.
    Ok(Body<T>),
    /// The remote returned a status the operation does not document.
    Undocumented {
        /// Raw status code.
        status: StatusCode,
        /// Raw body, if any was sent.
        body: Option<Bytes>,
    },
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Classify a raw HTTP response.
    ///
    /// Any `2xx` is a success. The body is decoded according to its `Content-Type`;
    /// a success without a content type is decoded as JSON.
    pub fn from_http(resp: http::Response<Bytes>) -> Result<Self> {
        let (parts, body) = resp.into_parts();

        if !parts.status.is_success() {
            debug!("undocumented response status: {}", parts.status);
            return Ok(ApiResponse::Undocumented {
                status: parts.status,
                body: (!body.is_empty()).then_some(body),
            });
        }

        let content_type = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase());

        let body = match content_type.as_deref() {
            None => Body::Json(decode_json(&body)?),
            Some(ct) if ct.starts_with("application/json") || ct.contains("+json") => {
                Body::Json(decode_json(&body)?)
            }
            Some(ct) if ct.starts_with("text/") => {
                Body::Text(String::from_utf8_lossy(&body).into_owned())
            }
            Some(_) => Body::Binary(body),
        };
        Ok(ApiResponse::Ok(body))
    }
}

impl<T> ApiResponse<T> {
    /// Return the structured payload or fail.
    ///
    /// An undocumented response is turned into [`Error::unexpected_response`] carrying at
    /// most [`MAX_ERROR_BODY_BYTES`] of the body decoded as text.
    pub fn into_json(self) -> Result<T> {
        match self {
            ApiResponse::Ok(Body::Json(v)) => Ok(v),
            ApiResponse::Ok(Body::Text(_)) => Err(Error::unexpected(
                "expected a JSON response body, got text",
            )),
            ApiResponse::Ok(Body::Binary(_)) => Err(Error::unexpected(
                "expected a JSON response body, got binary content",
            )),
            ApiResponse::Undocumented { status, body } => {
                Err(Error::unexpected_response(status, body.map(|bs| snippet(&bs))))
            }
        }
    }
}

/// Decode the start of `bs` as text, at most [`MAX_ERROR_BODY_BYTES`] bytes long.
///
/// Invalid UTF-8 is replaced and a character split by the cut is dropped.
pub fn snippet(bs: &[u8]) -> String {
    let end = bs.len().min(MAX_ERROR_BODY_BYTES);
    let mut text = String::from_utf8_lossy(&bs[..end]).into_owned();
    let mut cut = text.len().min(MAX_ERROR_BODY_BYTES);
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
    text
}

fn decode_json<T: DeserializeOwned>(bs: &[u8]) -> Result<T> {
    // Google APIs answer some calls with an empty 200, which is `{}` for our purposes.
    let bs = if bs.is_empty() { b"{}".as_slice() } else { bs };
    serde_json::from_slice(bs).map_err(|e| {
        Error::unexpected(format!("failed to decode response body: {e}")).with_source(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Payload {
        id: String,
    }

    fn response(status: u16, content_type: Option<&str>, body: impl Into<Bytes>) -> http::Response<Bytes> {
        let mut builder = http::Response::builder().status(status);
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        builder.body(body.into()).unwrap()
    }

    #[test]
    fn test_json_success_is_returned_unchanged() {
        let resp = response(200, Some("application/json; charset=UTF-8"), r#"{"id":"doc-1"}"#);
        let payload = ApiResponse::<Payload>::from_http(resp)
            .unwrap()
            .into_json()
            .unwrap();
        assert_eq!(payload, Payload { id: "doc-1".to_string() });
    }

    #[test]
    fn test_success_without_content_type_is_json() {
        let resp = response(200, None, r#"{"id":"x"}"#);
        let r = ApiResponse::<Payload>::from_http(resp).unwrap();
        assert_eq!(r, ApiResponse::Ok(Body::Json(Payload { id: "x".to_string() })));
    }

    #[test]
    fn test_text_and_binary_bodies() {
        let r = ApiResponse::<Payload>::from_http(response(200, Some("text/plain"), "hello")).unwrap();
        assert_eq!(r, ApiResponse::Ok(Body::Text("hello".to_string())));
        assert_eq!(r.into_json().unwrap_err().kind(), ErrorKind::Unexpected);

        let r = ApiResponse::<Payload>::from_http(response(
            200,
            Some("application/octet-stream"),
            vec![0u8, 1, 2],
        ))
        .unwrap();
        assert_eq!(r, ApiResponse::Ok(Body::Binary(Bytes::from_static(&[0, 1, 2]))));
    }

    #[test]
    fn test_forbidden_body_is_bounded() {
        let body = "x".repeat(4096);
        let err = ApiResponse::<Payload>::from_http(response(403, Some("application/json"), body))
            .unwrap()
            .into_json()
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnexpectedResponse);
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(err.body().map(str::len), Some(MAX_ERROR_BODY_BYTES));
        assert_eq!(err.to_string(), format!("HTTP 403: {}", "x".repeat(1024)));
    }

    #[test]
    fn test_snippet_does_not_split_characters() {
        let body = format!("{}é and more", "x".repeat(MAX_ERROR_BODY_BYTES - 1));
        let text = snippet(body.as_bytes());
        assert!(text.len() <= MAX_ERROR_BODY_BYTES);
        assert_eq!(text, "x".repeat(MAX_ERROR_BODY_BYTES - 1));

        let text = snippet(&[0xff; MAX_ERROR_BODY_BYTES]);
        assert!(text.len() <= MAX_ERROR_BODY_BYTES);
        assert!(text.chars().all(|c| c == char::REPLACEMENT_CHARACTER));

        assert_eq!(snippet("déjà vu".as_bytes()), "déjà vu");
    }

    #[test]
    fn test_undocumented_without_body() {
        let err = ApiResponse::<Payload>::from_http(response(404, None, Bytes::new()))
            .unwrap()
            .into_json()
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.body(), None);
        assert_eq!(err.to_string(), "HTTP 404");
    }

    #[test]
    fn test_malformed_json_success() {
        let err = ApiResponse::<Payload>::from_http(response(200, Some("application/json"), "{")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }
}
