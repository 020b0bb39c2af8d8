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

//! RFC 822 message builder for `drafts.create`.

use gworkspace_core::hash::{base64_encode, base64_url_encode};
use gworkspace_core::{Error, Result};

const CRLF: &str = "\r\n";

/// A plain text RFC 822 message.
///
/// The rendered message uses CRLF line endings throughout and has exactly one blank
/// line between the headers and the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MimeMessage {
    to: Vec<String>,
    cc: Vec<String>,
    subject: String,
    body: String,
}

impl MimeMessage {
    /// Create a message addressed to `to`.
    pub fn new<I, S>(to: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            to: to.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Add `Cc` recipients.
    pub fn with_cc<I, S>(mut self, cc: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cc.extend(cc.into_iter().map(Into::into));
        self
    }

    /// Set the `Subject` header, non-ASCII text is RFC 2047 encoded.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the plain text body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Render the message.
    ///
    /// Fails with [`ErrorKind::RequestInvalid`](gworkspace_core::ErrorKind::RequestInvalid)
    /// when there is no recipient or a header value contains a line break.
    pub fn to_rfc822(&self) -> Result<String> {
        if self.to.is_empty() {
            return Err(Error::request_invalid("message has no recipient"));
        }
        for value in self.to.iter().chain(&self.cc).chain([&self.subject]) {
            if value.contains(&['\r', '\n'][..]) {
                return Err(Error::request_invalid(format!(
                    "header value {value:?} contains a line break"
                )));
            }
        }

        let mut out = String::new();
        push_header(&mut out, "To", &self.to.join(", "));
        if !self.cc.is_empty() {
            push_header(&mut out, "Cc", &self.cc.join(", "));
        }
        push_header(&mut out, "Subject", &encode_header_value(&self.subject));
        push_header(&mut out, "MIME-Version", "1.0");
        push_header(&mut out, "Content-Type", "text/plain; charset=UTF-8");
        out.push_str(CRLF);
        out.push_str(&normalize_line_endings(&self.body));
        Ok(out)
    }

    /// The message as URL-safe base64 without padding, the `raw` field of a Gmail message.
    pub fn raw(&self) -> Result<String> {
        Ok(base64_url_encode(self.to_rfc822()?.as_bytes()))
    }
}

fn push_header(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push_str(": ");
    out.push_str(value);
    out.push_str(CRLF);
}

/// RFC 2047 encoded-word for non-ASCII header values.
fn encode_header_value(value: &str) -> String {
    if value.is_ascii() {
        value.to_string()
    } else {
        format!("=?UTF-8?B?{}?=", base64_encode(value.as_bytes()))
    }
}

fn normalize_line_endings(body: &str) -> String {
    body.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', CRLF)
}
