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

//! Google Docs client.
//!
//! ```no_run
//! use gworkspace_core::Context;
//! use gworkspace_docs::types::{InsertTextRequest, TextStyle, UpdateTextStyleRequest};
//! use gworkspace_docs::{Client, Request};
//!
//! # async fn example(ctx: Context) -> gworkspace_core::Result<()> {
//! let client = Client::from_service_account_file(ctx, "~/keys/sa.json").await?;
//! client
//!     .documents_batch_update("doc-id", &[Request::insert_text(InsertTextRequest::at_end("\nText from API\n"))])
//!     .await?;
//!
//! let doc = client.documents_get("doc-id").await?;
//! if let Some(last) = doc.last_element() {
//!     let bold = UpdateTextStyleRequest {
//!         range: last.range(),
//!         text_style: TextStyle { bold: Some(true), ..Default::default() },
//!         fields: "*".to_string(),
//!     };
//!     client.documents_batch_update("doc-id", &[Request::update_text_style(bold)]).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub use client::{Client, DEFAULT_ENDPOINT, DEFAULT_SCOPES};

pub mod types;
pub use types::{BatchUpdateDocumentResponse, Document, Request};
