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

//! Gmail client.
//!
//! ```no_run
//! use gworkspace_gmail::{Client, MimeMessage};
//!
//! # async fn example(client: Client) -> gworkspace_core::Result<()> {
//! let message = MimeMessage::new(["someone@example.com"])
//!     .with_subject("Hello")
//!     .with_body("Drafted through the Gmail API.");
//! let draft = client.drafts_create(&message).await?;
//! println!("draft {:?}", draft.id);
//! # Ok(())
//! # }
//! ```

mod client;
pub use client::{Client, DEFAULT_ENDPOINT, DEFAULT_SCOPES};

mod mime;
pub use mime::MimeMessage;

mod types;
pub use types::{Draft, Message};
