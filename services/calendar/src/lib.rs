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

//! Google Calendar client.
//!
//! ```no_run
//! use gworkspace_calendar::{Client, Event, SendUpdates};
//! use gworkspace_core::time::{add_seconds, now};
//! use gworkspace_core::Context;
//!
//! # async fn example(ctx: Context) -> gworkspace_core::Result<()> {
//! let client = Client::from_service_account_file(ctx, "~/keys/sa.json").await?;
//! let start = now();
//! let event = Event::new("Sample Event", start, add_seconds(start, 3600)?)
//!     .with_description("Created through the Calendar API.")
//!     .with_location("Online");
//! let created = client
//!     .events_insert("primary", &event, SendUpdates::All)
//!     .await?;
//! println!("{:?}", created.html_link);
//! # Ok(())
//! # }
//! ```

mod client;
pub use client::{Client, DEFAULT_ENDPOINT, DEFAULT_SCOPES};

mod types;
pub use types::{Event, EventAttendee, EventDateTime, SendUpdates};
