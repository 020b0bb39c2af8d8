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

// Env values used to configure gworkspace authentication.
pub const GOOGLE_SERVICE_ACCOUNT_PATH: &str = "GOOGLE_SERVICE_ACCOUNT_PATH";
pub const GOOGLE_OAUTH_CLIENT_ID: &str = "GOOGLE_OAUTH_CLIENT_ID";
pub const GOOGLE_OAUTH_CLIENT_SECRET: &str = "GOOGLE_OAUTH_CLIENT_SECRET";
pub const GOOGLE_OAUTH_REDIRECT_URI: &str = "GOOGLE_OAUTH_REDIRECT_URI";
pub const GOOGLE_OAUTH_REFRESH_TOKEN: &str = "GOOGLE_OAUTH_REFRESH_TOKEN";
pub const GOOGLE_OAUTH_TOKEN_PATH: &str = "GOOGLE_OAUTH_TOKEN_PATH";
pub const GOOGLE_SCOPES: &str = "GOOGLE_SCOPES";
pub const GOOGLE_ACCESS_TOKEN: &str = "GOOGLE_ACCESS_TOKEN";

/// Google's OAuth2 token endpoint.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
/// Google's OAuth2 consent endpoint.
pub const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
/// Loopback redirect used by installed applications.
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost";

pub(crate) const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
pub(crate) const JWT_LIFETIME_SECS: u64 = 3600;
