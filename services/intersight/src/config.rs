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

use crate::constants::*;
use intersight_core::utils::Redact;
use intersight_core::Context;
use std::fmt::{Debug, Formatter};

/// Config for the Intersight client.
#[derive(Clone, Default)]
pub struct Config {
    /// API base uri, defaults to `https://intersight.com/api/v1`.
    pub api_uri: Option<String>,
    /// Public API key id.
    pub api_key_id: Option<String>,
    /// Private key: either a path to a PEM file or the PEM content itself.
    pub api_private_key: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_uri", &self.api_uri)
            .field("api_key_id", &Redact::from(&self.api_key_id))
            .field("api_private_key", &Redact::from(&self.api_private_key))
            .finish()
    }
}

impl Config {
    /// Load config from environment variables.
    ///
    /// - `INTERSIGHT_API_URI`
    /// - `INTERSIGHT_API_KEY_ID`
    /// - `INTERSIGHT_API_PRIVATE_KEY`
    pub fn from_env(ctx: &Context) -> Self {
        Self {
            api_uri: ctx.env_var(INTERSIGHT_API_URI),
            api_key_id: ctx.env_var(INTERSIGHT_API_KEY_ID),
            api_private_key: ctx.env_var(INTERSIGHT_API_PRIVATE_KEY),
        }
    }

    /// Fill unset fields from `other`.
    pub fn merge(self, other: Config) -> Self {
        Self {
            api_uri: self.api_uri.or(other.api_uri),
            api_key_id: self.api_key_id.or(other.api_key_id),
            api_private_key: self.api_private_key.or(other.api_private_key),
        }
    }

    /// The API base uri to use.
    pub fn api_uri(&self) -> &str {
        self.api_uri.as_deref().unwrap_or(DEFAULT_API_URI)
    }
}
