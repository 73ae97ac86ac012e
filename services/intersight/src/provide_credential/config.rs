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

use super::utils::load_private_key;
use crate::{Config, Credential};
use async_trait::async_trait;
use intersight_core::{Context, ProvideCredential, Result};
use log::debug;
use std::sync::Arc;

/// ConfigCredentialProvider loads the credential from an explicit [`Config`].
///
/// Returns `None` unless both the key id and the private key are set.
#[derive(Debug, Clone)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new ConfigCredentialProvider.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let (Some(key_id), Some(private_key)) =
            (&self.config.api_key_id, &self.config.api_private_key)
        else {
            return Ok(None);
        };

        debug!("loading credential from config");
        let private_key = load_private_key(ctx, private_key).await?;
        Ok(Some(Credential::new(key_id, private_key)))
    }
}
