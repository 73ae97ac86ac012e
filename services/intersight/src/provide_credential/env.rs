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

use super::ConfigCredentialProvider;
use crate::{Config, Credential};
use async_trait::async_trait;
use intersight_core::{Context, ProvideCredential, Result};
use std::sync::Arc;

/// EnvCredentialProvider loads the credential from environment variables.
///
/// This provider looks for the following environment variables:
/// - `INTERSIGHT_API_KEY_ID`: The public API key id
/// - `INTERSIGHT_API_PRIVATE_KEY`: The path to the PEM private key, or the PEM itself
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider {}

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        ConfigCredentialProvider::new(Arc::new(Config::from_env(ctx)))
            .provide_credential(ctx)
            .await
    }
}
