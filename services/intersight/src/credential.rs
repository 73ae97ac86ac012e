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

use intersight_core::utils::Redact;
use intersight_core::{Error, Result, SigningCredential};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::RsaPrivateKey;
use std::fmt::{Debug, Formatter};

/// Credential that holds the API key pair.
///
/// Once loaded it never changes: the signer caches it for the lifetime of the
/// client.
#[derive(Default, Clone)]
pub struct Credential {
    /// Public API key id, e.g. `596cc79e5d91b400010d15ad/596cc7945d91b400010d154e/5abbe2a67a78667776c127e0`.
    pub key_id: String,
    /// PEM encoded RSA private key.
    pub private_key: String,
}

impl Credential {
    /// Create a credential from a key id and a PEM encoded private key.
    pub fn new(key_id: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            private_key: private_key.into(),
        }
    }

    /// Parse the private key.
    ///
    /// Both PKCS#1 (`BEGIN RSA PRIVATE KEY`, what Intersight hands out) and
    /// PKCS#8 (`BEGIN PRIVATE KEY`) encodings are accepted.
    pub fn rsa_private_key(&self) -> Result<RsaPrivateKey> {
        let pem = self.private_key.trim();
        RsaPrivateKey::from_pkcs1_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs8_pem(pem))
            .map_err(|e| Error::credential_invalid("failed to parse private key").with_source(e))
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("key_id", &Redact::from(&self.key_id))
            .field("private_key", &Redact::from(&self.private_key))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.key_id.is_empty() && !self.private_key.is_empty()
    }
}
