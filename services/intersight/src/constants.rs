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

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// Default API base used when none is configured.
pub const DEFAULT_API_URI: &str = "https://intersight.com/api/v1";

/// Signature algorithm announced in the Authorization header.
pub const SIGNATURE_ALGORITHM: &str = "rsa-sha256";

/// Moids are fixed length identifiers.
pub const MOID_LENGTH: usize = 24;

/// Body used whenever a request has nothing to send.
pub const EMPTY_BODY: &[u8] = b"{}";

// Env values used by the config loader.
pub const INTERSIGHT_API_URI: &str = "INTERSIGHT_API_URI";
pub const INTERSIGHT_API_KEY_ID: &str = "INTERSIGHT_API_KEY_ID";
pub const INTERSIGHT_API_PRIVATE_KEY: &str = "INTERSIGHT_API_PRIVATE_KEY";

// Well known fields of Intersight responses.
pub const RESULTS_FIELD: &str = "Results";
pub const MOID_FIELD: &str = "Moid";

/// Resource path of the server summaries.
pub const PHYSICAL_SUMMARIES_PATH: &str = "/compute/PhysicalSummaries";

/// Query keys and values keep only unreserved characters, everything else
/// (including `/`, `$` and `'`) is percent encoded.
pub static QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
