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

use crate::common::*;
use anyhow::Result;
use intersight_core::hash::base64_decode;
use intersight_core::time::format_http_date;
use intersight_rest::{content_digest, string_to_sign, Operation};
use pretty_assertions::assert_eq;
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::pkcs8::DecodePublicKey;
use rsa::sha2::Sha256;
use rsa::signature::Verifier;
use rsa::RsaPublicKey;
use serde_json::json;

const GET_SIGNATURE: &str = "EZ6Ecld/73AL63LgCvIyPYXTxoT82oVDq/hzwmFpKgglrmQ/STiEOesdFo2sPWyuqeVVPzTZ6PilTaPJSUfxnM+JXOj+CvWZINWbURIuLKWDt8uSRRIqqo+qgp8tcrEVoF6JDp2r071hvBIleAFNAeRgK4NQJWoFJgXlsNNpXLsYJj56dvIDkjlMzKZKZE96PgS69TnEixSIqDrDhktjc0ht4JjmIMe589lQUcYje+zu+uDDPL+NZCjgAOcyiGXe6I0E3RSEXKTljnNpPbta+NR6tTo+JN1pdHc8gmmUSm3avPysvP+4s+EgcYmpjSo5TWFP4T8NkHcv+0fthGjuvA==";
const PATCH_SIGNATURE: &str = "bQ53p8Al9gu+CZHtWBgaBcNj8c57qn64POoR622d/4TWeOqnBFaM9LAWeMRyvsryTaMS33KbzDQJK/hhYb/BuO9u01VXsJX86rqHObZgkklEk0qEqLH5aZXBkiWJv1pR1ulb/oKV4MDQ5HgTJhVEi2HzSTJhcKt4sLVmBi4pFhYYQVmqNCrylxH0sK0pqUHG08nYF5+tIIjFXFeHvUkCHEpBur412+c+YRPfZ2X51sXdcOA+ZUgVhuk24bpg9qeymxCe5GxfpdKWtDtp01ts7hSCiCYAfm3v9wCxr1uWSWUYG6s+Ec+5bG04CIskVGjJH+e/umBgp2Y22vyT8QknZg==";

/// Rebuild the signing string from what went on the wire and check the
/// signature against the public key.
fn verify(req: &Recorded, signed_body: &[u8]) -> Result<()> {
    let target = format!(
        "{} {}",
        req.method.as_str().to_lowercase(),
        req.uri.path_and_query().map(|v| v.as_str()).unwrap_or("/")
    );
    let digest = content_digest(signed_body);
    assert_eq!(req.header("digest"), digest);

    let s = string_to_sign(
        &target,
        &[
            ("date", req.header("date")),
            ("host", req.header("host")),
            ("digest", digest.as_str()),
        ],
    );

    let key = VerifyingKey::<Sha256>::new(RsaPublicKey::from_public_key_pem(PUBLIC_KEY)?);
    let signature = Signature::try_from(base64_decode(req.signature())?.as_slice())?;
    key.verify(s.as_bytes(), &signature)?;
    Ok(())
}

#[tokio::test]
async fn test_get_matches_fixed_vector() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(200, json!({"Results": []}));
    let client = mock_client(&mock);

    client
        .call(&Operation::get("/boot/PrecisionPolicies").with_filter("Name eq 'vmedia-hdd'"))
        .await?;

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(
        req.uri.to_string(),
        "https://intersight.com/api/v1/boot/PrecisionPolicies?%24filter=Name%20eq%20%27vmedia-hdd%27"
    );
    assert_eq!(req.header("date"), format_http_date(fixed_time()));
    assert_eq!(req.header("host"), "intersight.com");
    assert_eq!(req.header("accept"), "application/json");
    assert_eq!(req.header("content-type"), "");
    assert!(req.body.is_empty());
    assert_eq!(
        req.header("authorization"),
        format!(
            "Signature keyId=\"{KEY_ID}\",algorithm=\"rsa-sha256\",headers=\"(request-target) date host digest\",signature=\"{GET_SIGNATURE}\""
        )
    );

    verify(req, b"{}")
}

#[tokio::test]
async fn test_patch_matches_fixed_vector() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(200, json!({"Moid": MOID}));
    let client = mock_client(&mock);

    client
        .call(
            &Operation::patch("/boot/PrecisionPolicies")
                .with_moid(MOID)
                .with_body(json!({"Name": "vmedia-hdd", "ConfiguredBootMode": "Legacy"})),
        )
        .await?;

    let req = &mock.requests()[0];
    assert_eq!(
        req.uri.path(),
        "/api/v1/boot/PrecisionPolicies/5ac2970d396e337134f65422"
    );
    assert_eq!(req.header("content-type"), "application/json");
    assert_eq!(
        req.body.as_ref(),
        br#"{"Name":"vmedia-hdd","ConfiguredBootMode":"Legacy"}"#
    );
    assert_eq!(req.signature(), PATCH_SIGNATURE);

    verify(req, &req.body)
}

#[tokio::test]
async fn test_post_and_delete_verify() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(200, json!({}))
        .respond(200, json!({}));
    let client = mock_client(&mock);

    client
        .call(&Operation::post("/ntp/Policies").with_body(json!({"Name": "lab-ntp", "Enabled": true})))
        .await?;
    client
        .call(&Operation::delete("/ntp/Policies").with_moid(MOID))
        .await?;

    let requests = mock.requests();
    verify(&requests[0], &requests[0].body)?;
    assert_eq!(requests[1].body.as_ref(), b"{}");
    verify(&requests[1], b"{}")
}

#[tokio::test]
async fn test_identical_calls_sign_identically() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(200, json!({})).respond(200, json!({}));
    let client = mock_client(&mock);

    let op = Operation::get("/ntp/Policies").with_filter("Name eq 'lab-ntp'");
    client.call(&op).await?;
    client.call(&op).await?;

    let requests = mock.requests();
    assert_eq!(
        requests[0].header("authorization"),
        requests[1].header("authorization")
    );
    Ok(())
}
