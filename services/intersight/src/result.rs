use crate::constants::{MOID_FIELD, RESULTS_FIELD};
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use intersight_core::{Error, Result};
use serde_json::Value;

/// Successful response of the Intersight API.
#[derive(Debug, Clone)]
pub struct ApiResult {
    /// Response status, always a 2xx.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Decoded JSON body, `null` when the body is empty.
    pub body: Value,
    /// Raw body.
    pub raw: Bytes,
}

impl ApiResult {
    /// Decode a transport response.
    ///
    /// Non-2xx statuses become [`ErrorKind::Transport`](intersight_core::ErrorKind::Transport)
    /// errors carrying the status and the body verbatim.
    pub fn from_response(resp: http::Response<Bytes>) -> Result<Self> {
        let (parts, raw) = resp.into_parts();
        if !parts.status.is_success() {
            return Err(Error::transport("intersight returned an error status")
                .with_context("status", parts.status)
                .with_context("body", String::from_utf8_lossy(&raw)));
        }

        let body = if raw.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&raw).map_err(|e| {
                Error::unexpected("response body is not valid JSON")
                    .with_context("status", parts.status)
                    .with_source(e)
            })?
        };

        Ok(Self {
            status: parts.status,
            headers: parts.headers,
            body,
            raw,
        })
    }

    /// Entries of the `Results` list, empty when absent or null.
    pub fn results(&self) -> &[Value] {
        results(&self.body)
    }

    /// The first entry of `Results`.
    pub fn first_result(&self) -> Option<&Value> {
        self.results().first()
    }

    /// Moid of the first result, or of the body itself for single objects.
    pub fn moid(&self) -> Option<&str> {
        self.first_result()
            .unwrap_or(&self.body)
            .get(MOID_FIELD)
            .and_then(Value::as_str)
    }
}

pub(crate) fn results(body: &Value) -> &[Value] {
    body.get(RESULTS_FIELD)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}
