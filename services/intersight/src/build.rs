use crate::constants::*;
use crate::operation::{Method, Operation};
use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::request::Parts;
use http::uri::{Authority, Scheme};
use http::Uri;
use intersight_core::{Error, Result};
use percent_encoding::utf8_percent_encode;

/// The parsed API base, e.g. `https://intersight.com/api/v1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    scheme: Scheme,
    authority: Authority,
    base_path: String,
}

impl Endpoint {
    /// Parse an API base uri.
    pub fn new(uri: &str) -> Result<Self> {
        let parsed: Uri = uri.parse().map_err(|e| {
            Error::config_invalid("api uri is invalid")
                .with_context("uri", uri)
                .with_source(e)
        })?;

        let (Some(scheme), Some(authority)) = (parsed.scheme(), parsed.authority()) else {
            return Err(
                Error::config_invalid("api uri must be absolute").with_context("uri", uri)
            );
        };

        Ok(Self {
            scheme: scheme.clone(),
            authority: authority.clone(),
            base_path: parsed.path().trim_end_matches('/').to_string(),
        })
    }

    /// Scheme of the API base.
    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// Authority of the API base, sent as the `Host` header.
    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Path of the API base without trailing slash, e.g. `/api/v1`.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }
}

/// A request ready for signing.
///
/// `signable` is what the digest covers, `payload` is what goes on the wire.
/// They only differ for GET, which signs `{}` and sends nothing.
#[derive(Debug)]
pub struct PreparedRequest {
    /// Request line and headers, without signature.
    pub parts: Parts,
    /// Bytes covered by the `Digest` header.
    pub signable: Bytes,
    /// Bytes sent as the request body.
    pub payload: Bytes,
}

impl PreparedRequest {
    /// Assemble the final http request.
    pub fn into_request(self) -> http::Request<Bytes> {
        http::Request::from_parts(self.parts, self.payload)
    }
}

/// Turns [`Operation`]s into requests against an [`Endpoint`].
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    endpoint: Endpoint,
}

impl RequestBuilder {
    /// Create a new RequestBuilder.
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    /// The endpoint requests are built for.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Check an operation before anything is sent.
    pub fn validate(&self, op: &Operation) -> Result<()> {
        if !op.resource_path.starts_with('/') {
            return Err(Error::request_invalid("resource path must start with '/'")
                .with_context("resource_path", &op.resource_path));
        }
        if let Some(moid) = &op.moid {
            if moid.len() != MOID_LENGTH {
                return Err(Error::request_invalid(format!(
                    "moid must be {MOID_LENGTH} characters long"
                ))
                .with_context("moid", moid));
            }
        }
        if !op.body.is_object() {
            return Err(Error::request_invalid("body must be a JSON object")
                .with_context("resource_path", &op.resource_path));
        }
        if op.method.requires_moid() && op.moid.is_none() && op.name.is_none() {
            return Err(Error::request_invalid(
                "must set either moid or name with PATCH/DELETE",
            )
            .with_context("resource_path", &op.resource_path));
        }
        Ok(())
    }

    /// Build the request for `op`.
    ///
    /// PATCH and DELETE must carry a Moid at this point.
    pub fn build(&self, op: &Operation) -> Result<PreparedRequest> {
        self.validate(op)?;
        if op.method.requires_moid() && op.moid.is_none() {
            return Err(Error::request_invalid("moid of the target is not resolved")
                .with_context("resource_path", &op.resource_path));
        }

        let mut path = format!("{}{}", self.endpoint.base_path, op.resource_path);
        if let Some(moid) = op.moid.as_deref().filter(|_| op.method != Method::Post) {
            path.push('/');
            path.push_str(moid);
        }
        if !op.query.is_empty() {
            path.push('?');
            path.push_str(&encode_query(&op.query));
        }

        let uri = Uri::builder()
            .scheme(self.endpoint.scheme.clone())
            .authority(self.endpoint.authority.clone())
            .path_and_query(path.as_str())
            .build()
            .map_err(|e| {
                Error::request_invalid("resource path is not a valid uri path")
                    .with_context("path", &path)
                    .with_source(e)
            })?;

        let mut req = http::Request::builder()
            .method(http::Method::from(op.method))
            .uri(uri)
            .header(ACCEPT, "application/json");

        let (signable, payload) = if op.method == Method::Get {
            (Bytes::from_static(EMPTY_BODY), Bytes::new())
        } else {
            req = req.header(CONTENT_TYPE, "application/json");
            let body = Bytes::from(serde_json::to_vec(&op.body)?);
            (body.clone(), body)
        };

        let (parts, _) = req.body(())?.into_parts();
        Ok(PreparedRequest {
            parts,
            signable,
            payload,
        })
    }
}

/// Percent encode query pairs and join them with `&`, keeping their order.
pub(crate) fn encode_query(query: &[(String, String)]) -> String {
    query
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, &QUERY_ENCODE_SET),
                utf8_percent_encode(v, &QUERY_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
