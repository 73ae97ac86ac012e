//! Reqwest-based transport for the Intersight client.
//!
//! `ReqwestHttpSend` implements [`HttpSend`] on top of a [`reqwest::Client`].
//! It sends the signed request untouched and hands back status, headers and
//! the collected body. Interpreting the status is left to the caller.
//!
//! ## Example
//!
//! ```no_run
//! use intersight_core::Context;
//! use intersight_http_send_reqwest::ReqwestHttpSend;
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), reqwest::Error> {
//! let client = reqwest::Client::builder()
//!     .timeout(Duration::from_secs(30))
//!     .build()?;
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use intersight_core::{Error, HttpSend, Result};
use log::debug;
use reqwest::{Client, Request};

/// Transport backed by a reqwest client.
#[derive(Debug, Default)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let uri = req.uri().to_string();
        let req = Request::try_from(req).map_err(|e| {
            Error::request_invalid("failed to convert http request")
                .with_context("uri", &uri)
                .with_source(e)
        })?;

        let resp = self.client.execute(req).await.map_err(|e| {
            Error::transport("failed to send http request")
                .with_context("uri", &uri)
                .with_source(e)
        })?;
        debug!("received response {} for {}", resp.status(), uri);

        let resp: http::Response<reqwest::Body> = resp.into();
        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| {
                Error::transport("failed to read response body")
                    .with_context("uri", &uri)
                    .with_source(e)
            })?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
