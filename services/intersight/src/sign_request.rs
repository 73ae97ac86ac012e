use crate::constants::SIGNATURE_ALGORITHM;
use crate::Credential;
use async_trait::async_trait;
use http::header::{HeaderName, AUTHORIZATION, DATE, HOST};
use http::request::Parts;
use http::Method;
use intersight_core::hash::{base64_encode, base64_sha256};
use intersight_core::time::{format_http_date, now, DateTime};
use intersight_core::{Context, Error, Result, SignRequest, SigningRequest};
use log::debug;
use rsa::pkcs1v15::SigningKey;
use rsa::sha2::Sha256;
use rsa::signature::{SignatureEncoding, Signer};

/// Headers covered by the signature, in signing order.
const SIGNED_HEADERS: [&str; 4] = ["(request-target)", "date", "host", "digest"];

/// RequestSigner that implements Intersight API key signing.
///
/// The signature is an `rsa-sha256` HTTP signature (draft-cavage) over the
/// request target and the `Date`, `Host` and `Digest` headers.
///
/// - [Intersight API keys](https://intersight.com/apidocs/introduction/security/#generating-api-keys)
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new RequestSigner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign every request with the given time instead of now.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        req: &mut Parts,
        body: &[u8],
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let Some(cred) = credential else {
            return Err(Error::config_invalid(
                "no credential loaded, api key id and private key are required",
            ));
        };
        if cred.key_id.is_empty() {
            return Err(Error::config_invalid("public key not set"));
        }
        if cred.private_key.is_empty() {
            return Err(Error::config_invalid("private key not set"));
        }
        if !matches!(
            req.method,
            Method::GET | Method::POST | Method::PATCH | Method::DELETE
        ) {
            return Err(Error::request_invalid(
                "please select a valid HTTP verb (GET/POST/PATCH/DELETE)",
            )
            .with_context("method", &req.method));
        }

        let private_key = cred.rsa_private_key()?;
        let now = self.time.unwrap_or_else(now);
        let mut signing_req = SigningRequest::build(req)?;

        let date = format_http_date(now);
        let host = signing_req.authority.to_string();
        let digest = content_digest(body);

        let string_to_sign = string_to_sign(
            &signing_req.request_target(),
            &[
                ("date", date.as_str()),
                ("host", host.as_str()),
                ("digest", digest.as_str()),
            ],
        );
        debug!("string to sign: {}", &string_to_sign);

        let signing_key = SigningKey::<Sha256>::new(private_key);
        let signature = signing_key
            .try_sign(string_to_sign.as_bytes())
            .map_err(|e| Error::unexpected(format!("failed to sign request: {e}")))?;
        let signature = base64_encode(&signature.to_bytes());

        signing_req.header_insert(DATE, &date)?;
        signing_req.header_insert(HOST, &host)?;
        signing_req.header_insert(HeaderName::from_static("digest"), &digest)?;
        signing_req.header_insert(
            AUTHORIZATION,
            &authorization_header(&cred.key_id, &SIGNED_HEADERS, &signature),
        )?;

        signing_req.apply(req)
    }
}

/// Value of the `Digest` header: `SHA-256=` followed by the base64 encoded
/// SHA-256 of `body`.
pub fn content_digest(body: &[u8]) -> String {
    format!("SHA-256={}", base64_sha256(body))
}

/// Build the string to sign.
///
/// The first line is `(request-target): <target>`, followed by one
/// `<lowercased name>: <value>` line per header. Lines are joined by `\n`
/// without a trailing newline.
pub fn string_to_sign(request_target: &str, headers: &[(&str, &str)]) -> String {
    let mut s = format!("(request-target): {request_target}");
    for (name, value) in headers {
        s.push('\n');
        s.push_str(&name.to_lowercase());
        s.push_str(": ");
        s.push_str(value);
    }
    s
}

/// Build the `Authorization` header value.
pub fn authorization_header(key_id: &str, headers: &[&str], signature: &str) -> String {
    format!(
        "Signature keyId=\"{}\",algorithm=\"{}\",headers=\"{}\",signature=\"{}\"",
        key_id,
        SIGNATURE_ALGORITHM,
        headers.join(" "),
        signature
    )
}
