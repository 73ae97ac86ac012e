use crate::build::{Endpoint, PreparedRequest, RequestBuilder};
use crate::operation::Operation;
use crate::result::ApiResult;
use crate::{Config, Credential, DefaultCredentialProvider, RequestSigner};
use intersight_core::{Context, Result, Signer};
use log::debug;

/// Client for the Intersight REST API.
///
/// Every call is validated, signed and sent through the [`Context`]'s
/// [`HttpSend`](intersight_core::HttpSend). The client is cheap to clone.
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    builder: RequestBuilder,
    signer: Signer<Credential>,
}

impl Client {
    /// Create a client from its parts.
    pub fn new(ctx: Context, endpoint: Endpoint, signer: Signer<Credential>) -> Self {
        Self {
            ctx,
            builder: RequestBuilder::new(endpoint),
            signer,
        }
    }

    /// Create a client from [`Config`], loading the credential through
    /// [`DefaultCredentialProvider`].
    pub fn from_config(ctx: Context, config: Config) -> Result<Self> {
        let endpoint = Endpoint::new(config.api_uri())?;
        let signer = Signer::new(
            ctx.clone(),
            DefaultCredentialProvider::new(config),
            RequestSigner::new(),
        );
        Ok(Self::new(ctx, endpoint, signer))
    }

    /// The endpoint this client talks to.
    pub fn endpoint(&self) -> &Endpoint {
        self.builder.endpoint()
    }

    pub(crate) fn builder(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Execute a single operation.
    ///
    /// PATCH and DELETE addressed by name resolve the Moid first. All
    /// validation happens before anything is sent.
    pub async fn call(&self, op: &Operation) -> Result<ApiResult> {
        self.builder.validate(op)?;

        let resolved;
        let op = match (&op.moid, &op.name) {
            (None, Some(name)) if op.method.requires_moid() => {
                let moid = self.resolve_moid(&op.resource_path, name).await?;
                resolved = op.clone().with_moid(moid);
                &resolved
            }
            _ => op,
        };

        let req = self.builder.build(op)?;
        self.send(req).await
    }

    pub(crate) async fn send(&self, req: PreparedRequest) -> Result<ApiResult> {
        let PreparedRequest {
            mut parts,
            signable,
            payload,
        } = req;

        self.signer.sign(&mut parts, &signable).await?;
        debug!("sending request: {} {}", parts.method, parts.uri);

        let resp = self
            .ctx
            .http_send(http::Request::from_parts(parts, payload))
            .await?;
        ApiResult::from_response(resp)
    }
}
