//! Signed REST client for Cisco Intersight.
//!
//! Every request is authenticated with an `rsa-sha256` HTTP signature built
//! from the request target, `Date`, `Host` and `Digest` headers. On top of the
//! signed transport this crate offers idempotent resource management: the
//! current state of a resource is fetched, compared with the desired body and
//! only the minimal create, update or delete is issued.
//!
//! ## Example
//!
//! ```no_run
//! use intersight_core::{Context, OsEnv};
//! use intersight_rest::{Client, Config, Reconciler, Resource, TargetState};
//! use serde_json::json;
//!
//! # async fn example(ctx: Context) -> intersight_core::Result<()> {
//! // `ctx` carries a file reader and a http transport.
//! let ctx = ctx.with_env(OsEnv);
//! let client = Client::from_config(ctx.clone(), Config::from_env(&ctx))?;
//!
//! let resource = Resource::new("/ntp/Policies")
//!     .with_query("$filter", "Name eq 'lab-ntp'")
//!     .with_body(json!({"Name": "lab-ntp", "NtpServers": ["10.10.10.10"]}))
//!     .with_state(TargetState::Present);
//!
//! let outcome = Reconciler::new(&client).reconcile(&resource).await?;
//! println!("changed: {}", outcome.changed);
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::DEFAULT_API_URI;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::{
    authorization_header, content_digest, string_to_sign, RequestSigner,
};

mod operation;
pub use operation::{Filter, Method, Operation};

mod build;
pub use build::{Endpoint, PreparedRequest, RequestBuilder};

mod result;
pub use result::ApiResult;

mod client;
pub use client::Client;

mod resolve;
pub use resolve::first_moid;

mod converge;
pub use converge::{compare, converge, is_secret_key, Action, Comparison, TargetState};

mod reconcile;
pub use reconcile::{BatchReconciliation, Reconciler, Reconciliation, Resource, UpdateMethod};

mod facts;
pub use facts::server_summaries;
