use crate::client::Client;
use crate::converge::{converge, Action, TargetState};
use crate::operation::{Method, Operation};
use intersight_core::{Context, Error, Result};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Verb used to update an existing resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMethod {
    /// PATCH `<resource_path>/<moid>`.
    #[default]
    Patch,
    /// POST `<resource_path>`.
    Post,
}

impl From<UpdateMethod> for Method {
    fn from(m: UpdateMethod) -> Self {
        match m {
            UpdateMethod::Patch => Method::Patch,
            UpdateMethod::Post => Method::Post,
        }
    }
}

/// A resource description to reconcile against the server.
///
/// Deserializes from the same shape the API documentation uses:
///
/// ```json
/// {
///   "resource_path": "/boot/PrecisionPolicies",
///   "query_params": {"$filter": "Name eq 'vmedia-hdd'"},
///   "api_body": {"Name": "vmedia-hdd", "ConfiguredBootMode": "Legacy"},
///   "state": "present"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Resource {
    /// Resource path relative to the API base.
    pub resource_path: String,
    /// Query used to look the resource up, in order.
    #[serde(default)]
    pub query_params: Map<String, Value>,
    /// Desired body. Empty means "only look the resource up".
    #[serde(default = "empty_object")]
    pub api_body: Value,
    /// Whether the resource should exist.
    #[serde(default)]
    pub state: TargetState,
    /// Verb used for updates.
    #[serde(default)]
    pub update_method: UpdateMethod,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl Resource {
    /// Create a present resource with an empty body.
    pub fn new(resource_path: impl Into<String>) -> Self {
        Self {
            resource_path: resource_path.into(),
            query_params: Map::new(),
            api_body: empty_object(),
            state: TargetState::default(),
            update_method: UpdateMethod::default(),
        }
    }

    /// Add a lookup query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params
            .insert(key.into(), Value::String(value.into()));
        self
    }

    /// Set the desired body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.api_body = body;
        self
    }

    /// Set the target state.
    pub fn with_state(mut self, state: TargetState) -> Self {
        self.state = state;
        self
    }

    /// Set the update verb.
    pub fn with_update_method(mut self, method: UpdateMethod) -> Self {
        self.update_method = method;
        self
    }

    /// Query pairs with non-string values rendered as JSON.
    pub fn query(&self) -> Vec<(String, String)> {
        self.query_params
            .iter()
            .map(|(k, v)| {
                let v = match v {
                    Value::String(s) => s.clone(),
                    v => v.to_string(),
                };
                (k.clone(), v)
            })
            .collect()
    }

    /// Load resources from a JSON file holding one object or an array of them.
    pub async fn load_all(ctx: &Context, path: &str) -> Result<Vec<Resource>> {
        let content = ctx.file_read(path).await?;
        let parse_err = |e: serde_json::Error| {
            Error::request_invalid("failed to parse resource file")
                .with_context("path", path)
                .with_source(e)
        };

        match serde_json::from_slice(&content).map_err(parse_err)? {
            Value::Array(items) => items
                .into_iter()
                .map(|v| serde_json::from_value(v).map_err(parse_err))
                .collect(),
            v @ Value::Object(_) => Ok(vec![serde_json::from_value(v).map_err(parse_err)?]),
            _ => Err(Error::request_invalid(
                "resource file must hold an object or an array of objects",
            )
            .with_context("path", path)),
        }
    }
}

/// Result of reconciling one resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Decision taken.
    pub action: Action,
    /// Whether the server was (or, in check mode, would be) changed.
    pub changed: bool,
    /// Latest known state of the resource.
    pub api_response: Value,
}

/// Result of reconciling several resources.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchReconciliation {
    /// Whether any resource changed.
    pub changed: bool,
    /// Per resource results, in input order.
    pub results: Vec<Reconciliation>,
}

/// Brings resources to their desired state with the minimal call.
#[derive(Debug, Clone)]
pub struct Reconciler<'a> {
    client: &'a Client,
    check_mode: bool,
}

impl<'a> Reconciler<'a> {
    /// Create a new Reconciler.
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            check_mode: false,
        }
    }

    /// In check mode the decision is computed and reported but nothing is
    /// changed on the server.
    pub fn with_check_mode(mut self, check_mode: bool) -> Self {
        self.check_mode = check_mode;
        self
    }

    /// Reconcile a single resource.
    pub async fn reconcile(&self, resource: &Resource) -> Result<Reconciliation> {
        if !resource.api_body.is_object() {
            return Err(Error::request_invalid("api_body must be a JSON object")
                .with_context("resource_path", &resource.resource_path));
        }

        let query = resource.query();
        let observed = self
            .client
            .get_resource(&resource.resource_path, &query)
            .await?;

        let action = converge(&resource.api_body, &observed, resource.state);
        debug!(
            "resource {} converges to {:?}",
            resource.resource_path, action
        );
        let changed = action.is_change();

        if self.check_mode {
            if changed {
                warn!(
                    "check mode: skipping {:?} on {}",
                    action, resource.resource_path
                );
            }
            return Ok(Reconciliation {
                action,
                changed,
                api_response: observed,
            });
        }

        let api_response = match self.execute(resource, &query, &action).await {
            Ok(Some(v)) => v,
            Ok(None) => observed,
            Err(e) => return Err(e.with_context("api_response", &observed)),
        };

        Ok(Reconciliation {
            action,
            changed,
            api_response,
        })
    }

    /// Reconcile resources in order, stopping at the first error.
    pub async fn reconcile_all(&self, resources: &[Resource]) -> Result<BatchReconciliation> {
        let mut batch = BatchReconciliation::default();
        for resource in resources {
            let result = self.reconcile(resource).await?;
            batch.changed |= result.changed;
            batch.results.push(result);
        }
        Ok(batch)
    }

    /// Run the mutation for `action`, returning the new state when known.
    async fn execute(
        &self,
        resource: &Resource,
        query: &[(String, String)],
        action: &Action,
    ) -> Result<Option<Value>> {
        let path = resource.resource_path.as_str();
        match action {
            Action::NoopMatch => Ok(None),
            Action::NeedsCreate => {
                let op = Operation::post(path).with_body(resource.api_body.clone());
                self.client.call(&op).await?;
                let created = self.client.get_resource(path, query).await?;
                Ok(Some(created))
            }
            Action::NeedsUpdate { moid } => {
                let op = Operation::new(resource.update_method.into(), path)
                    .with_moid(moid)
                    .with_body(resource.api_body.clone());
                let res = self.client.call(&op).await?;
                Ok(match res.first_result() {
                    Some(first) => Some(first.clone()),
                    None if res.body.is_object() => Some(res.body),
                    None => None,
                })
            }
            Action::NeedsDelete { moid } => {
                let op = Operation::delete(path).with_moid(moid);
                self.client.call(&op).await?;
                Ok(Some(empty_object()))
            }
        }
    }
}
