use crate::client::Client;
use crate::constants::MOID_FIELD;
use crate::operation::{Filter, Operation};
use crate::result::results;
use intersight_core::{Error, Result};
use log::{debug, warn};
use serde_json::Value;

impl Client {
    /// Resolve the Moid of the object called `name` under `resource_path`.
    ///
    /// Fails with [`ErrorKind::NotFound`](intersight_core::ErrorKind::NotFound)
    /// when nothing matches. When several objects share the name the first
    /// one returned wins.
    pub async fn resolve_moid(&self, resource_path: &str, name: &str) -> Result<String> {
        // Goes through `send` directly: `call` itself resolves names.
        let op = Operation::get(resource_path).with_filter(Filter::name_eq(name));
        let res = self.send(self.builder().build(&op)?).await?;

        let moid = first_moid(resource_path, name, &res.body)?;
        debug!("resolved {name} under {resource_path} to moid {moid}");
        Ok(moid)
    }

    /// GET `resource_path` and return the first element of `Results`, or
    /// the whole body when there is none.
    pub async fn get_resource(
        &self,
        resource_path: &str,
        query: &[(String, String)],
    ) -> Result<Value> {
        let op = Operation {
            query: query.to_vec(),
            ..Operation::get(resource_path)
        };
        let res = self.call(&op).await?;

        Ok(match res.first_result() {
            Some(first) => first.clone(),
            None => res.body,
        })
    }
}

/// Pick the Moid of the first entry in a list response's `Results`.
pub fn first_moid(resource_path: &str, name: &str, body: &Value) -> Result<String> {
    let results = results(body);
    let Some(first) = results.first() else {
        return Err(Error::not_found("no resource matches the name")
            .with_context("resource_path", resource_path)
            .with_context("name", name));
    };
    if results.len() > 1 {
        warn!(
            "{} resources named {name} under {resource_path}, using the first one",
            results.len()
        );
    }

    first
        .get(MOID_FIELD)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            Error::unexpected("resolved resource has no moid")
                .with_context("resource_path", resource_path)
                .with_context("name", name)
        })
}
