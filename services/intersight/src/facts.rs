use crate::client::Client;
use crate::constants::PHYSICAL_SUMMARIES_PATH;
use crate::operation::{Filter, Operation};
use intersight_core::Result;
use log::debug;
use serde_json::Value;

/// Gather the physical summaries of servers.
///
/// With no names every server visible to the key is returned, otherwise
/// only the servers with one of the given names.
pub async fn server_summaries<S: AsRef<str>>(client: &Client, names: &[S]) -> Result<Vec<Value>> {
    let mut op = Operation::get(PHYSICAL_SUMMARIES_PATH);
    if !names.is_empty() {
        op = op.with_filter(Filter::names(names));
    }

    let res = client.call(&op).await?;
    let servers = res.results().to_vec();
    debug!("gathered {} server summaries", servers.len());
    Ok(servers)
}
