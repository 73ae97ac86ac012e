use anyhow::Result;
use intersight_core::{Context, OsEnv};
use intersight_file_read_tokio::TokioFileRead;
use intersight_http_send_reqwest::ReqwestHttpSend;
use intersight_rest::{server_summaries, Client, Config, Reconciler, Resource};
use log::{debug, warn};
use std::env;

fn init_client() -> Option<Client> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("INTERSIGHT_REST_TEST").unwrap_or_default() != "on" {
        return None;
    }

    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let config = Config::from_env(&ctx);
    Some(Client::from_config(ctx, config).expect("INTERSIGHT_API_URI must be valid"))
}

#[tokio::test]
async fn test_live_server_summaries() -> Result<()> {
    let Some(client) = init_client() else {
        warn!("INTERSIGHT_REST_TEST is not set, skipped");
        return Ok(());
    };

    let servers = server_summaries::<&str>(&client, &[]).await?;
    debug!("found {} servers", servers.len());
    Ok(())
}

#[tokio::test]
async fn test_live_lookup_is_noop() -> Result<()> {
    let Some(client) = init_client() else {
        warn!("INTERSIGHT_REST_TEST is not set, skipped");
        return Ok(());
    };

    let resource =
        Resource::new("/ntp/Policies").with_query("$filter", "Name eq 'intersight-rest-test'");
    let result = Reconciler::new(&client)
        .with_check_mode(true)
        .reconcile(&resource)
        .await?;
    assert!(!result.changed);
    Ok(())
}
