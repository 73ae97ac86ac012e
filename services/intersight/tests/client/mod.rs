use crate::common::*;
use anyhow::Result;
use http::Method;
use intersight_core::ErrorKind;
use intersight_rest::{server_summaries, Operation};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

#[tokio::test]
async fn test_patch_by_name_resolves_moid() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(200, json!({"Results": [{"Moid": MOID, "Name": "vmedia-hdd"}]}))
        .respond(200, json!({"Moid": MOID}));
    let client = mock_client(&mock);

    let res = client
        .call(
            &Operation::patch("/boot/PrecisionPolicies")
                .with_name("vmedia-hdd")
                .with_body(json!({"ConfiguredBootMode": "Uefi"})),
        )
        .await?;
    assert_eq!(res.moid(), Some(MOID));

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(
        requests[0].uri.query(),
        Some("%24filter=Name%20eq%20%27vmedia-hdd%27")
    );
    assert_eq!(requests[1].method, Method::PATCH);
    assert_eq!(
        requests[1].uri.path(),
        "/api/v1/boot/PrecisionPolicies/5ac2970d396e337134f65422"
    );
    Ok(())
}

#[tokio::test]
async fn test_delete_by_unknown_name_is_not_found() {
    let mock = MockHttpSend::default();
    mock.respond(200, json!({"Results": null}));
    let client = mock_client(&mock);

    let err = client
        .call(&Operation::delete("/ntp/Policies").with_name("missing"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.context("resource_path"), Some("/ntp/Policies"));
    assert_eq!(err.context("name"), Some("missing"));
    // Only the lookup went out.
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn test_resolve_moid_takes_first_of_many() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(
        200,
        json!({"Results": [
            {"Moid": MOID, "Name": "dup"},
            {"Moid": "5ac2970d396e337134f65499", "Name": "dup"},
        ]}),
    );
    let client = mock_client(&mock);

    assert_eq!(client.resolve_moid("/ntp/Policies", "dup").await?, MOID);
    Ok(())
}

#[test_case(Operation::patch("/ntp/Policies"); "patch without moid or name")]
#[test_case(Operation::delete("/ntp/Policies"); "delete without moid or name")]
#[test_case(Operation::patch("/ntp/Policies").with_moid("1234"); "short moid")]
#[test_case(Operation::post("/ntp/Policies").with_body(json!("text")); "non object body")]
#[test_case(Operation::get("ntp/Policies"); "relative resource path")]
#[tokio::test]
async fn test_invalid_operation_fails_before_network(op: Operation) {
    let mock = MockHttpSend::default();
    let client = mock_client(&mock);

    let err = client.call(&op).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_error_status_is_transport_error() {
    let mock = MockHttpSend::default();
    mock.respond(
        401,
        json!({"code": "InvalidRequest", "message": "Authentication failed"}),
    );
    let client = mock_client(&mock);

    let err = client
        .call(&Operation::get("/ntp/Policies"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.context("status"), Some("401 Unauthorized"));
    assert_eq!(
        err.context("body"),
        Some(r#"{"code":"InvalidRequest","message":"Authentication failed"}"#)
    );
}

#[tokio::test]
async fn test_get_resource_returns_first_result_or_body() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(200, json!({"Results": [{"Moid": MOID, "Name": "a"}, {"Name": "b"}]}))
        .respond(200, json!({"ObjectType": "ntp.Policy.List", "Results": []}));
    let client = mock_client(&mock);

    let query = vec![("$filter".to_string(), "Name eq 'a'".to_string())];
    assert_eq!(
        client.get_resource("/ntp/Policies", &query).await?,
        json!({"Moid": MOID, "Name": "a"})
    );
    assert_eq!(
        client.get_resource("/ntp/Policies", &query).await?,
        json!({"ObjectType": "ntp.Policy.List", "Results": []})
    );
    Ok(())
}

#[tokio::test]
async fn test_server_summaries() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(
        200,
        json!({"Results": [{"Name": "server-1", "Serial": "FCH0001"}, {"Name": "server-2", "Serial": "FCH0002"}]}),
    )
    .respond(200, json!({}));
    let client = mock_client(&mock);

    let servers = server_summaries(&client, &["server-1", "server-2"]).await?;
    assert_eq!(servers.len(), 2);
    assert_eq!(servers[1]["Serial"], json!("FCH0002"));

    let none: &[&str] = &[];
    assert!(server_summaries(&client, none).await?.is_empty());

    let requests = mock.requests();
    assert_eq!(requests[0].uri.path(), "/api/v1/compute/PhysicalSummaries");
    assert_eq!(
        requests[0].uri.query(),
        Some("%24filter=Name%20eq%20%27server-1%27%20or%20Name%20eq%20%27server-2%27")
    );
    assert_eq!(requests[1].uri.query(), None);
    Ok(())
}
