use crate::common::*;
use anyhow::Result;
use http::Method;
use intersight_core::{Context, ErrorKind};
use intersight_file_read_tokio::TokioFileRead;
use intersight_rest::{Action, Reconciler, Resource, TargetState, UpdateMethod};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;

fn policy() -> Resource {
    Resource::new("/boot/Policies")
        .with_query("$filter", "Name eq 'x'")
        .with_body(json!({"Name": "x", "ConfiguredBootMode": "Legacy"}))
}

#[tokio::test]
async fn test_missing_resource_is_created() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(200, json!({"Results": []}))
        .respond(200, json!({"Moid": MOID}))
        .respond(200, json!({"Results": [{"Moid": MOID, "Name": "x", "ConfiguredBootMode": "Legacy"}]}));
    let client = mock_client(&mock);

    let result = Reconciler::new(&client).reconcile(&policy()).await?;
    assert_eq!(result.action, Action::NeedsCreate);
    assert!(result.changed);
    assert_eq!(
        result.api_response,
        json!({"Moid": MOID, "Name": "x", "ConfiguredBootMode": "Legacy"})
    );

    let requests = mock.requests();
    let methods: Vec<_> = requests.iter().map(|r| r.method.clone()).collect();
    assert_eq!(methods, vec![Method::GET, Method::POST, Method::GET]);
    assert_eq!(requests[1].uri.path(), "/api/v1/boot/Policies");
    assert_eq!(
        requests[1].body.as_ref(),
        br#"{"Name":"x","ConfiguredBootMode":"Legacy"}"#
    );
    Ok(())
}

#[tokio::test]
async fn test_identical_body_is_noop() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(
        200,
        json!({"Results": [{"Moid": MOID, "Name": "admin", "Password": "", "Enabled": true}]}),
    );
    let client = mock_client(&mock);

    let resource = Resource::new("/iam/EndPointUsers")
        .with_query("$filter", "Name eq 'admin'")
        .with_body(json!({"Name": "admin", "Password": "s3cret", "Enabled": true}));
    let result = Reconciler::new(&client).reconcile(&resource).await?;

    assert_eq!(result.action, Action::NoopMatch);
    assert!(!result.changed);
    assert_eq!(result.api_response["Moid"], json!(MOID));
    assert_eq!(mock.requests().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_mismatch_is_patched_by_moid() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(
        200,
        json!({"Results": [{"Moid": MOID, "Name": "x", "ConfiguredBootMode": "Uefi"}]}),
    )
    .respond(
        200,
        json!({"Moid": MOID, "Name": "x", "ConfiguredBootMode": "Legacy"}),
    );
    let client = mock_client(&mock);

    let result = Reconciler::new(&client).reconcile(&policy()).await?;
    assert_eq!(
        result.action,
        Action::NeedsUpdate {
            moid: MOID.to_string()
        }
    );
    assert!(result.changed);
    assert_eq!(result.api_response["ConfiguredBootMode"], json!("Legacy"));

    let requests = mock.requests();
    assert_eq!(requests[1].method, Method::PATCH);
    assert_eq!(
        requests[1].uri.path(),
        "/api/v1/boot/Policies/5ac2970d396e337134f65422"
    );
    Ok(())
}

#[tokio::test]
async fn test_update_with_post_keeps_collection_path() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(
        200,
        json!({"Results": [{"Moid": MOID, "Name": "x", "ConfiguredBootMode": "Uefi"}]}),
    )
    .respond(200, json!({"Results": [{"Moid": MOID, "Name": "x", "ConfiguredBootMode": "Legacy"}]}));
    let client = mock_client(&mock);

    let resource = policy().with_update_method(UpdateMethod::Post);
    let result = Reconciler::new(&client).reconcile(&resource).await?;
    assert_eq!(result.api_response["ConfiguredBootMode"], json!("Legacy"));

    let requests = mock.requests();
    assert_eq!(requests[1].method, Method::POST);
    assert_eq!(requests[1].uri.path(), "/api/v1/boot/Policies");
    Ok(())
}

#[tokio::test]
async fn test_absent_with_moid_is_deleted() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(200, json!({"Results": [{"Moid": MOID, "Name": "vmedia-hdd"}]}))
        .respond(200, json!({}));
    let client = mock_client(&mock);

    let resource = Resource::new("/boot/PrecisionPolicies")
        .with_query("$filter", "Name eq 'vmedia-hdd'")
        .with_state(TargetState::Absent);
    let result = Reconciler::new(&client).reconcile(&resource).await?;

    assert_eq!(
        result.action,
        Action::NeedsDelete {
            moid: MOID.to_string()
        }
    );
    assert!(result.changed);
    assert_eq!(result.api_response, json!({}));

    let requests = mock.requests();
    assert_eq!(requests[1].method, Method::DELETE);
    assert_eq!(
        requests[1].uri.path(),
        "/api/v1/boot/PrecisionPolicies/5ac2970d396e337134f65422"
    );
    Ok(())
}

#[tokio::test]
async fn test_absent_without_moid_is_noop() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(200, json!({"Results": []}));
    let client = mock_client(&mock);

    let resource = Resource::new("/boot/PrecisionPolicies").with_state(TargetState::Absent);
    let result = Reconciler::new(&client).reconcile(&resource).await?;

    assert_eq!(result.action, Action::NoopMatch);
    assert!(!result.changed);
    assert_eq!(mock.requests().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_check_mode_reports_without_mutating() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(200, json!({"Results": []}));
    let client = mock_client(&mock);

    let result = Reconciler::new(&client)
        .with_check_mode(true)
        .reconcile(&policy())
        .await?;

    assert_eq!(result.action, Action::NeedsCreate);
    assert!(result.changed);
    assert_eq!(result.api_response, json!({"Results": []}));
    assert_eq!(mock.requests().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_failed_mutation_carries_api_response() {
    let mock = MockHttpSend::default();
    mock.respond(200, json!({"Results": [{"Moid": MOID, "Name": "x"}]}))
        .respond(400, json!({"message": "bad request"}));
    let client = mock_client(&mock);

    let resource = Resource::new("/boot/Policies").with_state(TargetState::Absent);
    let err = Reconciler::new(&client)
        .reconcile(&resource)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(
        err.context("api_response"),
        Some(r#"{"Moid":"5ac2970d396e337134f65422","Name":"x"}"#)
    );
}

#[tokio::test]
async fn test_reconcile_all() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(200, json!({"Results": [{"Moid": MOID, "Name": "x", "ConfiguredBootMode": "Legacy"}]}))
        .respond(200, json!({"Results": [{"Moid": MOID, "Name": "y"}]}))
        .respond(200, json!({}));
    let client = mock_client(&mock);

    let resources = vec![
        policy(),
        Resource::new("/boot/Policies")
            .with_query("$filter", "Name eq 'y'")
            .with_state(TargetState::Absent),
    ];
    let batch = Reconciler::new(&client).reconcile_all(&resources).await?;

    assert!(batch.changed);
    assert_eq!(batch.results.len(), 2);
    assert!(!batch.results[0].changed);
    assert!(batch.results[1].changed);
    Ok(())
}

#[tokio::test]
async fn test_load_all() -> Result<()> {
    let mut array = tempfile::NamedTempFile::new()?;
    write!(
        array,
        r#"[
            {{"resource_path": "/ntp/Policies", "api_body": {{"Name": "lab-ntp"}}}},
            {{"resource_path": "/boot/PrecisionPolicies", "state": "absent",
              "query_params": {{"$filter": "Name eq 'vmedia-hdd'"}}}}
        ]"#
    )?;
    let mut single = tempfile::NamedTempFile::new()?;
    write!(single, r#"{{"resource_path": "/ntp/Policies"}}"#)?;
    let mut scalar = tempfile::NamedTempFile::new()?;
    write!(scalar, "42")?;

    let ctx = Context::new().with_file_read(TokioFileRead);

    let resources = Resource::load_all(&ctx, &array.path().to_string_lossy()).await?;
    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0].api_body, json!({"Name": "lab-ntp"}));
    assert_eq!(resources[1].state, TargetState::Absent);
    assert_eq!(
        resources[1].query(),
        vec![("$filter".to_string(), "Name eq 'vmedia-hdd'".to_string())]
    );

    let resources = Resource::load_all(&ctx, &single.path().to_string_lossy()).await?;
    assert_eq!(resources, vec![Resource::new("/ntp/Policies")]);

    let err = Resource::load_all(&ctx, &scalar.path().to_string_lossy())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    Ok(())
}
