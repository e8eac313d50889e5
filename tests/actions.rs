mod common;

use ghrest::Error;
use ghrest::services::actions::{
    CreateWorkflowDispatchEventRequest, EncryptedSecret, ListWorkflowRunsOptions, RunConclusion,
    RunStatus, SelectedRepoIds,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_list_repository_workflow_runs() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/actions/runs"))
        .and(query_param("branch", "main"))
        .and(query_param("status", "completed"))
        .and(query_param("per_page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 4,
            "workflow_runs": [
                {"id": 399444496, "status": "completed", "conclusion": "success", "run_number": 562},
                {"id": 399444497, "status": "completed", "conclusion": "startup_failure", "run_number": 563}
            ]
        })))
        .mount(&server)
        .await;

    let opts = ListWorkflowRunsOptions {
        branch: Some("main".to_string()),
        status: Some("completed".to_string()),
        list: ghrest::ListOptions {
            per_page: Some(2),
            ..Default::default()
        },
        ..Default::default()
    };
    let (runs, _) = client
        .actions()
        .list_repository_workflow_runs("o", "r", Some(&opts))
        .await
        .unwrap();
    assert_eq!(runs.total_count, Some(4));
    assert_eq!(runs.workflow_runs[0].status, Some(RunStatus::Completed));
    assert_eq!(runs.workflow_runs[0].conclusion, Some(RunConclusion::Success));
    assert_eq!(runs.workflow_runs[1].conclusion, Some(RunConclusion::StartupFailure));
}

#[tokio::test]
async fn test_workflow_job_logs_redirect() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/actions/jobs/399444496/logs"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", "https://pipelines.actions.githubusercontent.com/logs/job.txt"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (url, resp) = client
        .actions()
        .get_workflow_job_logs("o", "r", 399444496)
        .await
        .unwrap();
    assert_eq!(resp.status, 302);
    assert_eq!(url.as_str(), "https://pipelines.actions.githubusercontent.com/logs/job.txt");
}

#[tokio::test]
async fn test_workflow_run_logs_not_found() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/actions/runs/1/logs"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let err = client
        .actions()
        .get_workflow_run_logs("o", "r", 1)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_download_artifact_redirect() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/actions/artifacts/11/zip"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "https://example.com/a.zip"))
        .mount(&server)
        .await;

    let (url, _) = client.actions().download_artifact("o", "r", 11).await.unwrap();
    assert_eq!(url.host_str(), Some("example.com"));
}

#[tokio::test]
async fn test_download_artifact_unexpected_status() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/actions/artifacts/11/zip"))
        .respond_with(ResponseTemplate::new(200).set_body_string("zip"))
        .mount(&server)
        .await;

    let err = client.actions().download_artifact("o", "r", 11).await.unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[tokio::test]
async fn test_create_workflow_dispatch_by_file_name() {
    let (server, client) = common::setup().await;

    Mock::given(method("POST"))
        .and(path("/repos/o/r/actions/workflows/ci.yml/dispatches"))
        .and(body_json(json!({"ref": "main", "inputs": {"debug": true}})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut inputs = serde_json::Map::new();
    inputs.insert("debug".to_string(), json!(true));
    let event = CreateWorkflowDispatchEventRequest {
        git_ref: "main".to_string(),
        inputs: Some(inputs),
    };
    let resp = client
        .actions()
        .create_workflow_dispatch_event_by_file_name("o", "r", "ci.yml", &event)
        .await
        .unwrap();
    assert_eq!(resp.status, 204);
}

#[tokio::test]
async fn test_create_or_update_org_secret() {
    let (server, client) = common::setup().await;

    Mock::given(method("PUT"))
        .and(path("/orgs/o/actions/secrets/NAME"))
        .and(body_json(json!({
            "key_id": "1234",
            "encrypted_value": "QIv=",
            "visibility": "selected",
            "selected_repository_ids": [1296269, 1269280]
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let secret = EncryptedSecret {
        name: "NAME".to_string(),
        key_id: "1234".to_string(),
        encrypted_value: "QIv=".to_string(),
        visibility: Some("selected".to_string()),
        selected_repository_ids: Some(SelectedRepoIds(vec![1296269, 1269280])),
    };
    client
        .actions()
        .create_or_update_org_secret("o", &secret)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_registration_token() {
    let (server, client) = common::setup().await;

    Mock::given(method("POST"))
        .and(path("/repos/o/r/actions/runners/registration-token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "token": "LLBF3JGZDX3P5PMEXLND6TS6FCWO6",
            "expires_at": "2020-01-22T12:13:35.123Z"
        })))
        .mount(&server)
        .await;

    let (token, _) = client
        .actions()
        .create_registration_token("o", "r")
        .await
        .unwrap();
    assert_eq!(token.token, "LLBF3JGZDX3P5PMEXLND6TS6FCWO6");
    assert!(token.expires_at.is_some());
}

#[tokio::test]
async fn test_rerun_accepted() {
    let (server, client) = common::setup().await;

    Mock::given(method("POST"))
        .and(path("/repos/o/r/actions/runs/5/rerun"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client.actions().rerun_workflow_by_id("o", "r", 5).await.unwrap();
}
