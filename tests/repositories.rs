mod common;

use std::io::Write;

use ghrest::Error;
use ghrest::services::hooks::{HookConfig, HookRequest};
use ghrest::services::repositories::{RepositoryRequest, UploadOptions};
use serde_json::json;
use wiremock::matchers::{body_bytes, body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_create_for_authenticated_user() {
    let (server, client) = common::setup().await;

    Mock::given(method("POST"))
        .and(path("/user/repos"))
        .and(body_json(json!({"name": "hello", "private": true})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1296269,
            "name": "hello",
            "full_name": "octocat/hello",
            "private": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = RepositoryRequest {
        name: Some("hello".to_string()),
        private: Some(true),
        ..Default::default()
    };
    let (repo, resp) = client.repositories().create("", &request).await.unwrap();
    assert_eq!(resp.status, 201);
    assert_eq!(repo.full_name.as_deref(), Some("octocat/hello"));
}

#[tokio::test]
async fn test_topics_round_trip() {
    let (server, client) = common::setup().await;

    Mock::given(method("PUT"))
        .and(path("/repos/o/r/topics"))
        .and(body_json(json!({"names": []})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"names": []})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/topics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"names": ["rust", "github"]})))
        .mount(&server)
        .await;

    let (cleared, _) = client.repositories().replace_all_topics("o", "r", &[]).await.unwrap();
    assert!(cleared.is_empty());

    let (topics, _) = client.repositories().list_all_topics("o", "r").await.unwrap();
    assert_eq!(topics, vec!["rust", "github"]);
}

#[tokio::test]
async fn test_list_languages() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Rust": 10240, "Shell": 128})))
        .mount(&server)
        .await;

    let (languages, _) = client.repositories().list_languages("o", "r").await.unwrap();
    assert_eq!(languages["Rust"], 10240);
    assert_eq!(languages.len(), 2);
}

#[tokio::test]
async fn test_create_hook_defaults_name() {
    let (server, client) = common::setup().await;

    Mock::given(method("POST"))
        .and(path("/repos/o/r/hooks"))
        .and(body_json(json!({
            "name": "web",
            "config": {"url": "https://example.com/hook", "content_type": "json"},
            "events": ["push"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 12, "name": "web", "active": true})))
        .expect(1)
        .mount(&server)
        .await;

    let hook = HookRequest {
        config: Some(HookConfig {
            url: Some("https://example.com/hook".to_string()),
            content_type: Some("json".to_string()),
            ..Default::default()
        }),
        events: Some(vec!["push".to_string()]),
        ..Default::default()
    };
    let (created, _) = client.repositories().create_hook("o", "r", &hook).await.unwrap();
    assert_eq!(created.id, Some(12));
}

#[tokio::test]
async fn test_upload_release_asset() {
    let (server, client) = common::setup().await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("notes.txt");
    let mut file = std::fs::File::create(&file_path).unwrap();
    file.write_all(b"release notes").unwrap();
    drop(file);

    Mock::given(method("POST"))
        .and(path("/repos/o/r/releases/7/assets"))
        .and(query_param("name", "notes.txt"))
        .and(query_param("label", "Notes"))
        .and(header("content-type", "text/plain"))
        .and(body_bytes(b"release notes".to_vec()))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1,
            "name": "notes.txt",
            "label": "Notes",
            "content_type": "text/plain",
            "size": 13
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opts = UploadOptions {
        label: Some("Notes".to_string()),
        media_type: Some("text/plain".to_string()),
        ..Default::default()
    };
    let (asset, _) = client
        .repositories()
        .upload_release_asset("o", "r", 7, &opts, &file_path)
        .await
        .unwrap();
    assert_eq!(asset.name.as_deref(), Some("notes.txt"));
    assert_eq!(asset.size, Some(13));
}

#[tokio::test]
async fn test_upload_release_asset_rejects_directory() {
    let (_server, client) = common::setup().await;
    let dir = tempfile::tempdir().unwrap();

    let err = client
        .repositories()
        .upload_release_asset("o", "r", 7, &UploadOptions::default(), dir.path())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[tokio::test]
async fn test_upload_release_asset_missing_file() {
    let (_server, client) = common::setup().await;
    let dir = tempfile::tempdir().unwrap();

    let err = client
        .repositories()
        .upload_release_asset("o", "r", 7, &UploadOptions::default(), &dir.path().join("absent"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
