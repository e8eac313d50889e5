mod common;

use ghrest::services::git::{Blob, CommitAuthor, CreateCommit, TreeEntry};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_get_tree_recursive() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/git/trees/main"))
        .and(query_param("recursive", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sha": "fff",
            "tree": [
                {"path": "src", "mode": "040000", "type": "tree", "sha": "aaa"},
                {"path": "src/lib.rs", "mode": "100644", "type": "blob", "sha": "bbb", "size": 120}
            ],
            "truncated": true
        })))
        .mount(&server)
        .await;

    let (tree, _) = client.git().get_tree("o", "r", "main", true).await.unwrap();
    assert_eq!(tree.entries.len(), 2);
    assert_eq!(tree.entries[1].path.as_deref(), Some("src/lib.rs"));
    assert_eq!(tree.truncated, Some(true));
}

#[tokio::test]
async fn test_create_tree_with_deletion() {
    let (server, client) = common::setup().await;

    Mock::given(method("POST"))
        .and(path("/repos/o/r/git/trees"))
        .and(body_json(json!({
            "base_tree": "b",
            "tree": [
                {"path": "new.txt", "mode": "100644", "type": "blob", "content": "hi"},
                {"path": "old.txt", "mode": "100644", "type": "blob", "sha": null}
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "sha": "cd8274d15fa3ae2ab983129fb037999f264ba9a7",
            "tree": [{"path": "new.txt", "mode": "100644", "type": "blob", "size": 2, "sha": "7c258a9"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let entries = vec![
        TreeEntry {
            path: Some("new.txt".to_string()),
            mode: Some("100644".to_string()),
            entry_type: Some("blob".to_string()),
            content: Some("hi".to_string()),
            ..Default::default()
        },
        TreeEntry::delete("old.txt", "100644", "blob"),
    ];
    let (tree, _) = client.git().create_tree("o", "r", "b", &entries).await.unwrap();
    assert_eq!(tree.sha.as_deref(), Some("cd8274d15fa3ae2ab983129fb037999f264ba9a7"));
    assert_eq!(tree.entries.len(), 1);
}

#[tokio::test]
async fn test_refs_accept_full_names() {
    let (server, client) = common::setup().await;
    let reference = json!({
        "ref": "refs/heads/topic",
        "object": {"type": "commit", "sha": "aa218f56b14c9653891f9e74264a383fa43fefbd"}
    });

    Mock::given(method("GET"))
        .and(path("/repos/o/r/git/ref/heads/topic"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reference.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/o/r/git/refs"))
        .and(body_json(json!({"ref": "refs/heads/topic", "sha": "aa218f56"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(reference.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/repos/o/r/git/refs/heads/topic"))
        .and(body_json(json!({"sha": "aa218f56", "force": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(reference))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/repos/o/r/git/refs/heads/topic"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let git = client.git();
    let (got, _) = git.get_ref("o", "r", "refs/heads/topic").await.unwrap();
    assert_eq!(got.git_ref.as_deref(), Some("refs/heads/topic"));
    assert_eq!(
        got.object.and_then(|o| o.object_type).as_deref(),
        Some("commit")
    );
    git.create_ref("o", "r", "heads/topic", "aa218f56").await.unwrap();
    git.update_ref("o", "r", "refs/heads/topic", "aa218f56", true).await.unwrap();
    git.delete_ref("o", "r", "heads/topic").await.unwrap();
}

#[tokio::test]
async fn test_create_commit() {
    let (server, client) = common::setup().await;

    Mock::given(method("POST"))
        .and(path("/repos/o/r/git/commits"))
        .and(body_json(json!({
            "message": "my commit message",
            "tree": "827efc6d56897b048c772eb4087f854f46256132",
            "parents": ["7d1b31e74ee336d15cbd21741bc88a537ed063a0"],
            "author": {"name": "Mona Octocat", "email": "octocat@github.com"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "sha": "7638417db6d59f3c431d3e1f261cc637155684cd",
            "message": "my commit message",
            "parents": [{"sha": "7d1b31e74ee336d15cbd21741bc88a537ed063a0"}]
        })))
        .mount(&server)
        .await;

    let commit = CreateCommit {
        message: "my commit message".to_string(),
        tree: "827efc6d56897b048c772eb4087f854f46256132".to_string(),
        parents: vec!["7d1b31e74ee336d15cbd21741bc88a537ed063a0".to_string()],
        author: Some(CommitAuthor {
            name: Some("Mona Octocat".to_string()),
            email: Some("octocat@github.com".to_string()),
            date: None,
        }),
        ..Default::default()
    };
    let (created, _) = client.git().create_commit("o", "r", &commit).await.unwrap();
    assert_eq!(created.sha.as_deref(), Some("7638417db6d59f3c431d3e1f261cc637155684cd"));
    assert_eq!(created.parents.len(), 1);
}

#[tokio::test]
async fn test_blobs() {
    let (server, client) = common::setup().await;

    Mock::given(method("POST"))
        .and(path("/repos/o/r/git/blobs"))
        .and(body_json(json!({"content": "Content of the blob", "encoding": "utf-8"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "sha": "3a0f86fb8db8eea7ccbb9a95f325ddbedfb25e15"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/git/blobs/3a0f86fb8db8eea7ccbb9a95f325ddbedfb25e15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": "Q29udGVudCBvZiB0aGUgYmxvYg==",
            "encoding": "base64",
            "sha": "3a0f86fb8db8eea7ccbb9a95f325ddbedfb25e15",
            "size": 19
        })))
        .mount(&server)
        .await;

    let blob = Blob {
        content: Some("Content of the blob".to_string()),
        encoding: Some("utf-8".to_string()),
        ..Default::default()
    };
    let (created, _) = client.git().create_blob("o", "r", &blob).await.unwrap();
    let sha = created.sha.unwrap();

    let (fetched, _) = client.git().get_blob("o", "r", &sha).await.unwrap();
    assert_eq!(fetched.encoding.as_deref(), Some("base64"));
    assert_eq!(fetched.size, Some(19));
}
