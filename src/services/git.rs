// Git database API.
// Trees, references, commits and blobs.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Result;
use crate::response::Response;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Tree {
    pub sha: Option<String>,
    #[serde(rename = "tree", default)]
    pub entries: Vec<TreeEntry>,
    /// Set when a recursive listing exceeded GitHub's entry limit.
    pub truncated: Option<bool>,
}

/// One entry of a tree.
///
/// When creating a tree, an entry carries either `content` (GitHub creates the
/// blob) or `sha`. An entry with neither is sent as `"sha": null`, which
/// deletes `path` from the base tree.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TreeEntry {
    pub sha: Option<String>,
    pub path: Option<String>,
    pub mode: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
    pub size: Option<u64>,
    pub content: Option<String>,
    pub url: Option<String>,
}

impl TreeEntry {
    /// Entry that removes `path` from the base tree.
    pub fn delete(path: impl Into<String>, mode: impl Into<String>, entry_type: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            mode: Some(mode.into()),
            entry_type: Some(entry_type.into()),
            ..Default::default()
        }
    }
}

impl Serialize for TreeEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(path) = &self.path {
            map.serialize_entry("path", path)?;
        }
        if let Some(mode) = &self.mode {
            map.serialize_entry("mode", mode)?;
        }
        if let Some(entry_type) = &self.entry_type {
            map.serialize_entry("type", entry_type)?;
        }
        match &self.content {
            Some(content) => map.serialize_entry("content", content)?,
            None => map.serialize_entry("sha", &self.sha)?,
        }
        map.end()
    }
}

#[derive(Debug, Serialize)]
struct CreateTree<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    base_tree: &'a str,
    tree: &'a [TreeEntry],
}

/// Object a reference points at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitObject {
    #[serde(rename = "type")]
    pub object_type: Option<String>,
    pub sha: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub url: Option<String>,
    pub node_id: Option<String>,
    pub object: Option<GitObject>,
}

#[derive(Debug, Serialize)]
struct CreateRef<'a> {
    #[serde(rename = "ref")]
    git_ref: String,
    sha: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateRef<'a> {
    sha: &'a str,
    force: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitAuthor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    pub verified: Option<bool>,
    pub reason: Option<String>,
    pub signature: Option<String>,
    pub payload: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CommitParent {
    pub sha: Option<String>,
    pub url: Option<String>,
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Commit {
    pub sha: Option<String>,
    pub node_id: Option<String>,
    pub url: Option<String>,
    pub html_url: Option<String>,
    pub author: Option<CommitAuthor>,
    pub committer: Option<CommitAuthor>,
    pub message: Option<String>,
    pub tree: Option<Tree>,
    #[serde(default)]
    pub parents: Vec<CommitParent>,
    pub verification: Option<Verification>,
}

/// Body for creating a commit. Parents are SHAs; an empty list makes a root commit.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCommit {
    pub message: String,
    pub tree: String,
    pub parents: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<CommitAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committer: Option<CommitAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// `utf-8` or `base64`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
}

fn strip_refs(git_ref: &str) -> &str {
    git_ref.strip_prefix("refs/").unwrap_or(git_ref)
}

pub struct GitService<'a> {
    client: &'a Client,
}

impl<'a> GitService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn get_tree(&self, owner: &str, repo: &str, sha: &str, recursive: bool) -> Result<(Tree, Response)> {
        let mut path = format!("repos/{}/{}/git/trees/{}", owner, repo, sha);
        if recursive {
            path.push_str("?recursive=1");
        }
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    /// Create a tree on top of `base_tree` (empty for a fresh tree).
    pub async fn create_tree(
        &self,
        owner: &str,
        repo: &str,
        base_tree: &str,
        entries: &[TreeEntry],
    ) -> Result<(Tree, Response)> {
        let path = format!("repos/{}/{}/git/trees", owner, repo);
        let body = CreateTree {
            base_tree,
            tree: entries,
        };
        let req = self.client.new_request(Method::POST, &path, Some(&body))?;
        self.client.execute(req).await
    }

    /// `git_ref` may be given as `heads/main` or `refs/heads/main`.
    pub async fn get_ref(&self, owner: &str, repo: &str, git_ref: &str) -> Result<(Reference, Response)> {
        let path = format!("repos/{}/{}/git/ref/{}", owner, repo, strip_refs(git_ref));
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn create_ref(
        &self,
        owner: &str,
        repo: &str,
        git_ref: &str,
        sha: &str,
    ) -> Result<(Reference, Response)> {
        let path = format!("repos/{}/{}/git/refs", owner, repo);
        let body = CreateRef {
            git_ref: format!("refs/{}", strip_refs(git_ref)),
            sha,
        };
        let req = self.client.new_request(Method::POST, &path, Some(&body))?;
        self.client.execute(req).await
    }

    /// Point `git_ref` at `sha`. Without `force` only fast-forwards succeed.
    pub async fn update_ref(
        &self,
        owner: &str,
        repo: &str,
        git_ref: &str,
        sha: &str,
        force: bool,
    ) -> Result<(Reference, Response)> {
        let path = format!("repos/{}/{}/git/refs/{}", owner, repo, strip_refs(git_ref));
        let body = UpdateRef { sha, force };
        let req = self.client.new_request(Method::PATCH, &path, Some(&body))?;
        self.client.execute(req).await
    }

    pub async fn delete_ref(&self, owner: &str, repo: &str, git_ref: &str) -> Result<Response> {
        let path = format!("repos/{}/{}/git/refs/{}", owner, repo, strip_refs(git_ref));
        let req = self.client.new_request::<()>(Method::DELETE, &path, None)?;
        self.client.execute_empty(req).await
    }

    pub async fn get_commit(&self, owner: &str, repo: &str, sha: &str) -> Result<(Commit, Response)> {
        let path = format!("repos/{}/{}/git/commits/{}", owner, repo, sha);
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn create_commit(&self, owner: &str, repo: &str, commit: &CreateCommit) -> Result<(Commit, Response)> {
        let path = format!("repos/{}/{}/git/commits", owner, repo);
        let req = self.client.new_request(Method::POST, &path, Some(commit))?;
        self.client.execute(req).await
    }

    pub async fn get_blob(&self, owner: &str, repo: &str, sha: &str) -> Result<(Blob, Response)> {
        let path = format!("repos/{}/{}/git/blobs/{}", owner, repo, sha);
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn create_blob(&self, owner: &str, repo: &str, blob: &Blob) -> Result<(Blob, Response)> {
        let path = format!("repos/{}/{}/git/blobs", owner, repo);
        let req = self.client.new_request(Method::POST, &path, Some(blob))?;
        self.client.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tree_entry_delete_marker() {
        let entry = TreeEntry::delete("old/file.txt", "100644", "blob");
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"path": "old/file.txt", "mode": "100644", "type": "blob", "sha": null})
        );
    }

    #[test]
    fn test_tree_entry_with_content_omits_sha() {
        let entry = TreeEntry {
            path: Some("README.md".to_string()),
            mode: Some("100644".to_string()),
            entry_type: Some("blob".to_string()),
            content: Some("hello".to_string()),
            sha: Some("ignored".to_string()),
            size: Some(5),
            url: Some("https://api.github.com/x".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"path": "README.md", "mode": "100644", "type": "blob", "content": "hello"})
        );
    }

    #[test]
    fn test_tree_entry_with_sha_skips_response_fields() {
        let entry = TreeEntry {
            sha: Some("44b4fc6d56897b048c772eb4087f854f46256132".to_string()),
            path: Some("src".to_string()),
            mode: Some("040000".to_string()),
            entry_type: Some("tree".to_string()),
            size: Some(30),
            url: Some("https://api.github.com/x".to_string()),
            content: None,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["sha"], "44b4fc6d56897b048c772eb4087f854f46256132");
        assert!(value.get("size").is_none());
        assert!(value.get("url").is_none());
    }

    #[test]
    fn test_tree_deserialize() {
        let tree: Tree = serde_json::from_str(
            r#"{
                "sha": "9fb037999f264ba9a7fc6274d15fa3ae2ab98312",
                "tree": [
                    {"path": "file.rb", "mode": "100644", "type": "blob", "size": 30,
                     "sha": "44b4fc6d56897b048c772eb4087f854f46256132"}
                ],
                "truncated": false
            }"#,
        )
        .unwrap();
        assert_eq!(tree.entries.len(), 1);
        assert_eq!(tree.entries[0].size, Some(30));
        assert_eq!(tree.truncated, Some(false));
    }

    #[test]
    fn test_create_tree_body_without_base() {
        let entries = [TreeEntry::delete("a", "100644", "blob")];
        let body = CreateTree {
            base_tree: "",
            tree: &entries,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("base_tree").is_none());
        assert_eq!(value["tree"][0]["sha"], serde_json::Value::Null);
    }

    #[test]
    fn test_strip_refs() {
        assert_eq!(strip_refs("refs/heads/main"), "heads/main");
        assert_eq!(strip_refs("heads/main"), "heads/main");
        assert_eq!(
            serde_json::to_value(CreateRef {
                git_ref: format!("refs/{}", strip_refs("heads/topic")),
                sha: "abc",
            })
            .unwrap(),
            json!({"ref": "refs/heads/topic", "sha": "abc"})
        );
    }
}
