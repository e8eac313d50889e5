// Repositories API.
// Repository CRUD, branches, tags, topics, releases and repository webhooks.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::{Error, Result};
use crate::options::{Direction, ListCursorOptions, ListOptions, add_options};
use crate::response::Response;
use crate::services::hooks::{Hook, HookDelivery, HookRequest, HookScope};
use crate::services::organizations::Organization;
use crate::services::users::User;

/// GitHub repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: Option<u64>,
    pub node_id: Option<String>,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub owner: Option<User>,
    pub organization: Option<Organization>,
    pub private: Option<bool>,
    pub visibility: Option<String>,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub fork: Option<bool>,
    pub archived: Option<bool>,
    pub disabled: Option<bool>,
    pub is_template: Option<bool>,
    pub default_branch: Option<String>,
    pub language: Option<String>,
    pub html_url: Option<String>,
    pub url: Option<String>,
    pub clone_url: Option<String>,
    pub git_url: Option<String>,
    pub ssh_url: Option<String>,
    pub forks_count: Option<u64>,
    pub stargazers_count: Option<u64>,
    pub watchers_count: Option<u64>,
    pub open_issues_count: Option<u64>,
    pub size: Option<u64>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub has_issues: Option<bool>,
    pub has_projects: Option<bool>,
    pub has_wiki: Option<bool>,
    pub has_pages: Option<bool>,
    pub has_downloads: Option<bool>,
    pub has_discussions: Option<bool>,
    pub allow_merge_commit: Option<bool>,
    pub allow_squash_merge: Option<bool>,
    pub allow_rebase_merge: Option<bool>,
    pub delete_branch_on_merge: Option<bool>,
    pub permissions: Option<HashMap<String, bool>>,
    pub parent: Option<Box<Repository>>,
    pub source: Option<Box<Repository>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
}

/// Body for creating or editing a repository. Unset fields are left alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepositoryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_issues: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_projects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_wiki: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_template: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_init: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gitignore_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_merge_commit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_squash_merge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_rebase_merge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_branch_on_merge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

/// Options for listing the authenticated user's repositories.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepositoryListByAuthenticatedUserOptions {
    /// `all`, `public` or `private`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    /// Comma-separated subset of `owner,collaborator,organization_member`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub repo_type: Option<String>,
    /// `created`, `updated`, `pushed` or `full_name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub list: ListOptions,
}

/// Options for listing another user's repositories.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepositoryListByUserOptions {
    /// `all`, `owner` or `member`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub repo_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(flatten)]
    pub list: ListOptions,
}

/// Options for listing an organization's repositories.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepositoryListByOrgOptions {
    /// `all`, `public`, `private`, `forks`, `sources` or `member`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub repo_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(flatten)]
    pub list: ListOptions,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListContributorsOptions {
    /// Include anonymous contributors (`"true"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anon: Option<String>,
    #[serde(flatten)]
    pub list: ListOptions,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BranchListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,
    #[serde(flatten)]
    pub list: ListOptions,
}

/// A contributor with commit count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contributor {
    pub login: Option<String>,
    pub id: Option<u64>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    #[serde(rename = "type")]
    pub contributor_type: Option<String>,
    pub contributions: Option<u64>,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Commit pointer used by branches and tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef {
    pub sha: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryTag {
    pub name: Option<String>,
    pub commit: Option<CommitRef>,
    pub zipball_url: Option<String>,
    pub tarball_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub name: Option<String>,
    pub commit: Option<CommitRef>,
    pub protected: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Topics {
    names: Vec<String>,
}

/// A release and its assets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    pub id: Option<u64>,
    pub node_id: Option<String>,
    pub tag_name: Option<String>,
    pub target_commitish: Option<String>,
    pub name: Option<String>,
    pub body: Option<String>,
    pub draft: Option<bool>,
    pub prerelease: Option<bool>,
    pub make_latest: Option<String>,
    pub author: Option<User>,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
    pub url: Option<String>,
    pub html_url: Option<String>,
    pub upload_url: Option<String>,
    pub tarball_url: Option<String>,
    pub zipball_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Body for creating a release.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReleaseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_commitish: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<bool>,
    /// `true`, `false` or `legacy`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make_latest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_release_notes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discussion_category_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseAsset {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub label: Option<String>,
    pub state: Option<String>,
    pub content_type: Option<String>,
    pub size: Option<u64>,
    pub download_count: Option<u64>,
    pub browser_download_url: Option<String>,
    pub uploader: Option<User>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Query options for uploading a release asset.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadOptions {
    /// Asset file name; defaults to the uploaded file's name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Content type; defaults to `application/octet-stream`.
    #[serde(skip)]
    pub media_type: Option<String>,
}

pub struct RepositoriesService<'a> {
    client: &'a Client,
}

impl<'a> RepositoriesService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn hooks(&self, owner: &str, repo: &str) -> HookScope<'a> {
        HookScope {
            client: self.client,
            prefix: format!("repos/{}/{}", owner, repo),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<(T, Response)> {
        let req = self.client.new_request::<()>(Method::GET, path, None)?;
        self.client.execute(req).await
    }

    pub async fn list_by_authenticated_user(
        &self,
        opts: Option<&RepositoryListByAuthenticatedUserOptions>,
    ) -> Result<(Vec<Repository>, Response)> {
        self.get_json(&add_options("user/repos", opts)?).await
    }

    pub async fn list_by_user(
        &self,
        user: &str,
        opts: Option<&RepositoryListByUserOptions>,
    ) -> Result<(Vec<Repository>, Response)> {
        self.get_json(&add_options(&format!("users/{}/repos", user), opts)?)
            .await
    }

    pub async fn list_by_org(
        &self,
        org: &str,
        opts: Option<&RepositoryListByOrgOptions>,
    ) -> Result<(Vec<Repository>, Response)> {
        self.get_json(&add_options(&format!("orgs/{}/repos", org), opts)?)
            .await
    }

    pub async fn get(&self, owner: &str, repo: &str) -> Result<(Repository, Response)> {
        self.get_json(&format!("repos/{}/{}", owner, repo)).await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<(Repository, Response)> {
        self.get_json(&format!("repositories/{}", id)).await
    }

    /// Create a repository under `org`, or for the authenticated user when
    /// `org` is empty.
    pub async fn create(&self, org: &str, repo: &RepositoryRequest) -> Result<(Repository, Response)> {
        let path = if org.is_empty() {
            "user/repos".to_string()
        } else {
            format!("orgs/{}/repos", org)
        };
        let req = self.client.new_request(Method::POST, &path, Some(repo))?;
        self.client.execute(req).await
    }

    pub async fn edit(
        &self,
        owner: &str,
        repo: &str,
        update: &RepositoryRequest,
    ) -> Result<(Repository, Response)> {
        let path = format!("repos/{}/{}", owner, repo);
        let req = self.client.new_request(Method::PATCH, &path, Some(update))?;
        self.client.execute(req).await
    }

    pub async fn delete(&self, owner: &str, repo: &str) -> Result<Response> {
        let path = format!("repos/{}/{}", owner, repo);
        let req = self.client.new_request::<()>(Method::DELETE, &path, None)?;
        self.client.execute_empty(req).await
    }

    pub async fn list_contributors(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&ListContributorsOptions>,
    ) -> Result<(Vec<Contributor>, Response)> {
        let path = add_options(&format!("repos/{}/{}/contributors", owner, repo), opts)?;
        self.get_json(&path).await
    }

    /// Bytes of code per language.
    pub async fn list_languages(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<(HashMap<String, u64>, Response)> {
        self.get_json(&format!("repos/{}/{}/languages", owner, repo))
            .await
    }

    pub async fn list_tags(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&ListOptions>,
    ) -> Result<(Vec<RepositoryTag>, Response)> {
        let path = add_options(&format!("repos/{}/{}/tags", owner, repo), opts)?;
        self.get_json(&path).await
    }

    pub async fn list_branches(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&BranchListOptions>,
    ) -> Result<(Vec<Branch>, Response)> {
        let path = add_options(&format!("repos/{}/{}/branches", owner, repo), opts)?;
        self.get_json(&path).await
    }

    pub async fn get_branch(&self, owner: &str, repo: &str, branch: &str) -> Result<(Branch, Response)> {
        self.get_json(&format!("repos/{}/{}/branches/{}", owner, repo, branch))
            .await
    }

    pub async fn list_all_topics(&self, owner: &str, repo: &str) -> Result<(Vec<String>, Response)> {
        let (topics, resp): (Topics, _) = self
            .get_json(&format!("repos/{}/{}/topics", owner, repo))
            .await?;
        Ok((topics.names, resp))
    }

    /// Replace the topic list. An empty slice clears all topics.
    pub async fn replace_all_topics(
        &self,
        owner: &str,
        repo: &str,
        topics: &[String],
    ) -> Result<(Vec<String>, Response)> {
        let path = format!("repos/{}/{}/topics", owner, repo);
        let body = Topics {
            names: topics.to_vec(),
        };
        let req = self.client.new_request(Method::PUT, &path, Some(&body))?;
        let (topics, resp): (Topics, _) = self.client.execute(req).await?;
        Ok((topics.names, resp))
    }

    pub async fn list_hooks(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&ListOptions>,
    ) -> Result<(Vec<Hook>, Response)> {
        self.hooks(owner, repo).list(opts).await
    }

    pub async fn get_hook(&self, owner: &str, repo: &str, id: u64) -> Result<(Hook, Response)> {
        self.hooks(owner, repo).get(id).await
    }

    pub async fn create_hook(
        &self,
        owner: &str,
        repo: &str,
        hook: &HookRequest,
    ) -> Result<(Hook, Response)> {
        self.hooks(owner, repo).create(hook).await
    }

    pub async fn edit_hook(
        &self,
        owner: &str,
        repo: &str,
        id: u64,
        hook: &HookRequest,
    ) -> Result<(Hook, Response)> {
        self.hooks(owner, repo).edit(id, hook).await
    }

    pub async fn delete_hook(&self, owner: &str, repo: &str, id: u64) -> Result<Response> {
        self.hooks(owner, repo).delete(id).await
    }

    pub async fn ping_hook(&self, owner: &str, repo: &str, id: u64) -> Result<Response> {
        self.hooks(owner, repo).ping(id).await
    }

    pub async fn list_hook_deliveries(
        &self,
        owner: &str,
        repo: &str,
        id: u64,
        opts: Option<&ListCursorOptions>,
    ) -> Result<(Vec<HookDelivery>, Response)> {
        self.hooks(owner, repo).list_deliveries(id, opts).await
    }

    pub async fn get_hook_delivery(
        &self,
        owner: &str,
        repo: &str,
        hook_id: u64,
        delivery_id: u64,
    ) -> Result<(HookDelivery, Response)> {
        self.hooks(owner, repo).get_delivery(hook_id, delivery_id).await
    }

    pub async fn redeliver_hook_delivery(
        &self,
        owner: &str,
        repo: &str,
        hook_id: u64,
        delivery_id: u64,
    ) -> Result<Response> {
        self.hooks(owner, repo).redeliver(hook_id, delivery_id).await
    }

    pub async fn list_releases(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&ListOptions>,
    ) -> Result<(Vec<Release>, Response)> {
        let path = add_options(&format!("repos/{}/{}/releases", owner, repo), opts)?;
        self.get_json(&path).await
    }

    pub async fn get_release(&self, owner: &str, repo: &str, id: u64) -> Result<(Release, Response)> {
        self.get_json(&format!("repos/{}/{}/releases/{}", owner, repo, id))
            .await
    }

    pub async fn get_latest_release(&self, owner: &str, repo: &str) -> Result<(Release, Response)> {
        self.get_json(&format!("repos/{}/{}/releases/latest", owner, repo))
            .await
    }

    pub async fn create_release(
        &self,
        owner: &str,
        repo: &str,
        release: &ReleaseRequest,
    ) -> Result<(Release, Response)> {
        let path = format!("repos/{}/{}/releases", owner, repo);
        let req = self.client.new_request(Method::POST, &path, Some(release))?;
        self.client.execute(req).await
    }

    /// Upload the file at `file` as an asset of release `id`.
    pub async fn upload_release_asset(
        &self,
        owner: &str,
        repo: &str,
        id: u64,
        opts: &UploadOptions,
        file: &Path,
    ) -> Result<(ReleaseAsset, Response)> {
        if tokio::fs::metadata(file).await?.is_dir() {
            return Err(Error::Config(format!(
                "the asset to upload can't be a directory: {}",
                file.display()
            )));
        }
        let content = tokio::fs::read(file).await?;

        let mut query = opts.clone();
        if query.name.is_none() {
            query.name = file.file_name().map(|n| n.to_string_lossy().into_owned());
        }
        let path = add_options(
            &format!("repos/{}/{}/releases/{}/assets", owner, repo, id),
            Some(&query),
        )?;
        let media_type = opts
            .media_type
            .as_deref()
            .unwrap_or("application/octet-stream");

        let req = self.client.new_upload_request(&path, content, media_type)?;
        self.client.execute(req).await
    }
}
