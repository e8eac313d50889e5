// Issues API.
// Issues, issue comments and labels.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Result;
use crate::options::{Direction, ListOptions, add_options, comma_separated};
use crate::response::Response;
use crate::services::repositories::Repository;
use crate::services::users::User;

/// A GitHub issue. Pull requests are issues too; they carry `pull_request`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Issue {
    pub id: Option<u64>,
    pub node_id: Option<String>,
    pub number: Option<u64>,
    pub state: Option<String>,
    pub state_reason: Option<String>,
    pub locked: Option<bool>,
    pub active_lock_reason: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub author_association: Option<String>,
    pub user: Option<User>,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub assignee: Option<User>,
    #[serde(default)]
    pub assignees: Vec<User>,
    pub comments: Option<u64>,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub closed_by: Option<User>,
    pub url: Option<String>,
    pub html_url: Option<String>,
    pub comments_url: Option<String>,
    pub repository_url: Option<String>,
    pub milestone: Option<Milestone>,
    pub pull_request: Option<PullRequestLinks>,
    pub repository: Option<Box<Repository>>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequestLinks {
    pub url: Option<String>,
    pub html_url: Option<String>,
    pub diff_url: Option<String>,
    pub patch_url: Option<String>,
    pub merged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Milestone {
    pub id: Option<u64>,
    pub number: Option<u64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<String>,
    pub open_issues: Option<u64>,
    pub closed_issues: Option<u64>,
    pub due_on: Option<DateTime<Utc>>,
    pub creator: Option<User>,
}

/// Body for creating or editing an issue.
///
/// `labels` and `assignees` replace the existing sets when present; an empty
/// vector clears them. `milestone` set to `Some(None)` removes the milestone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// `completed`, `not_planned` or `reopened`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<Option<u64>>,
}

/// Options for the cross-repository issue listings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueListOptions {
    /// `assigned`, `created`, `mentioned`, `subscribed` or `all`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// `open`, `closed` or `all`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "comma_separated"
    )]
    pub labels: Vec<String>,
    /// `created`, `updated` or `comments`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub list: ListOptions,
}

/// Options for listing a repository's issues.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueListByRepoOptions {
    /// Milestone number, `*` or `none`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Login, `*` or `none`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentioned: Option<String>,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "comma_separated"
    )]
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub list: ListOptions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueComment {
    pub id: Option<u64>,
    pub node_id: Option<String>,
    pub body: Option<String>,
    pub user: Option<User>,
    pub author_association: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub html_url: Option<String>,
    pub issue_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueListCommentsOptions {
    /// `created` or `updated`; only honored for repository-wide listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub list: ListOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Hex color without the leading `#`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
}

#[derive(Debug, Serialize)]
struct LockRequest<'r> {
    #[serde(skip_serializing_if = "Option::is_none")]
    lock_reason: Option<&'r str>,
}

#[derive(Debug, Serialize)]
struct CommentBody<'r> {
    body: &'r str,
}

pub struct IssuesService<'a> {
    client: &'a Client,
}

impl<'a> IssuesService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    async fn list_issues(&self, path: &str, opts: Option<&IssueListOptions>) -> Result<(Vec<Issue>, Response)> {
        let path = add_options(path, opts)?;
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    /// Issues across all visible repositories when `all` is set, otherwise
    /// across repositories the authenticated user owns or is a member of.
    pub async fn list(&self, all: bool, opts: Option<&IssueListOptions>) -> Result<(Vec<Issue>, Response)> {
        let path = if all { "issues" } else { "user/issues" };
        self.list_issues(path, opts).await
    }

    pub async fn list_by_org(
        &self,
        org: &str,
        opts: Option<&IssueListOptions>,
    ) -> Result<(Vec<Issue>, Response)> {
        self.list_issues(&format!("orgs/{}/issues", org), opts).await
    }

    pub async fn list_by_repo(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&IssueListByRepoOptions>,
    ) -> Result<(Vec<Issue>, Response)> {
        let path = add_options(&format!("repos/{}/{}/issues", owner, repo), opts)?;
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn get(&self, owner: &str, repo: &str, number: u64) -> Result<(Issue, Response)> {
        let path = format!("repos/{}/{}/issues/{}", owner, repo, number);
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn create(&self, owner: &str, repo: &str, issue: &IssueRequest) -> Result<(Issue, Response)> {
        let path = format!("repos/{}/{}/issues", owner, repo);
        let req = self.client.new_request(Method::POST, &path, Some(issue))?;
        self.client.execute(req).await
    }

    pub async fn edit(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        issue: &IssueRequest,
    ) -> Result<(Issue, Response)> {
        let path = format!("repos/{}/{}/issues/{}", owner, repo, number);
        let req = self.client.new_request(Method::PATCH, &path, Some(issue))?;
        self.client.execute(req).await
    }

    /// Lock an issue's conversation. `reason` is one of `off-topic`,
    /// `too heated`, `resolved` or `spam`.
    pub async fn lock(&self, owner: &str, repo: &str, number: u64, reason: Option<&str>) -> Result<Response> {
        let path = format!("repos/{}/{}/issues/{}/lock", owner, repo, number);
        let body = LockRequest { lock_reason: reason };
        let req = self.client.new_request(Method::PUT, &path, Some(&body))?;
        self.client.execute_empty(req).await
    }

    pub async fn unlock(&self, owner: &str, repo: &str, number: u64) -> Result<Response> {
        let path = format!("repos/{}/{}/issues/{}/lock", owner, repo, number);
        let req = self.client.new_request::<()>(Method::DELETE, &path, None)?;
        self.client.execute_empty(req).await
    }

    /// Comments on one issue, or on every issue of the repository when
    /// `number` is `None`.
    pub async fn list_comments(
        &self,
        owner: &str,
        repo: &str,
        number: Option<u64>,
        opts: Option<&IssueListCommentsOptions>,
    ) -> Result<(Vec<IssueComment>, Response)> {
        let path = match number {
            Some(n) => format!("repos/{}/{}/issues/{}/comments", owner, repo, n),
            None => format!("repos/{}/{}/issues/comments", owner, repo),
        };
        let path = add_options(&path, opts)?;
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<(IssueComment, Response)> {
        let path = format!("repos/{}/{}/issues/{}/comments", owner, repo, number);
        let req = self
            .client
            .new_request(Method::POST, &path, Some(&CommentBody { body }))?;
        self.client.execute(req).await
    }

    pub async fn edit_comment(
        &self,
        owner: &str,
        repo: &str,
        comment_id: u64,
        body: &str,
    ) -> Result<(IssueComment, Response)> {
        let path = format!("repos/{}/{}/issues/comments/{}", owner, repo, comment_id);
        let req = self
            .client
            .new_request(Method::PATCH, &path, Some(&CommentBody { body }))?;
        self.client.execute(req).await
    }

    pub async fn delete_comment(&self, owner: &str, repo: &str, comment_id: u64) -> Result<Response> {
        let path = format!("repos/{}/{}/issues/comments/{}", owner, repo, comment_id);
        let req = self.client.new_request::<()>(Method::DELETE, &path, None)?;
        self.client.execute_empty(req).await
    }

    pub async fn list_labels(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&ListOptions>,
    ) -> Result<(Vec<Label>, Response)> {
        let path = add_options(&format!("repos/{}/{}/labels", owner, repo), opts)?;
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn create_label(&self, owner: &str, repo: &str, label: &Label) -> Result<(Label, Response)> {
        let path = format!("repos/{}/{}/labels", owner, repo);
        let req = self.client.new_request(Method::POST, &path, Some(label))?;
        self.client.execute(req).await
    }

    /// Add labels to an issue; returns the issue's full label set.
    pub async fn add_labels_to_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<(Vec<Label>, Response)> {
        let path = format!("repos/{}/{}/issues/{}/labels", owner, repo, number);
        let req = self.client.new_request(Method::POST, &path, Some(labels))?;
        self.client.execute(req).await
    }

    pub async fn remove_label_for_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        label: &str,
    ) -> Result<Response> {
        let path = format!("repos/{}/{}/issues/{}/labels/{}", owner, repo, number, label);
        let req = self.client.new_request::<()>(Method::DELETE, &path, None)?;
        self.client.execute_empty(req).await
    }
}
