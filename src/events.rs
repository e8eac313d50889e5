// Webhook event payloads.
// Maps GitHub event type names (the X-GitHub-Event header) to typed payloads.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::services::actions::{Workflow, WorkflowJob, WorkflowRun};
use crate::services::hooks::Hook;
use crate::services::issues::{Issue, IssueComment, Label};
use crate::services::organizations::{Membership, Organization};
use crate::services::repositories::{Release, Repository};
use crate::services::secret_scanning::SecretScanningAlert;
use crate::services::users::User;

/// Installation reference carried by events delivered to GitHub Apps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallationRef {
    pub id: Option<u64>,
    pub node_id: Option<String>,
}

/// Before/after values of edited fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditChange {
    pub from: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditChanges {
    pub title: Option<EditChange>,
    pub body: Option<EditChange>,
    pub name: Option<EditChange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingEvent {
    pub zen: Option<String>,
    pub hook_id: Option<u64>,
    pub hook: Option<Hook>,
    pub installation: Option<InstallationRef>,
}

/// A commit as it appears in a push payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadCommit {
    pub id: Option<String>,
    pub tree_id: Option<String>,
    pub distinct: Option<bool>,
    pub message: Option<String>,
    pub timestamp: Option<String>,
    pub url: Option<String>,
    pub author: Option<CommitAuthor>,
    pub committer: Option<CommitAuthor>,
    #[serde(default)]
    pub added: Vec<String>,
    #[serde(default)]
    pub removed: Vec<String>,
    #[serde(default)]
    pub modified: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushEvent {
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub created: Option<bool>,
    pub deleted: Option<bool>,
    pub forced: Option<bool>,
    pub base_ref: Option<String>,
    pub compare: Option<String>,
    #[serde(default)]
    pub commits: Vec<HeadCommit>,
    pub head_commit: Option<HeadCommit>,
    pub pusher: Option<CommitAuthor>,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
    pub installation: Option<InstallationRef>,
}

/// Branch or tag creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEvent {
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    /// `branch` or `tag`.
    pub ref_type: Option<String>,
    pub master_branch: Option<String>,
    pub description: Option<String>,
    pub pusher_type: Option<String>,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
    pub installation: Option<InstallationRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEvent {
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub ref_type: Option<String>,
    pub pusher_type: Option<String>,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
    pub installation: Option<InstallationRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForkEvent {
    pub forkee: Option<Repository>,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
    pub installation: Option<InstallationRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuesEvent {
    pub action: Option<String>,
    pub issue: Option<Issue>,
    pub assignee: Option<User>,
    pub label: Option<Label>,
    pub changes: Option<EditChanges>,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
    pub installation: Option<InstallationRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueCommentEvent {
    pub action: Option<String>,
    pub issue: Option<Issue>,
    pub comment: Option<IssueComment>,
    pub changes: Option<EditChanges>,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
    pub installation: Option<InstallationRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEvent {
    pub action: Option<String>,
    pub label: Option<Label>,
    pub changes: Option<EditChanges>,
    pub repository: Option<Repository>,
    pub organization: Option<Organization>,
    pub sender: Option<User>,
    pub installation: Option<InstallationRef>,
}

/// Branch side of a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestBranch {
    pub label: Option<String>,
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub sha: Option<String>,
    pub user: Option<User>,
    pub repo: Option<Repository>,
}

/// Pull request as carried by webhook payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestPayload {
    pub id: Option<u64>,
    pub number: Option<u64>,
    pub state: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub draft: Option<bool>,
    pub merged: Option<bool>,
    pub merge_commit_sha: Option<String>,
    pub html_url: Option<String>,
    pub user: Option<User>,
    pub head: Option<PullRequestBranch>,
    pub base: Option<PullRequestBranch>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestEvent {
    pub action: Option<String>,
    pub number: Option<u64>,
    pub pull_request: Option<PullRequestPayload>,
    pub changes: Option<EditChanges>,
    pub requested_reviewer: Option<User>,
    pub label: Option<Label>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
    pub installation: Option<InstallationRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseEvent {
    pub action: Option<String>,
    pub release: Option<Release>,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
    pub installation: Option<InstallationRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarEvent {
    pub action: Option<String>,
    pub starred_at: Option<String>,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchEvent {
    pub action: Option<String>,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
    pub installation: Option<InstallationRef>,
}

/// Collaborator added to, removed from or changed on a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberEvent {
    pub action: Option<String>,
    pub member: Option<User>,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
    pub installation: Option<InstallationRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationEvent {
    pub action: Option<String>,
    pub invitation: Option<serde_json::Value>,
    pub membership: Option<Membership>,
    pub organization: Option<Organization>,
    pub sender: Option<User>,
    pub installation: Option<InstallationRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryEvent {
    pub action: Option<String>,
    pub repository: Option<Repository>,
    pub changes: Option<serde_json::Value>,
    pub organization: Option<Organization>,
    pub sender: Option<User>,
    pub installation: Option<InstallationRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowDispatchEvent {
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    /// Path of the workflow file.
    pub workflow: Option<String>,
    pub inputs: Option<serde_json::Map<String, serde_json::Value>>,
    pub repository: Option<Repository>,
    pub organization: Option<Organization>,
    pub sender: Option<User>,
    pub installation: Option<InstallationRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowJobEvent {
    pub action: Option<String>,
    pub workflow_job: Option<WorkflowJob>,
    pub repository: Option<Repository>,
    pub organization: Option<Organization>,
    pub sender: Option<User>,
    pub installation: Option<InstallationRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRunEvent {
    pub action: Option<String>,
    pub workflow: Option<Workflow>,
    pub workflow_run: Option<WorkflowRun>,
    pub repository: Option<Repository>,
    pub organization: Option<Organization>,
    pub sender: Option<User>,
    pub installation: Option<InstallationRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretScanningAlertEvent {
    pub action: Option<String>,
    pub alert: Option<SecretScanningAlert>,
    pub repository: Option<Repository>,
    pub organization: Option<Organization>,
    pub sender: Option<User>,
    pub installation: Option<InstallationRef>,
}

/// Sent when the webhook itself is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaEvent {
    pub action: Option<String>,
    pub hook_id: Option<u64>,
    pub hook: Option<Hook>,
    pub repository: Option<Repository>,
    pub organization: Option<Organization>,
    pub sender: Option<User>,
    pub installation: Option<InstallationRef>,
}

/// A decoded webhook payload.
#[derive(Debug, Clone)]
pub enum Event {
    Ping(PingEvent),
    Push(PushEvent),
    Create(CreateEvent),
    Delete(DeleteEvent),
    Fork(ForkEvent),
    Issues(IssuesEvent),
    IssueComment(IssueCommentEvent),
    Label(LabelEvent),
    PullRequest(PullRequestEvent),
    Release(ReleaseEvent),
    Star(StarEvent),
    Watch(WatchEvent),
    Member(MemberEvent),
    Organization(OrganizationEvent),
    Repository(RepositoryEvent),
    WorkflowDispatch(WorkflowDispatchEvent),
    WorkflowJob(WorkflowJobEvent),
    WorkflowRun(WorkflowRunEvent),
    SecretScanningAlert(SecretScanningAlertEvent),
    Meta(MetaEvent),
}

impl Event {
    /// Decode `payload` as the event named `event_type`.
    pub fn parse(event_type: &str, payload: &[u8]) -> Result<Self> {
        let event = match event_type {
            "ping" => Event::Ping(serde_json::from_slice(payload)?),
            "push" => Event::Push(serde_json::from_slice(payload)?),
            "create" => Event::Create(serde_json::from_slice(payload)?),
            "delete" => Event::Delete(serde_json::from_slice(payload)?),
            "fork" => Event::Fork(serde_json::from_slice(payload)?),
            "issues" => Event::Issues(serde_json::from_slice(payload)?),
            "issue_comment" => Event::IssueComment(serde_json::from_slice(payload)?),
            "label" => Event::Label(serde_json::from_slice(payload)?),
            "pull_request" => Event::PullRequest(serde_json::from_slice(payload)?),
            "release" => Event::Release(serde_json::from_slice(payload)?),
            "star" => Event::Star(serde_json::from_slice(payload)?),
            "watch" => Event::Watch(serde_json::from_slice(payload)?),
            "member" => Event::Member(serde_json::from_slice(payload)?),
            "organization" => Event::Organization(serde_json::from_slice(payload)?),
            "repository" => Event::Repository(serde_json::from_slice(payload)?),
            "workflow_dispatch" => Event::WorkflowDispatch(serde_json::from_slice(payload)?),
            "workflow_job" => Event::WorkflowJob(serde_json::from_slice(payload)?),
            "workflow_run" => Event::WorkflowRun(serde_json::from_slice(payload)?),
            "secret_scanning_alert" => {
                Event::SecretScanningAlert(serde_json::from_slice(payload)?)
            }
            "meta" => Event::Meta(serde_json::from_slice(payload)?),
            other => return Err(Error::UnknownEvent(other.to_string())),
        };
        Ok(event)
    }

    /// The `X-GitHub-Event` name of this payload.
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::Ping(_) => "ping",
            Event::Push(_) => "push",
            Event::Create(_) => "create",
            Event::Delete(_) => "delete",
            Event::Fork(_) => "fork",
            Event::Issues(_) => "issues",
            Event::IssueComment(_) => "issue_comment",
            Event::Label(_) => "label",
            Event::PullRequest(_) => "pull_request",
            Event::Release(_) => "release",
            Event::Star(_) => "star",
            Event::Watch(_) => "watch",
            Event::Member(_) => "member",
            Event::Organization(_) => "organization",
            Event::Repository(_) => "repository",
            Event::WorkflowDispatch(_) => "workflow_dispatch",
            Event::WorkflowJob(_) => "workflow_job",
            Event::WorkflowRun(_) => "workflow_run",
            Event::SecretScanningAlert(_) => "secret_scanning_alert",
            Event::Meta(_) => "meta",
        }
    }
}
