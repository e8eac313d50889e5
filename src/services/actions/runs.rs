// Actions workflow run endpoints.
// List, inspect, re-run, cancel and delete runs, and locate their log archives.

use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::error::Result;
use crate::options::{ListOptions, add_options};
use crate::response::Response;

use super::ActionsService;
use super::types::{WorkflowRun, WorkflowRuns};

/// Filters for workflow run listings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListWorkflowRunsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    /// A status (`queued`, `in_progress`, ...) or conclusion (`success`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Date range in GitHub search syntax, e.g. `>=2024-01-01`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_pull_requests: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_suite_id: Option<u64>,
    #[serde(flatten)]
    pub list: ListOptions,
}

impl ActionsService<'_> {
    async fn list_runs(&self, path: &str, opts: Option<&ListWorkflowRunsOptions>) -> Result<(WorkflowRuns, Response)> {
        let path = add_options(path, opts)?;
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    /// Get workflow runs for a repository.
    pub async fn list_repository_workflow_runs(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&ListWorkflowRunsOptions>,
    ) -> Result<(WorkflowRuns, Response)> {
        self.list_runs(&format!("repos/{}/{}/actions/runs", owner, repo), opts)
            .await
    }

    /// Get workflow runs for a specific workflow.
    pub async fn list_workflow_runs_by_id(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: u64,
        opts: Option<&ListWorkflowRunsOptions>,
    ) -> Result<(WorkflowRuns, Response)> {
        let path = format!(
            "repos/{}/{}/actions/workflows/{}/runs",
            owner, repo, workflow_id
        );
        self.list_runs(&path, opts).await
    }

    pub async fn list_workflow_runs_by_file_name(
        &self,
        owner: &str,
        repo: &str,
        file_name: &str,
        opts: Option<&ListWorkflowRunsOptions>,
    ) -> Result<(WorkflowRuns, Response)> {
        let path = format!(
            "repos/{}/{}/actions/workflows/{}/runs",
            owner, repo, file_name
        );
        self.list_runs(&path, opts).await
    }

    pub async fn get_workflow_run_by_id(
        &self,
        owner: &str,
        repo: &str,
        run_id: u64,
    ) -> Result<(WorkflowRun, Response)> {
        let path = format!("repos/{}/{}/actions/runs/{}", owner, repo, run_id);
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn rerun_workflow_by_id(&self, owner: &str, repo: &str, run_id: u64) -> Result<Response> {
        self.run_action(Method::POST, owner, repo, run_id, "/rerun").await
    }

    /// Request cancellation. GitHub answers 202 and cancels asynchronously.
    pub async fn cancel_workflow_run_by_id(&self, owner: &str, repo: &str, run_id: u64) -> Result<Response> {
        self.run_action(Method::POST, owner, repo, run_id, "/cancel").await
    }

    pub async fn delete_workflow_run(&self, owner: &str, repo: &str, run_id: u64) -> Result<Response> {
        self.run_action(Method::DELETE, owner, repo, run_id, "").await
    }

    async fn run_action(
        &self,
        method: Method,
        owner: &str,
        repo: &str,
        run_id: u64,
        suffix: &str,
    ) -> Result<Response> {
        let path = format!("repos/{}/{}/actions/runs/{}{}", owner, repo, run_id, suffix);
        let req = self.client.new_request::<()>(method, &path, None)?;
        self.client.execute_empty(req).await
    }

    /// Short-lived download URL of the run's log archive.
    pub async fn get_workflow_run_logs(
        &self,
        owner: &str,
        repo: &str,
        run_id: u64,
    ) -> Result<(Url, Response)> {
        let path = format!("repos/{}/{}/actions/runs/{}/logs", owner, repo, run_id);
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute_redirect(req).await
    }
}
