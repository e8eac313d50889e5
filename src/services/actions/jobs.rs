// Actions job endpoints.

use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::error::Result;
use crate::options::{ListOptions, add_options};
use crate::response::Response;

use super::ActionsService;
use super::types::{Jobs, WorkflowJob};

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListWorkflowJobsOptions {
    /// `latest` (default) or `all` attempts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(flatten)]
    pub list: ListOptions,
}

impl ActionsService<'_> {
    /// Get jobs for a workflow run.
    pub async fn list_workflow_jobs(
        &self,
        owner: &str,
        repo: &str,
        run_id: u64,
        opts: Option<&ListWorkflowJobsOptions>,
    ) -> Result<(Jobs, Response)> {
        let path = add_options(
            &format!("repos/{}/{}/actions/runs/{}/jobs", owner, repo, run_id),
            opts,
        )?;
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn get_workflow_job_by_id(
        &self,
        owner: &str,
        repo: &str,
        job_id: u64,
    ) -> Result<(WorkflowJob, Response)> {
        let path = format!("repos/{}/{}/actions/jobs/{}", owner, repo, job_id);
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    /// Short-lived download URL of a job's plain text log.
    pub async fn get_workflow_job_logs(
        &self,
        owner: &str,
        repo: &str,
        job_id: u64,
    ) -> Result<(Url, Response)> {
        let path = format!("repos/{}/{}/actions/jobs/{}/logs", owner, repo, job_id);
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute_redirect(req).await
    }
}
