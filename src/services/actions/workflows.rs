// Actions workflow endpoints.
// List, fetch, dispatch, enable and disable workflows.

use reqwest::Method;
use serde::Serialize;

use crate::error::Result;
use crate::options::{ListOptions, add_options};
use crate::response::Response;

use super::ActionsService;
use super::types::{Workflow, Workflows};

/// Body for triggering a `workflow_dispatch` run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateWorkflowDispatchEventRequest {
    /// Branch or tag to run the workflow on.
    #[serde(rename = "ref")]
    pub git_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ActionsService<'_> {
    pub async fn list_workflows(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&ListOptions>,
    ) -> Result<(Workflows, Response)> {
        let path = add_options(&format!("repos/{}/{}/actions/workflows", owner, repo), opts)?;
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn get_workflow_by_id(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: u64,
    ) -> Result<(Workflow, Response)> {
        self.get_workflow(owner, repo, &workflow_id.to_string()).await
    }

    /// Fetch a workflow by its file name, e.g. `ci.yml`.
    pub async fn get_workflow_by_file_name(
        &self,
        owner: &str,
        repo: &str,
        file_name: &str,
    ) -> Result<(Workflow, Response)> {
        self.get_workflow(owner, repo, file_name).await
    }

    async fn get_workflow(&self, owner: &str, repo: &str, workflow: &str) -> Result<(Workflow, Response)> {
        let path = format!("repos/{}/{}/actions/workflows/{}", owner, repo, workflow);
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn create_workflow_dispatch_event_by_id(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: u64,
        event: &CreateWorkflowDispatchEventRequest,
    ) -> Result<Response> {
        self.dispatch(owner, repo, &workflow_id.to_string(), event)
            .await
    }

    pub async fn create_workflow_dispatch_event_by_file_name(
        &self,
        owner: &str,
        repo: &str,
        file_name: &str,
        event: &CreateWorkflowDispatchEventRequest,
    ) -> Result<Response> {
        self.dispatch(owner, repo, file_name, event).await
    }

    async fn dispatch(
        &self,
        owner: &str,
        repo: &str,
        workflow: &str,
        event: &CreateWorkflowDispatchEventRequest,
    ) -> Result<Response> {
        let path = format!(
            "repos/{}/{}/actions/workflows/{}/dispatches",
            owner, repo, workflow
        );
        let req = self.client.new_request(Method::POST, &path, Some(event))?;
        self.client.execute_empty(req).await
    }

    pub async fn enable_workflow_by_id(&self, owner: &str, repo: &str, workflow_id: u64) -> Result<Response> {
        self.set_workflow_state(owner, repo, workflow_id, "enable").await
    }

    pub async fn disable_workflow_by_id(&self, owner: &str, repo: &str, workflow_id: u64) -> Result<Response> {
        self.set_workflow_state(owner, repo, workflow_id, "disable").await
    }

    async fn set_workflow_state(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: u64,
        action: &str,
    ) -> Result<Response> {
        let path = format!(
            "repos/{}/{}/actions/workflows/{}/{}",
            owner, repo, workflow_id, action
        );
        let req = self.client.new_request::<()>(Method::PUT, &path, None)?;
        self.client.execute_empty(req).await
    }
}
