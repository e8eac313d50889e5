// Actions artifact endpoints.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;
use crate::options::{ListOptions, add_options};
use crate::response::Response;

use super::ActionsService;

/// Run that produced an artifact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactWorkflowRun {
    pub id: Option<u64>,
    pub repository_id: Option<u64>,
    pub head_repository_id: Option<u64>,
    pub head_branch: Option<String>,
    pub head_sha: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Artifact {
    pub id: Option<u64>,
    pub node_id: Option<String>,
    pub name: Option<String>,
    pub size_in_bytes: Option<u64>,
    pub url: Option<String>,
    pub archive_download_url: Option<String>,
    pub expired: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub workflow_run: Option<ArtifactWorkflowRun>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactList {
    pub total_count: Option<u64>,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListArtifactsOptions {
    /// Only artifacts with exactly this name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub list: ListOptions,
}

impl ActionsService<'_> {
    pub async fn list_artifacts(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&ListArtifactsOptions>,
    ) -> Result<(ArtifactList, Response)> {
        let path = add_options(&format!("repos/{}/{}/actions/artifacts", owner, repo), opts)?;
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn list_workflow_run_artifacts(
        &self,
        owner: &str,
        repo: &str,
        run_id: u64,
        opts: Option<&ListArtifactsOptions>,
    ) -> Result<(ArtifactList, Response)> {
        let path = add_options(
            &format!("repos/{}/{}/actions/runs/{}/artifacts", owner, repo, run_id),
            opts,
        )?;
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn get_artifact(&self, owner: &str, repo: &str, artifact_id: u64) -> Result<(Artifact, Response)> {
        let path = format!("repos/{}/{}/actions/artifacts/{}", owner, repo, artifact_id);
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    /// Short-lived download URL of the artifact's zip archive.
    pub async fn download_artifact(&self, owner: &str, repo: &str, artifact_id: u64) -> Result<(Url, Response)> {
        let path = format!(
            "repos/{}/{}/actions/artifacts/{}/zip",
            owner, repo, artifact_id
        );
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute_redirect(req).await
    }

    pub async fn delete_artifact(&self, owner: &str, repo: &str, artifact_id: u64) -> Result<Response> {
        let path = format!("repos/{}/{}/actions/artifacts/{}", owner, repo, artifact_id);
        let req = self.client.new_request::<()>(Method::DELETE, &path, None)?;
        self.client.execute_empty(req).await
    }
}
