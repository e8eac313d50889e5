// Self-hosted runner endpoints.
// Repository, organization and enterprise runners share one set of endpoint shapes.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Result;
use crate::options::{ListOptions, add_options};
use crate::response::Response;

use super::ActionsService;

/// Self-hosted runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runner {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub os: Option<String>,
    pub status: Option<RunnerStatus>,
    pub busy: Option<bool>,
    pub ephemeral: Option<bool>,
    pub runner_group_id: Option<u64>,
    #[serde(default)]
    pub labels: Vec<RunnerLabel>,
}

/// Runner status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunnerStatus {
    Online,
    Offline,
    #[serde(other)]
    Unknown,
}

/// Runner label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerLabel {
    pub id: Option<u64>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub label_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Runners {
    pub total_count: Option<u64>,
    #[serde(default)]
    pub runners: Vec<Runner>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListRunnersOptions {
    /// Only runners with exactly this name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub list: ListOptions,
}

/// Token for `config.sh --token`; valid for one hour.
/// `token` is always present in GitHub's reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationToken {
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Token for `config.sh remove --token`; valid for one hour.
/// `token` is always present in GitHub's reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveToken {
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// A runner binary available for download.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerApplicationDownload {
    pub os: Option<String>,
    pub architecture: Option<String>,
    pub download_url: Option<String>,
    pub filename: Option<String>,
    pub temp_download_token: Option<String>,
    pub sha256_checksum: Option<String>,
}

/// Runner endpoints under `repos/o/r/actions`, `orgs/o/actions` or `enterprises/e/actions`.
pub(crate) struct RunnerScope<'a> {
    pub client: &'a Client,
    pub prefix: String,
}

impl RunnerScope<'_> {
    pub async fn list(&self, opts: Option<&ListRunnersOptions>) -> Result<(Runners, Response)> {
        let path = add_options(&format!("{}/runners", self.prefix), opts)?;
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn get(&self, runner_id: u64) -> Result<(Runner, Response)> {
        let path = format!("{}/runners/{}", self.prefix, runner_id);
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn remove(&self, runner_id: u64) -> Result<Response> {
        let path = format!("{}/runners/{}", self.prefix, runner_id);
        let req = self.client.new_request::<()>(Method::DELETE, &path, None)?;
        self.client.execute_empty(req).await
    }

    pub async fn registration_token(&self) -> Result<(RegistrationToken, Response)> {
        let path = format!("{}/runners/registration-token", self.prefix);
        let req = self.client.new_request::<()>(Method::POST, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn remove_token(&self) -> Result<(RemoveToken, Response)> {
        let path = format!("{}/runners/remove-token", self.prefix);
        let req = self.client.new_request::<()>(Method::POST, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn applications_download(&self) -> Result<(Vec<RunnerApplicationDownload>, Response)> {
        let path = format!("{}/runners/downloads", self.prefix);
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }
}

impl<'a> ActionsService<'a> {
    fn repo_runners(&self, owner: &str, repo: &str) -> RunnerScope<'a> {
        RunnerScope {
            client: self.client,
            prefix: format!("repos/{}/{}/actions", owner, repo),
        }
    }

    fn org_runners(&self, org: &str) -> RunnerScope<'a> {
        RunnerScope {
            client: self.client,
            prefix: format!("orgs/{}/actions", org),
        }
    }

    /// Get runners for a repository (requires admin access).
    pub async fn list_runners(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&ListRunnersOptions>,
    ) -> Result<(Runners, Response)> {
        self.repo_runners(owner, repo).list(opts).await
    }

    pub async fn get_runner(&self, owner: &str, repo: &str, runner_id: u64) -> Result<(Runner, Response)> {
        self.repo_runners(owner, repo).get(runner_id).await
    }

    pub async fn remove_runner(&self, owner: &str, repo: &str, runner_id: u64) -> Result<Response> {
        self.repo_runners(owner, repo).remove(runner_id).await
    }

    pub async fn create_registration_token(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<(RegistrationToken, Response)> {
        self.repo_runners(owner, repo).registration_token().await
    }

    pub async fn create_remove_token(&self, owner: &str, repo: &str) -> Result<(RemoveToken, Response)> {
        self.repo_runners(owner, repo).remove_token().await
    }

    pub async fn list_runner_applications_download(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<(Vec<RunnerApplicationDownload>, Response)> {
        self.repo_runners(owner, repo).applications_download().await
    }

    pub async fn list_organization_runners(
        &self,
        org: &str,
        opts: Option<&ListRunnersOptions>,
    ) -> Result<(Runners, Response)> {
        self.org_runners(org).list(opts).await
    }

    pub async fn get_organization_runner(&self, org: &str, runner_id: u64) -> Result<(Runner, Response)> {
        self.org_runners(org).get(runner_id).await
    }

    pub async fn remove_organization_runner(&self, org: &str, runner_id: u64) -> Result<Response> {
        self.org_runners(org).remove(runner_id).await
    }

    pub async fn create_organization_registration_token(
        &self,
        org: &str,
    ) -> Result<(RegistrationToken, Response)> {
        self.org_runners(org).registration_token().await
    }

    pub async fn create_organization_remove_token(&self, org: &str) -> Result<(RemoveToken, Response)> {
        self.org_runners(org).remove_token().await
    }

    pub async fn list_organization_runner_applications_download(
        &self,
        org: &str,
    ) -> Result<(Vec<RunnerApplicationDownload>, Response)> {
        self.org_runners(org).applications_download().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_deserialize() {
        let runner: Runner = serde_json::from_str(
            r#"{
                "id": 23, "name": "MBP", "os": "macos", "status": "online", "busy": true,
                "labels": [{"id": 5, "name": "self-hosted", "type": "read-only"}]
            }"#,
        )
        .unwrap();

        assert_eq!(runner.id, Some(23));
        assert_eq!(runner.status, Some(RunnerStatus::Online));
        assert_eq!(runner.labels[0].label_type.as_deref(), Some("read-only"));
    }

    #[test]
    fn test_runners_sparse_entries() {
        let runners: Runners = serde_json::from_str(r#"{"runners": [{"os": "linux"}]}"#).unwrap();

        assert_eq!(runners.total_count, None);
        assert_eq!(runners.runners[0].id, None);
        assert_eq!(runners.runners[0].status, None);
    }
}
