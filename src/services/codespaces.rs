// Codespaces API.
// Codespace lifecycle plus user and repository codespace secrets.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Result;
use crate::options::{ListOptions, add_options};
use crate::response::Response;
use crate::services::actions::secrets::{EncryptedSecret, PublicKey, Secret, SecretScope, Secrets};
use crate::services::repositories::Repository;
use crate::services::users::User;

/// Hardware configuration of a codespace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodespacesMachine {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub operating_system: Option<String>,
    pub storage_in_bytes: Option<u64>,
    pub memory_in_bytes: Option<u64>,
    pub cpus: Option<u32>,
    pub prebuild_availability: Option<String>,
}

/// Git state of the codespace's working copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodespacesGitStatus {
    pub ahead: Option<u64>,
    pub behind: Option<u64>,
    pub has_unpushed_changes: Option<bool>,
    pub has_uncommitted_changes: Option<bool>,
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Codespace {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub environment_id: Option<String>,
    pub owner: Option<User>,
    pub billable_owner: Option<User>,
    pub repository: Option<Repository>,
    pub machine: Option<CodespacesMachine>,
    pub devcontainer_path: Option<String>,
    pub prebuild: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_used_at: Option<DateTime<Utc>>,
    /// `Available`, `Shutdown`, `Starting`, ...
    pub state: Option<String>,
    pub url: Option<String>,
    pub git_status: Option<CodespacesGitStatus>,
    pub location: Option<String>,
    pub idle_timeout_minutes: Option<u32>,
    pub web_url: Option<String>,
    pub machines_url: Option<String>,
    pub start_url: Option<String>,
    pub stop_url: Option<String>,
    pub retention_period_minutes: Option<u32>,
    pub retention_expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListCodespaces {
    pub total_count: Option<u64>,
    #[serde(default)]
    pub codespaces: Vec<Codespace>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListCodespacesOptions {
    /// Only codespaces of this repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_id: Option<u64>,
    #[serde(flatten)]
    pub list: ListOptions,
}

/// Body for creating a codespace in a repository.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCodespaceOptions {
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
    /// Defaults to the user's closest region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devcontainer_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_repo_permissions_opt_out: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_timeout_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_period_minutes: Option<u32>,
}

pub struct CodespacesService<'a> {
    client: &'a Client,
}

impl<'a> CodespacesService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn user_secrets(&self) -> SecretScope<'a> {
        SecretScope {
            client: self.client,
            prefix: "user/codespaces".to_string(),
        }
    }

    fn repo_secrets(&self, owner: &str, repo: &str) -> SecretScope<'a> {
        SecretScope {
            client: self.client,
            prefix: format!("repos/{}/{}/codespaces", owner, repo),
        }
    }

    /// Codespaces of the authenticated user.
    pub async fn list(&self, opts: Option<&ListCodespacesOptions>) -> Result<(ListCodespaces, Response)> {
        let path = add_options("user/codespaces", opts)?;
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn list_in_repo(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&ListOptions>,
    ) -> Result<(ListCodespaces, Response)> {
        let path = add_options(&format!("repos/{}/{}/codespaces", owner, repo), opts)?;
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn create_in_repo(
        &self,
        owner: &str,
        repo: &str,
        request: &CreateCodespaceOptions,
    ) -> Result<(Codespace, Response)> {
        let path = format!("repos/{}/{}/codespaces", owner, repo);
        let req = self.client.new_request(Method::POST, &path, Some(request))?;
        self.client.execute(req).await
    }

    pub async fn start(&self, codespace_name: &str) -> Result<(Codespace, Response)> {
        let path = format!("user/codespaces/{}/start", codespace_name);
        let req = self.client.new_request::<()>(Method::POST, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn stop(&self, codespace_name: &str) -> Result<(Codespace, Response)> {
        let path = format!("user/codespaces/{}/stop", codespace_name);
        let req = self.client.new_request::<()>(Method::POST, &path, None)?;
        self.client.execute(req).await
    }

    /// Delete a codespace. GitHub answers 202 and deletes asynchronously.
    pub async fn delete(&self, codespace_name: &str) -> Result<Response> {
        let path = format!("user/codespaces/{}", codespace_name);
        let req = self.client.new_request::<()>(Method::DELETE, &path, None)?;
        self.client.execute_empty(req).await
    }

    pub async fn list_user_secrets(&self, opts: Option<&ListOptions>) -> Result<(Secrets, Response)> {
        self.user_secrets().list(opts).await
    }

    pub async fn get_user_public_key(&self) -> Result<(PublicKey, Response)> {
        self.user_secrets().public_key().await
    }

    pub async fn get_user_secret(&self, name: &str) -> Result<(Secret, Response)> {
        self.user_secrets().get(name).await
    }

    /// User secrets take `selected_repository_ids` to limit their reach.
    pub async fn create_or_update_user_secret(&self, secret: &EncryptedSecret) -> Result<Response> {
        self.user_secrets().create_or_update(secret).await
    }

    pub async fn delete_user_secret(&self, name: &str) -> Result<Response> {
        self.user_secrets().delete(name).await
    }

    pub async fn list_repo_secrets(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&ListOptions>,
    ) -> Result<(Secrets, Response)> {
        self.repo_secrets(owner, repo).list(opts).await
    }

    pub async fn get_repo_public_key(&self, owner: &str, repo: &str) -> Result<(PublicKey, Response)> {
        self.repo_secrets(owner, repo).public_key().await
    }

    pub async fn get_repo_secret(&self, owner: &str, repo: &str, name: &str) -> Result<(Secret, Response)> {
        self.repo_secrets(owner, repo).get(name).await
    }

    pub async fn create_or_update_repo_secret(
        &self,
        owner: &str,
        repo: &str,
        secret: &EncryptedSecret,
    ) -> Result<Response> {
        self.repo_secrets(owner, repo).create_or_update(secret).await
    }

    pub async fn delete_repo_secret(&self, owner: &str, repo: &str, name: &str) -> Result<Response> {
        self.repo_secrets(owner, repo).delete(name).await
    }
}
