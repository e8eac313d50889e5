// Encrypted secrets.
// The same endpoint shapes serve Actions (repo, org) and Codespaces (user, repo) secrets.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Result;
use crate::options::{ListOptions, add_options};
use crate::response::Response;

use super::ActionsService;

/// Key to seal secret values with before upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    pub key_id: Option<String>,
    /// Base64-encoded libsodium public key.
    pub key: Option<String>,
}

/// Secret metadata. GitHub never returns secret values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    pub name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// `all`, `private` or `selected`; org and user secrets only.
    pub visibility: Option<String>,
    pub selected_repositories_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Secrets {
    pub total_count: Option<u64>,
    #[serde(default)]
    pub secrets: Vec<Secret>,
}

/// Repository ids a secret is shared with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedRepoIds(pub Vec<u64>);

/// A secret value already sealed with the scope's [`PublicKey`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct EncryptedSecret {
    /// Goes into the URL, not the body.
    #[serde(skip)]
    pub name: String,
    pub key_id: String,
    pub encrypted_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_repository_ids: Option<SelectedRepoIds>,
}

/// Secret endpoints under a prefix such as `repos/o/r/actions` or `user/codespaces`.
pub(crate) struct SecretScope<'a> {
    pub client: &'a Client,
    pub prefix: String,
}

impl SecretScope<'_> {
    pub async fn public_key(&self) -> Result<(PublicKey, Response)> {
        let path = format!("{}/secrets/public-key", self.prefix);
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn list(&self, opts: Option<&ListOptions>) -> Result<(Secrets, Response)> {
        let path = add_options(&format!("{}/secrets", self.prefix), opts)?;
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn get(&self, name: &str) -> Result<(Secret, Response)> {
        let path = format!("{}/secrets/{}", self.prefix, name);
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    /// Creates (201) or updates (204) the secret named `secret.name`.
    pub async fn create_or_update(&self, secret: &EncryptedSecret) -> Result<Response> {
        let path = format!("{}/secrets/{}", self.prefix, secret.name);
        let req = self.client.new_request(Method::PUT, &path, Some(secret))?;
        self.client.execute_empty(req).await
    }

    pub async fn delete(&self, name: &str) -> Result<Response> {
        let path = format!("{}/secrets/{}", self.prefix, name);
        let req = self.client.new_request::<()>(Method::DELETE, &path, None)?;
        self.client.execute_empty(req).await
    }
}

impl<'a> ActionsService<'a> {
    fn repo_secrets(&self, owner: &str, repo: &str) -> SecretScope<'a> {
        SecretScope {
            client: self.client,
            prefix: format!("repos/{}/{}/actions", owner, repo),
        }
    }

    fn org_secrets(&self, org: &str) -> SecretScope<'a> {
        SecretScope {
            client: self.client,
            prefix: format!("orgs/{}/actions", org),
        }
    }

    pub async fn get_repo_public_key(&self, owner: &str, repo: &str) -> Result<(PublicKey, Response)> {
        self.repo_secrets(owner, repo).public_key().await
    }

    pub async fn list_repo_secrets(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&ListOptions>,
    ) -> Result<(Secrets, Response)> {
        self.repo_secrets(owner, repo).list(opts).await
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

    pub async fn get_org_public_key(&self, org: &str) -> Result<(PublicKey, Response)> {
        self.org_secrets(org).public_key().await
    }

    pub async fn list_org_secrets(&self, org: &str, opts: Option<&ListOptions>) -> Result<(Secrets, Response)> {
        self.org_secrets(org).list(opts).await
    }

    pub async fn get_org_secret(&self, org: &str, name: &str) -> Result<(Secret, Response)> {
        self.org_secrets(org).get(name).await
    }

    /// Org secrets need a `visibility`; `selected` also needs repository ids.
    pub async fn create_or_update_org_secret(&self, org: &str, secret: &EncryptedSecret) -> Result<Response> {
        self.org_secrets(org).create_or_update(secret).await
    }

    pub async fn delete_org_secret(&self, org: &str, name: &str) -> Result<Response> {
        self.org_secrets(org).delete(name).await
    }
}
