// Secret scanning API.
// Alerts for leaked credentials at enterprise, organization and repository level.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Result;
use crate::options::{Direction, ListOptions, add_options};
use crate::response::Response;
use crate::services::repositories::Repository;
use crate::services::users::User;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretScanningAlert {
    pub number: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub html_url: Option<String>,
    pub locations_url: Option<String>,
    /// `open` or `resolved`.
    pub state: Option<String>,
    /// `false_positive`, `wont_fix`, `revoked`, `used_in_tests` or `pattern_edited`.
    pub resolution: Option<String>,
    pub resolution_comment: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolved_by: Option<User>,
    pub secret_type: Option<String>,
    pub secret_type_display_name: Option<String>,
    pub secret: Option<String>,
    pub validity: Option<String>,
    pub repository: Option<Repository>,
    pub push_protection_bypassed: Option<bool>,
    pub push_protection_bypassed_by: Option<User>,
    pub push_protection_bypassed_at: Option<DateTime<Utc>>,
}

/// Where in the repository a secret was found.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretScanningAlertLocation {
    /// `commit`, `issue_title`, `issue_body`, `issue_comment`, ...
    #[serde(rename = "type")]
    pub location_type: Option<String>,
    pub details: Option<SecretScanningAlertLocationDetails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretScanningAlertLocationDetails {
    pub path: Option<String>,
    pub start_line: Option<u64>,
    pub end_line: Option<u64>,
    pub start_column: Option<u64>,
    pub end_column: Option<u64>,
    pub blob_sha: Option<String>,
    pub blob_url: Option<String>,
    pub commit_sha: Option<String>,
    pub commit_url: Option<String>,
    pub issue_title_url: Option<String>,
    pub issue_body_url: Option<String>,
    pub issue_comment_url: Option<String>,
}

/// Filters for alert listings. Listings accept both page and cursor pagination.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SecretScanningAlertListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Comma-separated secret types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_type: Option<String>,
    /// Comma-separated resolutions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    /// `active`, `inactive` or `unknown`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<String>,
    /// `created` or `updated`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(flatten)]
    pub list: ListOptions,
}

/// Body for resolving or reopening an alert.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SecretScanningAlertUpdateOptions {
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_comment: Option<String>,
}

pub struct SecretScanningService<'a> {
    client: &'a Client,
}

impl<'a> SecretScanningService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    async fn list(
        &self,
        path: &str,
        opts: Option<&SecretScanningAlertListOptions>,
    ) -> Result<(Vec<SecretScanningAlert>, Response)> {
        let path = add_options(path, opts)?;
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn list_alerts_for_enterprise(
        &self,
        enterprise: &str,
        opts: Option<&SecretScanningAlertListOptions>,
    ) -> Result<(Vec<SecretScanningAlert>, Response)> {
        self.list(&format!("enterprises/{}/secret-scanning/alerts", enterprise), opts)
            .await
    }

    pub async fn list_alerts_for_org(
        &self,
        org: &str,
        opts: Option<&SecretScanningAlertListOptions>,
    ) -> Result<(Vec<SecretScanningAlert>, Response)> {
        self.list(&format!("orgs/{}/secret-scanning/alerts", org), opts)
            .await
    }

    pub async fn list_alerts_for_repo(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&SecretScanningAlertListOptions>,
    ) -> Result<(Vec<SecretScanningAlert>, Response)> {
        self.list(&format!("repos/{}/{}/secret-scanning/alerts", owner, repo), opts)
            .await
    }

    pub async fn get_alert(&self, owner: &str, repo: &str, number: u64) -> Result<(SecretScanningAlert, Response)> {
        let path = format!("repos/{}/{}/secret-scanning/alerts/{}", owner, repo, number);
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn update_alert(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        update: &SecretScanningAlertUpdateOptions,
    ) -> Result<(SecretScanningAlert, Response)> {
        let path = format!("repos/{}/{}/secret-scanning/alerts/{}", owner, repo, number);
        let req = self.client.new_request(Method::PATCH, &path, Some(update))?;
        self.client.execute(req).await
    }

    pub async fn list_locations_for_alert(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        opts: Option<&ListOptions>,
    ) -> Result<(Vec<SecretScanningAlertLocation>, Response)> {
        let path = add_options(
            &format!(
                "repos/{}/{}/secret-scanning/alerts/{}/locations",
                owner, repo, number
            ),
            opts,
        )?;
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }
}
