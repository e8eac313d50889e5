// Rate limit categories and the rate_limit endpoint.
// Maps requests to GitHub's rate limit buckets and exposes the current quotas.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Result;
use crate::response::{Rate, Response};

/// GitHub's rate limit buckets. Each is tracked separately by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitCategory {
    Core,
    Search,
    CodeSearch,
    Graphql,
    IntegrationManifest,
    SourceImport,
    CodeScanningUpload,
    ActionsRunnerRegistration,
    Scim,
    DependencySnapshots,
    AuditLog,
}

impl RateLimitCategory {
    /// Pick the bucket a request counts against from its method and API path.
    ///
    /// `path` is relative to the API root, without a leading slash.
    pub fn for_request(method: &Method, path: &str) -> Self {
        let path = path.trim_start_matches('/');
        let path = path.split('?').next().unwrap_or(path);
        let segments: Vec<&str> = path.split('/').collect();
        let is_post = *method == Method::POST;

        // repos/{owner}/{repo}/<rest>
        let repo_rest = match segments.as_slice() {
            ["repos", _, _, rest @ ..] => Some(rest),
            _ => None,
        };

        if path.starts_with("search/code") {
            RateLimitCategory::CodeSearch
        } else if path.starts_with("search/") {
            RateLimitCategory::Search
        } else if path == "graphql" {
            RateLimitCategory::Graphql
        } else if is_post && path.starts_with("app-manifests/") && path.ends_with("/conversions") {
            RateLimitCategory::IntegrationManifest
        } else if repo_rest.is_some_and(|rest| rest.first() == Some(&"import")) {
            RateLimitCategory::SourceImport
        } else if is_post
            && repo_rest.is_some_and(|rest| rest.starts_with(&["code-scanning", "sarifs"]))
        {
            RateLimitCategory::CodeScanningUpload
        } else if is_post && path.ends_with("actions/runners/registration-token") {
            RateLimitCategory::ActionsRunnerRegistration
        } else if path.starts_with("scim/") {
            RateLimitCategory::Scim
        } else if is_post
            && repo_rest.is_some_and(|rest| rest.starts_with(&["dependency-graph", "snapshots"]))
        {
            RateLimitCategory::DependencySnapshots
        } else if path.ends_with("/audit-log") {
            RateLimitCategory::AuditLog
        } else {
            RateLimitCategory::Core
        }
    }
}

/// Quotas reported by `GET /rate_limit`, one per bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimits {
    pub core: Option<Rate>,
    pub search: Option<Rate>,
    pub code_search: Option<Rate>,
    pub graphql: Option<Rate>,
    pub integration_manifest: Option<Rate>,
    pub source_import: Option<Rate>,
    pub code_scanning_upload: Option<Rate>,
    pub actions_runner_registration: Option<Rate>,
    pub scim: Option<Rate>,
    pub dependency_snapshots: Option<Rate>,
    pub audit_log: Option<Rate>,
}

impl RateLimits {
    pub fn get(&self, category: RateLimitCategory) -> Option<&Rate> {
        match category {
            RateLimitCategory::Core => self.core.as_ref(),
            RateLimitCategory::Search => self.search.as_ref(),
            RateLimitCategory::CodeSearch => self.code_search.as_ref(),
            RateLimitCategory::Graphql => self.graphql.as_ref(),
            RateLimitCategory::IntegrationManifest => self.integration_manifest.as_ref(),
            RateLimitCategory::SourceImport => self.source_import.as_ref(),
            RateLimitCategory::CodeScanningUpload => self.code_scanning_upload.as_ref(),
            RateLimitCategory::ActionsRunnerRegistration => {
                self.actions_runner_registration.as_ref()
            }
            RateLimitCategory::Scim => self.scim.as_ref(),
            RateLimitCategory::DependencySnapshots => self.dependency_snapshots.as_ref(),
            RateLimitCategory::AuditLog => self.audit_log.as_ref(),
        }
    }

    /// Every category with a known rate.
    pub fn entries(&self) -> Vec<(RateLimitCategory, Rate)> {
        [
            RateLimitCategory::Core,
            RateLimitCategory::Search,
            RateLimitCategory::CodeSearch,
            RateLimitCategory::Graphql,
            RateLimitCategory::IntegrationManifest,
            RateLimitCategory::SourceImport,
            RateLimitCategory::CodeScanningUpload,
            RateLimitCategory::ActionsRunnerRegistration,
            RateLimitCategory::Scim,
            RateLimitCategory::DependencySnapshots,
            RateLimitCategory::AuditLog,
        ]
        .into_iter()
        .filter_map(|c| self.get(c).map(|r| (c, r.clone())))
        .collect()
    }
}

#[derive(Debug, Deserialize)]
struct RateLimitsResponse {
    resources: RateLimits,
}

/// Handle for `GET /rate_limit`.
pub struct RateLimitService<'a> {
    client: &'a Client,
}

impl<'a> RateLimitService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetch current quotas and refresh the client's cached table.
    ///
    /// This call does not count against the core quota.
    pub async fn get(&self) -> Result<(RateLimits, Response)> {
        let req = self
            .client
            .new_request::<()>(Method::GET, "rate_limit", None)?;
        let (wrapper, resp): (RateLimitsResponse, _) = self.client.execute(req).await?;

        for (category, rate) in wrapper.resources.entries() {
            self.client.store_rate(category, rate);
        }

        Ok((wrapper.resources, resp))
    }
}
