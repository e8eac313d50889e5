// Enterprise API.
// Enterprise runners, code security settings and the enterprise audit log.

use std::collections::HashMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Result;
use crate::options::{ListCursorOptions, add_options};
use crate::response::Response;
use crate::services::actions::runners::{
    ListRunnersOptions, RegistrationToken, RemoveToken, RunnerApplicationDownload, RunnerScope,
    Runners,
};

/// Defaults applied to new repositories of an enterprise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnterpriseSecurityAnalysisSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advanced_security_enabled_for_new_repositories: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_scanning_enabled_for_new_repositories: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_scanning_push_protection_enabled_for_new_repositories: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_scanning_push_protection_custom_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_scanning_validity_checks_enabled: Option<bool>,
}

/// One audit log event. Fields GitHub adds per action land in `additional_fields`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditEntry {
    pub action: Option<String>,
    pub actor: Option<String>,
    pub actor_id: Option<u64>,
    pub actor_location: Option<HashMap<String, String>>,
    pub business: Option<String>,
    pub business_id: Option<u64>,
    /// Milliseconds since the epoch.
    pub created_at: Option<i64>,
    #[serde(rename = "@timestamp")]
    pub timestamp: Option<i64>,
    #[serde(rename = "_document_id")]
    pub document_id: Option<String>,
    pub org: Option<String>,
    pub org_id: Option<u64>,
    pub repo: Option<String>,
    pub user: Option<String>,
    pub user_id: Option<u64>,
    #[serde(flatten)]
    pub additional_fields: HashMap<String, serde_json::Value>,
}

/// Options for audit log queries.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetAuditLogOptions {
    /// Search phrase, e.g. `action:repo.create actor:octocat`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phrase: Option<String>,
    /// `web`, `git` or `all`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    /// `asc` or `desc`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(flatten)]
    pub cursor: ListCursorOptions,
}

pub struct EnterpriseService<'a> {
    client: &'a Client,
}

impl<'a> EnterpriseService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn runners(&self, enterprise: &str) -> RunnerScope<'a> {
        RunnerScope {
            client: self.client,
            prefix: format!("enterprises/{}/actions", enterprise),
        }
    }

    pub async fn list_runners(
        &self,
        enterprise: &str,
        opts: Option<&ListRunnersOptions>,
    ) -> Result<(Runners, Response)> {
        self.runners(enterprise).list(opts).await
    }

    pub async fn create_registration_token(&self, enterprise: &str) -> Result<(RegistrationToken, Response)> {
        self.runners(enterprise).registration_token().await
    }

    pub async fn create_remove_token(&self, enterprise: &str) -> Result<(RemoveToken, Response)> {
        self.runners(enterprise).remove_token().await
    }

    pub async fn remove_runner(&self, enterprise: &str, runner_id: u64) -> Result<Response> {
        self.runners(enterprise).remove(runner_id).await
    }

    pub async fn list_runner_applications_download(
        &self,
        enterprise: &str,
    ) -> Result<(Vec<RunnerApplicationDownload>, Response)> {
        self.runners(enterprise).applications_download().await
    }

    pub async fn get_code_security_and_analysis(
        &self,
        enterprise: &str,
    ) -> Result<(EnterpriseSecurityAnalysisSettings, Response)> {
        let path = format!("enterprises/{}/code_security_and_analysis", enterprise);
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn update_code_security_and_analysis(
        &self,
        enterprise: &str,
        settings: &EnterpriseSecurityAnalysisSettings,
    ) -> Result<Response> {
        let path = format!("enterprises/{}/code_security_and_analysis", enterprise);
        let req = self.client.new_request(Method::PATCH, &path, Some(settings))?;
        self.client.execute_empty(req).await
    }

    /// Turn a security product on or off for every repository.
    ///
    /// `security_product` is e.g. `advanced_security` or `secret_scanning`;
    /// `enablement` is `enable_all` or `disable_all`.
    pub async fn enable_disable_security_feature(
        &self,
        enterprise: &str,
        security_product: &str,
        enablement: &str,
    ) -> Result<Response> {
        let path = format!(
            "enterprises/{}/{}/{}",
            enterprise, security_product, enablement
        );
        let req = self.client.new_request::<()>(Method::POST, &path, None)?;
        self.client.execute_empty(req).await
    }

    pub async fn get_audit_log(
        &self,
        enterprise: &str,
        opts: Option<&GetAuditLogOptions>,
    ) -> Result<(Vec<AuditEntry>, Response)> {
        let path = add_options(&format!("enterprises/{}/audit-log", enterprise), opts)?;
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }
}
