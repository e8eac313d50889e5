// Billing API.
// Actions, Packages and shared storage usage for organizations and users.

use std::collections::HashMap;

use reqwest::Method;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::client::Client;
use crate::error::Result;
use crate::options::{ListOptions, add_options};
use crate::response::Response;

// The usage summaries below are required fields: GitHub sends every one of
// them, zero when unused.

/// Minutes used per runner OS.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MinutesUsedBreakdown(pub HashMap<String, u64>);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionBilling {
    pub total_minutes_used: f64,
    pub total_paid_minutes_used: f64,
    pub included_minutes: f64,
    #[serde(default)]
    pub minutes_used_breakdown: MinutesUsedBreakdown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageBilling {
    pub total_gigabytes_bandwidth_used: u64,
    pub total_paid_gigabytes_bandwidth_used: u64,
    pub included_gigabytes_bandwidth: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageBilling {
    pub days_left_in_billing_cycle: u32,
    pub estimated_paid_storage_for_month: f64,
    pub estimated_storage_for_month: f64,
}

/// Advanced Security committers counted against the license.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveCommitters {
    pub total_advanced_security_committers: Option<u64>,
    pub total_count: Option<u64>,
    #[serde(default)]
    pub repositories: Vec<RepositoryActiveCommitters>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryActiveCommitters {
    pub name: Option<String>,
    pub advanced_security_committers: Option<u64>,
    #[serde(default)]
    pub advanced_security_committers_breakdown: Vec<AdvancedSecurityCommittersBreakdown>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvancedSecurityCommittersBreakdown {
    pub user_login: Option<String>,
    pub last_pushed_date: Option<String>,
}

pub struct BillingService<'a> {
    client: &'a Client,
}

impl<'a> BillingService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<(T, Response)> {
        let req = self.client.new_request::<()>(Method::GET, path, None)?;
        self.client.execute(req).await
    }

    pub async fn get_actions_billing_org(&self, org: &str) -> Result<(ActionBilling, Response)> {
        self.get(&format!("orgs/{}/settings/billing/actions", org)).await
    }

    pub async fn get_packages_billing_org(&self, org: &str) -> Result<(PackageBilling, Response)> {
        self.get(&format!("orgs/{}/settings/billing/packages", org)).await
    }

    pub async fn get_storage_billing_org(&self, org: &str) -> Result<(StorageBilling, Response)> {
        self.get(&format!("orgs/{}/settings/billing/shared-storage", org))
            .await
    }

    pub async fn get_advanced_security_active_committers_org(
        &self,
        org: &str,
        opts: Option<&ListOptions>,
    ) -> Result<(ActiveCommitters, Response)> {
        let path = add_options(
            &format!("orgs/{}/settings/billing/advanced-security", org),
            opts,
        )?;
        self.get(&path).await
    }

    pub async fn get_actions_billing_user(&self, user: &str) -> Result<(ActionBilling, Response)> {
        self.get(&format!("users/{}/settings/billing/actions", user)).await
    }

    pub async fn get_packages_billing_user(&self, user: &str) -> Result<(PackageBilling, Response)> {
        self.get(&format!("users/{}/settings/billing/packages", user)).await
    }

    pub async fn get_storage_billing_user(&self, user: &str) -> Result<(StorageBilling, Response)> {
        self.get(&format!("users/{}/settings/billing/shared-storage", user))
            .await
    }
}
