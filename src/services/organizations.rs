// Organizations API.
// Organization profiles, membership and organization webhooks.

use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Result;
use crate::options::{ListCursorOptions, ListOptions, add_options};
use crate::response::Response;
use crate::services::hooks::{Hook, HookDelivery, HookRequest, HookScope};
use crate::services::users::User;

/// Billing plan of an organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub name: Option<String>,
    pub space: Option<u64>,
    pub private_repos: Option<u64>,
    pub filled_seats: Option<u64>,
    pub seats: Option<u64>,
}

/// GitHub organization. Also the body of `edit`; unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_repos: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_private_repos: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owned_private_repos: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub org_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub two_factor_requirement_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_repository_permission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members_can_create_repositories: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_commit_signoff_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advanced_security_enabled_for_new_repositories: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_scanning_enabled_for_new_repositories: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_scanning_push_protection_enabled_for_new_repositories: Option<bool>,
}

/// A user's membership in an organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Membership {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// `active` or `pending`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// `admin`, `member` or `billing_manager`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Options for `GET /organizations`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrganizationsListOptions {
    /// Only list organizations with an id greater than this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Options for listing organization members.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListMembersOptions {
    /// List public members only. Switches to the `public_members` endpoint.
    #[serde(skip)]
    pub public_only: bool,
    /// `2fa_disabled` or `all`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// `all`, `admin` or `member`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub list: ListOptions,
}

pub struct OrganizationsService<'a> {
    client: &'a Client,
}

impl<'a> OrganizationsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn hooks(&self, org: &str) -> HookScope<'a> {
        HookScope {
            client: self.client,
            prefix: format!("orgs/{}", org),
        }
    }

    /// List organizations of `user`. Empty `user` lists the authenticated user's.
    pub async fn list(
        &self,
        user: &str,
        opts: Option<&ListOptions>,
    ) -> Result<(Vec<Organization>, Response)> {
        let path = if user.is_empty() {
            "user/orgs".to_string()
        } else {
            format!("users/{}/orgs", user)
        };
        let path = add_options(&path, opts)?;
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    /// List every organization in creation order. Page with `since`.
    pub async fn list_all(
        &self,
        opts: Option<&OrganizationsListOptions>,
    ) -> Result<(Vec<Organization>, Response)> {
        let path = add_options("organizations", opts)?;
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn get(&self, org: &str) -> Result<(Organization, Response)> {
        let req = self
            .client
            .new_request::<()>(Method::GET, &format!("orgs/{}", org), None)?;
        self.client.execute(req).await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<(Organization, Response)> {
        let req = self
            .client
            .new_request::<()>(Method::GET, &format!("organizations/{}", id), None)?;
        self.client.execute(req).await
    }

    pub async fn edit(&self, org: &str, update: &Organization) -> Result<(Organization, Response)> {
        let req = self
            .client
            .new_request(Method::PATCH, &format!("orgs/{}", org), Some(update))?;
        self.client.execute(req).await
    }

    /// Delete an organization. GitHub finishes the deletion asynchronously.
    pub async fn delete(&self, org: &str) -> Result<Response> {
        let req = self
            .client
            .new_request::<()>(Method::DELETE, &format!("orgs/{}", org), None)?;
        self.client.execute_empty(req).await
    }

    pub async fn list_members(
        &self,
        org: &str,
        opts: Option<&ListMembersOptions>,
    ) -> Result<(Vec<User>, Response)> {
        let endpoint = if opts.is_some_and(|o| o.public_only) {
            "public_members"
        } else {
            "members"
        };
        let path = add_options(&format!("orgs/{}/{}", org, endpoint), opts)?;
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    /// Whether `user` is a member of `org`. GitHub answers 204 or 404.
    pub async fn is_member(&self, org: &str, user: &str) -> Result<(bool, Response)> {
        let path = format!("orgs/{}/members/{}", org, user);
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        let resp = self.client.execute_allowing(req, StatusCode::NOT_FOUND).await?;
        Ok((resp.status != StatusCode::NOT_FOUND.as_u16(), resp))
    }

    pub async fn remove_member(&self, org: &str, user: &str) -> Result<Response> {
        let path = format!("orgs/{}/members/{}", org, user);
        let req = self.client.new_request::<()>(Method::DELETE, &path, None)?;
        self.client.execute_empty(req).await
    }

    /// Membership of `user` in `org`. Empty `user` means the authenticated user.
    pub async fn get_org_membership(&self, user: &str, org: &str) -> Result<(Membership, Response)> {
        let path = if user.is_empty() {
            format!("user/memberships/orgs/{}", org)
        } else {
            format!("orgs/{}/memberships/{}", org, user)
        };
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    /// Invite or update a member (`role`), or activate the authenticated
    /// user's own pending membership (`state`) when `user` is empty.
    pub async fn edit_org_membership(
        &self,
        user: &str,
        org: &str,
        membership: &Membership,
    ) -> Result<(Membership, Response)> {
        let (method, path) = if user.is_empty() {
            (Method::PATCH, format!("user/memberships/orgs/{}", org))
        } else {
            (Method::PUT, format!("orgs/{}/memberships/{}", org, user))
        };
        let req = self.client.new_request(method, &path, Some(membership))?;
        self.client.execute(req).await
    }

    pub async fn list_hooks(&self, org: &str, opts: Option<&ListOptions>) -> Result<(Vec<Hook>, Response)> {
        self.hooks(org).list(opts).await
    }

    pub async fn get_hook(&self, org: &str, id: u64) -> Result<(Hook, Response)> {
        self.hooks(org).get(id).await
    }

    pub async fn create_hook(&self, org: &str, hook: &HookRequest) -> Result<(Hook, Response)> {
        self.hooks(org).create(hook).await
    }

    pub async fn edit_hook(&self, org: &str, id: u64, hook: &HookRequest) -> Result<(Hook, Response)> {
        self.hooks(org).edit(id, hook).await
    }

    pub async fn delete_hook(&self, org: &str, id: u64) -> Result<Response> {
        self.hooks(org).delete(id).await
    }

    pub async fn ping_hook(&self, org: &str, id: u64) -> Result<Response> {
        self.hooks(org).ping(id).await
    }

    pub async fn list_hook_deliveries(
        &self,
        org: &str,
        id: u64,
        opts: Option<&ListCursorOptions>,
    ) -> Result<(Vec<HookDelivery>, Response)> {
        self.hooks(org).list_deliveries(id, opts).await
    }

    pub async fn get_hook_delivery(
        &self,
        org: &str,
        hook_id: u64,
        delivery_id: u64,
    ) -> Result<(HookDelivery, Response)> {
        self.hooks(org).get_delivery(hook_id, delivery_id).await
    }

    pub async fn redeliver_hook_delivery(
        &self,
        org: &str,
        hook_id: u64,
        delivery_id: u64,
    ) -> Result<Response> {
        self.hooks(org).redeliver(hook_id, delivery_id).await
    }
}
