// Webhooks and webhook deliveries.
// Shared by the organization and repository services, which differ only in the path prefix.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::client::Client;
use crate::error::{Error, Result};
use crate::events::Event;
use crate::options::{ListCursorOptions, ListOptions, add_options};
use crate::response::Response;

/// A repository or organization webhook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hook {
    pub id: Option<u64>,
    #[serde(rename = "type")]
    pub hook_type: Option<String>,
    pub name: Option<String>,
    pub active: Option<bool>,
    #[serde(default)]
    pub events: Vec<String>,
    pub config: Option<HookConfig>,
    pub url: Option<String>,
    pub ping_url: Option<String>,
    pub test_url: Option<String>,
    pub deliveries_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_response: Option<HashMap<String, serde_json::Value>>,
}

/// Delivery settings of a webhook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// `"0"` or `"1"`, as GitHub sends it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure_ssl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

/// Body for creating or editing a webhook.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HookRequest {
    /// Always `"web"` for repository and organization hooks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<HookConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_events: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_events: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// One attempt GitHub made to deliver a webhook payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookDelivery {
    pub id: Option<u64>,
    pub guid: Option<String>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub redelivery: Option<bool>,
    /// Seconds the delivery took.
    pub duration: Option<f64>,
    pub status: Option<String>,
    pub status_code: Option<u16>,
    pub event: Option<String>,
    pub action: Option<String>,
    pub installation_id: Option<u64>,
    pub repository_id: Option<u64>,
    pub url: Option<String>,

    // Only populated when fetching a single delivery.
    pub request: Option<HookRequestDetails>,
    pub response: Option<HookResponseDetails>,
}

/// Headers and payload GitHub sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookRequestDetails {
    pub headers: Option<HashMap<String, String>>,
    #[serde(rename = "payload")]
    pub raw_payload: Option<Box<RawValue>>,
}

/// Headers and body the receiver answered with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookResponseDetails {
    pub headers: Option<HashMap<String, String>>,
    #[serde(rename = "payload")]
    pub raw_payload: Option<String>,
}

impl HookDelivery {
    /// Decode the delivered payload into the event type named by `event`.
    pub fn parse_request_payload(&self) -> Result<Event> {
        let event = self
            .event
            .as_deref()
            .ok_or_else(|| Error::UnknownEvent("delivery has no event type".to_string()))?;
        let payload = self
            .request
            .as_ref()
            .and_then(|r| r.raw_payload.as_ref())
            .ok_or_else(|| Error::UnknownEvent(format!("{} delivery has no request payload", event)))?;

        Event::parse(event, payload.get().as_bytes())
    }
}

/// Hook endpoints under `repos/{owner}/{repo}` or `orgs/{org}`.
pub(crate) struct HookScope<'a> {
    pub client: &'a Client,
    pub prefix: String,
}

impl HookScope<'_> {
    pub async fn list(&self, opts: Option<&ListOptions>) -> Result<(Vec<Hook>, Response)> {
        let path = add_options(&format!("{}/hooks", self.prefix), opts)?;
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn get(&self, id: u64) -> Result<(Hook, Response)> {
        let path = format!("{}/hooks/{}", self.prefix, id);
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn create(&self, hook: &HookRequest) -> Result<(Hook, Response)> {
        let path = format!("{}/hooks", self.prefix);
        let body = HookRequest {
            name: Some(hook.name.clone().unwrap_or_else(|| "web".to_string())),
            ..hook.clone()
        };
        let req = self.client.new_request(Method::POST, &path, Some(&body))?;
        self.client.execute(req).await
    }

    pub async fn edit(&self, id: u64, hook: &HookRequest) -> Result<(Hook, Response)> {
        let path = format!("{}/hooks/{}", self.prefix, id);
        let req = self.client.new_request(Method::PATCH, &path, Some(hook))?;
        self.client.execute(req).await
    }

    pub async fn delete(&self, id: u64) -> Result<Response> {
        let path = format!("{}/hooks/{}", self.prefix, id);
        let req = self.client.new_request::<()>(Method::DELETE, &path, None)?;
        self.client.execute_empty(req).await
    }

    pub async fn ping(&self, id: u64) -> Result<Response> {
        let path = format!("{}/hooks/{}/pings", self.prefix, id);
        let req = self.client.new_request::<()>(Method::POST, &path, None)?;
        self.client.execute_empty(req).await
    }

    pub async fn list_deliveries(
        &self,
        id: u64,
        opts: Option<&ListCursorOptions>,
    ) -> Result<(Vec<HookDelivery>, Response)> {
        let path = add_options(&format!("{}/hooks/{}/deliveries", self.prefix, id), opts)?;
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    pub async fn get_delivery(&self, id: u64, delivery_id: u64) -> Result<(HookDelivery, Response)> {
        let path = format!("{}/hooks/{}/deliveries/{}", self.prefix, id, delivery_id);
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.execute(req).await
    }

    /// Ask GitHub to deliver a past payload again. GitHub answers 202.
    pub async fn redeliver(&self, id: u64, delivery_id: u64) -> Result<Response> {
        let path = format!(
            "{}/hooks/{}/deliveries/{}/attempts",
            self.prefix, id, delivery_id
        );
        let req = self.client.new_request::<()>(Method::POST, &path, None)?;
        self.client.execute_empty(req).await
    }
}
