// GitHub API HTTP client.
// Handles authentication, rate limiting, and request/response processing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use reqwest::{
    Method, Request, StatusCode,
    header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderValue, LOCATION, USER_AGENT},
    redirect,
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};
use url::Url;

use crate::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_UPLOAD_URL};
use crate::error::{
    AbuseRateLimitError, AcceptedError, Error, ErrorResponse, RateLimitError, Result,
};
use crate::rate_limit::RateLimitCategory;
use crate::response::{Rate, Response};

const GITHUB_API_VERSION: &str = "2022-11-28";
const MEDIA_TYPE_V3: &str = "application/vnd.github+json";
const HEADER_API_VERSION: &str = "x-github-api-version";
const HEADER_OTP: &str = "x-github-otp";
const HEADER_RETRY_AFTER: &str = "retry-after";

fn default_user_agent() -> String {
    format!("ghrest/{}", env!("CARGO_PKG_VERSION"))
}

/// Builder for [`Client`].
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    upload_url: Option<String>,
    token: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a loaded [`ClientConfig`].
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            base_url: config.base_url,
            upload_url: config.upload_url,
            token: config.token,
            user_agent: config.user_agent,
            timeout: config.timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn upload_url(mut self, url: impl Into<String>) -> Self {
        self.upload_url = Some(url.into());
        self
    }

    /// Authenticate every request with `Authorization: Bearer <token>`.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Overall deadline per request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Point the client at a GitHub Enterprise Server instance.
    ///
    /// Adds the trailing slash and the `api/v3/` / `api/uploads/` suffixes
    /// when they are missing.
    pub fn enterprise_urls(mut self, base_url: &str, upload_url: &str) -> Result<Self> {
        self.base_url = Some(enterprise_url(base_url, "api/v3/")?.to_string());
        self.upload_url = Some(enterprise_url(upload_url, "api/uploads/")?.to_string());
        Ok(self)
    }

    pub fn build(self) -> Result<Client> {
        let base_url = Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let upload_url = Url::parse(self.upload_url.as_deref().unwrap_or(DEFAULT_UPLOAD_URL))?;

        let mut headers = HeaderMap::new();
        if let Some(token) = &self.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| Error::Config(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE_V3));
        headers.insert(
            HEADER_API_VERSION,
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        let agent = self.user_agent.unwrap_or_else(default_user_agent);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&agent).map_err(|e| Error::Config(e.to_string()))?,
        );

        let mut http = reqwest::Client::builder().default_headers(headers.clone());
        let mut no_redirect = reqwest::Client::builder()
            .default_headers(headers)
            .redirect(redirect::Policy::none());
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
            no_redirect = no_redirect.timeout(timeout);
        }

        Ok(Client {
            http: http.build()?,
            no_redirect: no_redirect.build()?,
            base_url,
            upload_url,
            rate_limits: Arc::new(Mutex::new(HashMap::new())),
        })
    }
}

fn enterprise_url(raw: &str, suffix: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    let mut path = url.path().to_string();
    if !path.ends_with('/') {
        path.push('/');
    }

    let host = url.host_str().unwrap_or_default();
    let is_api_host = host.starts_with("api.") || host.contains(".api.");
    if !path.ends_with(&format!("/{}", suffix)) && !is_api_host {
        path.push_str(suffix);
    }

    url.set_path(&path);
    Ok(url)
}

/// GitHub REST client. Cheap to clone; clones share the rate limit table.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    no_redirect: reqwest::Client,
    base_url: Url,
    upload_url: Url,
    rate_limits: Arc<Mutex<HashMap<RateLimitCategory, Rate>>>,
}

impl Client {
    /// Unauthenticated client against api.github.com.
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client from the GITHUB_TOKEN environment variable.
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env();
        if config.token.is_none() {
            return Err(Error::MissingToken);
        }
        ClientBuilder::from_config(config).build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn upload_url(&self) -> &Url {
        &self.upload_url
    }

    /// Snapshot of the last rate observed per category.
    pub fn rate_limits(&self) -> HashMap<RateLimitCategory, Rate> {
        self.rate_limits
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub(crate) fn store_rate(&self, category: RateLimitCategory, rate: Rate) {
        self.rate_limits
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(category, rate);
    }

    fn cached_rate(&self, category: RateLimitCategory) -> Option<Rate> {
        self.rate_limits
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&category)
            .cloned()
    }

    /// Build a request for `path`, resolved against the base URL.
    ///
    /// `path` is relative (`repos/o/r`), the base URL must end in a slash.
    /// `body` is JSON-encoded when present.
    pub fn new_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Request> {
        if !self.base_url.path().ends_with('/') {
            return Err(Error::Config(format!(
                "base URL must have a trailing slash, but {:?} does not",
                self.base_url.as_str()
            )));
        }

        let url = self.base_url.join(path)?;
        let mut builder = self.http.request(method, url);
        if let Some(body) = body {
            let json = serde_json::to_vec(body)?;
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(json);
        }

        Ok(builder.build()?)
    }

    /// Build an upload request for `path`, resolved against the upload URL.
    pub fn new_upload_request(
        &self,
        path: &str,
        content: Vec<u8>,
        media_type: &str,
    ) -> Result<Request> {
        if !self.upload_url.path().ends_with('/') {
            return Err(Error::Config(format!(
                "upload URL must have a trailing slash, but {:?} does not",
                self.upload_url.as_str()
            )));
        }

        let url = self.upload_url.join(path)?;
        let request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, media_type)
            .header(CONTENT_LENGTH, content.len())
            .body(content)
            .build()?;
        Ok(request)
    }

    /// Send `request` and decode the JSON reply into `T`.
    ///
    /// A `202 Accepted` reply is reported as [`Error::Accepted`].
    pub async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<(T, Response)> {
        let (response, body) = self.send(&self.http, request, None).await?;
        let value = serde_json::from_slice(&body)?;
        Ok((value, response))
    }

    /// Send `request` and discard the reply body. `202 Accepted` is success here.
    pub async fn execute_empty(&self, request: Request) -> Result<Response> {
        let (response, _) = self.send(&self.http, request, Some(StatusCode::ACCEPTED)).await?;
        Ok(response)
    }

    /// Like [`Client::execute_empty`], but a reply with status `allowed` is
    /// returned as is instead of being turned into an error.
    pub(crate) async fn execute_allowing(
        &self,
        request: Request,
        allowed: StatusCode,
    ) -> Result<Response> {
        let (response, _) = self.send(&self.http, request, Some(allowed)).await?;
        Ok(response)
    }

    /// Send `request` without following redirects and return the `Location`
    /// of the `302 Found` reply.
    pub async fn execute_redirect(&self, request: Request) -> Result<(Url, Response)> {
        let (response, _) = self.send(&self.no_redirect, request, None).await?;
        if response.status != StatusCode::FOUND.as_u16() {
            return Err(Error::Config(format!(
                "expected a redirect, got status {}",
                response.status
            )));
        }

        let location = response
            .headers
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| Error::Config("redirect without Location header".to_string()))?;
        let url = Url::parse(location)?;
        Ok((url, response))
    }

    async fn send(
        &self,
        http: &reqwest::Client,
        request: Request,
        allowed: Option<StatusCode>,
    ) -> Result<(Response, Vec<u8>)> {
        let method = request.method().to_string();
        let url = request.url().to_string();
        let api_path = self.api_path(request.url());
        let category = RateLimitCategory::for_request(request.method(), api_path);
        // Querying quotas is always allowed.
        let checked = api_path != "rate_limit";

        if let Some(rate) = self.cached_rate(category).filter(|_| checked) {
            if rate.is_exhausted(Utc::now()) {
                warn!(%method, %url, ?category, "rate limit exhausted, not sending request");
                let reset = rate
                    .reset
                    .map(|r| r.to_rfc3339())
                    .unwrap_or_else(|| "unknown".to_string());
                return Err(Error::RateLimited(RateLimitError {
                    response: ErrorResponse {
                        status: StatusCode::FORBIDDEN.as_u16(),
                        method,
                        url,
                        message: format!(
                            "API rate limit of {} still exceeded until {}, not making remote request.",
                            rate.limit, reset
                        ),
                        ..Default::default()
                    },
                    rate,
                }));
            }
        }

        debug!(%method, %url, "sending request");
        let reply = http.execute(request).await?;
        let status = reply.status();
        let response = Response::new(status.as_u16(), reply.headers().clone());
        if response.rate.is_known() {
            self.store_rate(category, response.rate.clone());
        }
        let body = reply.bytes().await?.to_vec();
        debug!(
            status = status.as_u16(),
            remaining = response.rate.remaining,
            "received response"
        );

        if allowed == Some(status) {
            return Ok((response, body));
        }
        if let Err(err) = check_response(&method, &url, &response, &body) {
            if matches!(err, Error::RateLimited(_) | Error::SecondaryRateLimited(_)) {
                warn!(%method, %url, "{}", err);
            }
            return Err(err);
        }

        Ok((response, body))
    }

    /// Path of `url` relative to the API root, for rate limit bucketing.
    fn api_path<'u>(&self, url: &'u Url) -> &'u str {
        let path = url.path();
        path.strip_prefix(self.base_url.path())
            .unwrap_or_else(|| path.trim_start_matches('/'))
    }
}

/// Classify a reply by status, turning GitHub error bodies into [`Error`]s.
pub(crate) fn check_response(
    method: &str,
    url: &str,
    response: &Response,
    body: &[u8],
) -> Result<()> {
    let status = response.status;
    if status == StatusCode::ACCEPTED.as_u16() {
        return Err(Error::Accepted(AcceptedError {
            raw: String::from_utf8_lossy(body).into_owned(),
        }));
    }
    if (200..300).contains(&status) || status == StatusCode::FOUND.as_u16() {
        return Ok(());
    }

    let mut error: ErrorResponse = serde_json::from_slice(body).unwrap_or_else(|_| ErrorResponse {
        message: String::from_utf8_lossy(body).trim().to_string(),
        ..Default::default()
    });
    error.status = status;
    error.method = method.to_string();
    error.url = url.to_string();

    let header = |name: &str| response.headers.get(name).and_then(|v| v.to_str().ok());

    if status == StatusCode::UNAUTHORIZED.as_u16()
        && header(HEADER_OTP).is_some_and(|v| v.starts_with("required"))
    {
        return Err(Error::TwoFactorRequired(error));
    }

    let limited = status == StatusCode::FORBIDDEN.as_u16()
        || status == StatusCode::TOO_MANY_REQUESTS.as_u16();
    if limited && header("x-ratelimit-remaining") == Some("0") {
        return Err(Error::RateLimited(RateLimitError {
            rate: response.rate.clone(),
            response: error,
        }));
    }

    let secondary = error
        .documentation_url
        .as_deref()
        .is_some_and(|d| d.contains("secondary-rate-limits") || d.ends_with("#abuse-rate-limits"))
        || error.message.to_lowercase().contains("secondary rate limit");
    if limited && secondary {
        let retry_after = header(HEADER_RETRY_AFTER)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .or_else(|| {
                response
                    .rate
                    .reset
                    .and_then(|reset| (reset - Utc::now()).to_std().ok())
            });
        return Err(Error::SecondaryRateLimited(AbuseRateLimitError {
            retry_after,
            response: error,
        }));
    }

    Err(Error::Api(error))
}
