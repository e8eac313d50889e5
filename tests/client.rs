mod common;

use std::time::Duration;

use chrono::Utc;
use ghrest::{Error, RateLimitCategory};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_default_headers_sent() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("accept", "application/vnd.github+json"))
        .and(header("x-github-api-version", "2022-11-28"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "octocat", "id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let (user, resp) = client.users().get("octocat").await.unwrap();
    assert_eq!(user.login.as_deref(), Some("octocat"));
    assert_eq!(resp.status, 200);
}

#[tokio::test]
async fn test_pagination_from_link_header() {
    let (server, client) = common::setup().await;
    let base = server.uri();
    let link = format!(
        "<{base}/organizations?since=2&per_page=2>; rel=\"next\", <{base}/organizations?page=1>; rel=\"first\""
    );

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .and(query_param("per_page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", link.as_str())
                .set_body_json(json!([{"login": "a", "id": 1}, {"login": "b", "id": 2}])),
        )
        .mount(&server)
        .await;

    let opts = ghrest::services::organizations::OrganizationsListOptions {
        per_page: Some(2),
        ..Default::default()
    };
    let (orgs, resp) = client.organizations().list_all(Some(&opts)).await.unwrap();
    assert_eq!(orgs.len(), 2);
    assert_eq!(resp.next_page, Some(2));
    assert_eq!(resp.first_page, Some(1));
    assert_eq!(resp.last_page, None);
}

#[tokio::test]
async fn test_exhausted_rate_short_circuits() {
    let (server, client) = common::setup().await;
    let reset = (Utc::now().timestamp() + 3600).to_string();

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ratelimit-limit", "60")
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-used", "60")
                .insert_header("x-ratelimit-reset", reset.as_str())
                .insert_header("x-ratelimit-resource", "core")
                .set_body_json(json!({"login": "octocat"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (_, resp) = client.users().get("octocat").await.unwrap();
    assert_eq!(resp.rate.remaining, 0);
    assert_eq!(client.rate_limits()[&RateLimitCategory::Core].limit, 60);

    let err = client.users().get("octocat").await.unwrap_err();
    match err {
        Error::RateLimited(e) => {
            assert_eq!(e.rate.limit, 60);
            assert!(e.response.message.contains("still exceeded"));
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_endpoint_skips_cached_check() {
    let (server, client) = common::setup().await;
    let reset = (Utc::now().timestamp() + 3600).to_string();

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ratelimit-limit", "60")
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", reset.as_str())
                .set_body_json(json!({"login": "octocat"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rate_limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": {}})))
        .expect(1)
        .mount(&server)
        .await;

    client.users().get("octocat").await.unwrap();
    assert!(client.rate_limit().get().await.is_ok());
}

#[tokio::test]
async fn test_rate_limit_service_refreshes_cache() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/rate_limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": {
                "core": {"limit": 5000, "remaining": 4999, "used": 1, "reset": 1372700873},
                "search": {"limit": 30, "remaining": 18, "used": 12, "reset": 1372697452},
                "code_search": {"limit": 10, "remaining": 10, "used": 0, "reset": 1372697452}
            }
        })))
        .mount(&server)
        .await;

    let (limits, _) = client.rate_limit().get().await.unwrap();
    assert_eq!(limits.core.as_ref().map(|r| r.remaining), Some(4999));
    assert_eq!(limits.search.as_ref().map(|r| r.used), Some(12));
    assert!(limits.graphql.is_none());

    let cached = client.rate_limits();
    assert_eq!(cached[&RateLimitCategory::Search].limit, 30);
    assert_eq!(cached[&RateLimitCategory::CodeSearch].limit, 10);
}

#[tokio::test]
async fn test_not_found_is_api_error() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest/repos/repos#get-a-repository"
        })))
        .mount(&server)
        .await;

    let err = client.repositories().get("o", "missing").await.unwrap_err();
    assert!(err.is_not_found());
    match err {
        Error::Api(e) => {
            assert_eq!(e.message, "Not Found");
            assert_eq!(e.method, "GET");
            assert!(e.url.ends_with("/repos/o/missing"));
        }
        other => panic!("expected Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_validation_errors_decoded() {
    let (server, client) = common::setup().await;

    Mock::given(method("POST"))
        .and(path("/repos/o/r/labels"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed",
            "errors": [{"resource": "Label", "code": "already_exists", "field": "name"}]
        })))
        .mount(&server)
        .await;

    let label = ghrest::services::issues::Label {
        name: Some("bug".to_string()),
        ..Default::default()
    };
    let err = client.issues().create_label("o", "r", &label).await.unwrap_err();
    match err {
        Error::Api(e) => {
            assert_eq!(e.status, 422);
            assert_eq!(e.errors.len(), 1);
            assert_eq!(e.errors[0].code.as_deref(), Some("already_exists"));
        }
        other => panic!("expected Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_secondary_rate_limit_retry_after() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("retry-after", "120")
                .set_body_json(json!({
                    "message": "You have exceeded a secondary rate limit.",
                    "documentation_url": "https://docs.github.com/rest/overview/rate-limits-for-the-rest-api#about-secondary-rate-limits"
                })),
        )
        .mount(&server)
        .await;

    let err = client.users().get("octocat").await.unwrap_err();
    match err {
        Error::SecondaryRateLimited(e) => {
            assert_eq!(e.retry_after, Some(Duration::from_secs(120)));
            assert_eq!(e.response.status, 403);
        }
        other => panic!("expected SecondaryRateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn test_primary_rate_limit_error() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-limit", "60")
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "1372700873")
                .set_body_json(json!({"message": "API rate limit exceeded for xxx.xxx.xxx.xxx."})),
        )
        .mount(&server)
        .await;

    match client.users().get("octocat").await.unwrap_err() {
        Error::RateLimited(e) => {
            assert_eq!(e.rate.limit, 60);
            assert_eq!(e.rate.remaining, 0);
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn test_two_factor_required() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(
            ResponseTemplate::new(401)
                .insert_header("x-github-otp", "required; sms")
                .set_body_json(json!({"message": "Must specify two-factor authentication OTP code."})),
        )
        .mount(&server)
        .await;

    let err = client.users().get("").await.unwrap_err();
    assert!(matches!(err, Error::TwoFactorRequired(_)));
}

#[tokio::test]
async fn test_accepted_reported_for_decoding_calls() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/contributors"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = client
        .repositories()
        .list_contributors("o", "r", None)
        .await
        .unwrap_err();
    match err {
        Error::Accepted(e) => assert_eq!(e.raw, "{}"),
        other => panic!("expected Accepted, got {other:?}"),
    }
}

#[tokio::test]
async fn test_base_url_without_trailing_slash_rejected() {
    let client = ghrest::Client::builder()
        .base_url("https://example.com/api/v3")
        .build()
        .unwrap();
    let err = client.users().get("octocat").await.unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[tokio::test]
async fn test_is_member_maps_not_found() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/orgs/o/members/yes"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orgs/o/members/no"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("x-ratelimit-limit", "60")
                .insert_header("x-ratelimit-remaining", "59")
                .insert_header("x-github-request-id", "ABCD:1234")
                .set_body_json(json!({"message": "Not Found"})),
        )
        .mount(&server)
        .await;

    assert!(client.organizations().is_member("o", "yes").await.unwrap().0);

    let (member, resp) = client.organizations().is_member("o", "no").await.unwrap();
    assert!(!member);
    assert_eq!(resp.status, 404);
    assert_eq!(resp.rate.limit, 60);
    assert_eq!(resp.rate.remaining, 59);
    assert_eq!(resp.headers["x-github-request-id"], "ABCD:1234");
}
