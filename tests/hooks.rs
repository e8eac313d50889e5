mod common;

use ghrest::{Error, Event, ListCursorOptions};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_get_delivery_and_parse_payload() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/hooks/1/deliveries/12345"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12345,
            "guid": "0b989ba4-242f-11e5-81e1-c7b6966d2516",
            "delivered_at": "2019-06-03T00:57:16Z",
            "redelivery": false,
            "duration": 0.27,
            "status": "OK",
            "status_code": 200,
            "event": "push",
            "action": null,
            "request": {
                "headers": {"X-GitHub-Event": "push"},
                "payload": {
                    "ref": "refs/heads/main",
                    "before": "6113728f27ae82c7b1a177c8d03f9e96e0adf246",
                    "after": "0000000000000000000000000000000000000000",
                    "deleted": true
                }
            },
            "response": {"headers": {}, "payload": "ok"}
        })))
        .mount(&server)
        .await;

    let (delivery, _) = client
        .repositories()
        .get_hook_delivery("o", "r", 1, 12345)
        .await
        .unwrap();
    assert_eq!(delivery.status_code, Some(200));

    match delivery.parse_request_payload().unwrap() {
        Event::Push(push) => {
            assert_eq!(push.git_ref.as_deref(), Some("refs/heads/main"));
            assert_eq!(push.deleted, Some(true));
        }
        other => panic!("expected push event, got {other:?}"),
    }
}

#[tokio::test]
async fn test_parse_payload_unknown_event() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/orgs/o/hooks/1/deliveries/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2,
            "event": "sponsorship_tier_changed_v9",
            "request": {"headers": {}, "payload": {}}
        })))
        .mount(&server)
        .await;

    let (delivery, _) = client
        .organizations()
        .get_hook_delivery("o", 1, 2)
        .await
        .unwrap();
    match delivery.parse_request_payload().unwrap_err() {
        Error::UnknownEvent(name) => assert_eq!(name, "sponsorship_tier_changed_v9"),
        other => panic!("expected UnknownEvent, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_deliveries_with_cursor() {
    let (server, client) = common::setup().await;
    let next = format!(
        "<{}/orgs/o/hooks/1/deliveries?cursor=v1_12077215967>; rel=\"next\"",
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/orgs/o/hooks/1/deliveries"))
        .and(query_param("per_page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", next.as_str())
                .set_body_json(json!([{"id": 1, "event": "ping"}])),
        )
        .mount(&server)
        .await;

    let opts = ListCursorOptions {
        per_page: Some(1),
        ..Default::default()
    };
    let (deliveries, resp) = client
        .organizations()
        .list_hook_deliveries("o", 1, Some(&opts))
        .await
        .unwrap();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(resp.cursor.as_deref(), Some("v1_12077215967"));
    assert_eq!(resp.next_page, None);
}

#[tokio::test]
async fn test_redeliver_accepted_is_success() {
    let (server, client) = common::setup().await;

    Mock::given(method("POST"))
        .and(path("/repos/o/r/hooks/1/deliveries/9/attempts"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client
        .repositories()
        .redeliver_hook_delivery("o", "r", 1, 9)
        .await
        .unwrap();
    assert_eq!(resp.status, 202);
}

#[tokio::test]
async fn test_ping_hook() {
    let (server, client) = common::setup().await;

    Mock::given(method("POST"))
        .and(path("/orgs/o/hooks/3/pings"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.organizations().ping_hook("o", 3).await.unwrap();
}
