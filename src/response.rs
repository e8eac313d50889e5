// Response metadata.
// Extracts pagination links, rate limit and token expiry from GitHub reply headers.

use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use url::Url;

const HEADER_RATE_LIMIT: &str = "x-ratelimit-limit";
const HEADER_RATE_REMAINING: &str = "x-ratelimit-remaining";
const HEADER_RATE_USED: &str = "x-ratelimit-used";
const HEADER_RATE_RESET: &str = "x-ratelimit-reset";
const HEADER_RATE_RESOURCE: &str = "x-ratelimit-resource";
const HEADER_TOKEN_EXPIRATION: &str = "github-authentication-token-expiration";

/// Rate limit information from response headers or the rate_limit endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    pub limit: u64,
    pub remaining: u64,
    #[serde(default)]
    pub used: u64,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub reset: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resource: Option<String>,
}

impl Rate {
    /// Parse the `X-RateLimit-*` headers. Missing headers leave defaults.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut rate = Rate::default();

        if let Some(limit) = header_u64(headers, HEADER_RATE_LIMIT) {
            rate.limit = limit;
        }
        if let Some(remaining) = header_u64(headers, HEADER_RATE_REMAINING) {
            rate.remaining = remaining;
        }
        if let Some(used) = header_u64(headers, HEADER_RATE_USED) {
            rate.used = used;
        }
        if let Some(reset) = header_u64(headers, HEADER_RATE_RESET) {
            rate.reset = DateTime::from_timestamp(reset as i64, 0);
        }
        rate.resource = header_str(headers, HEADER_RATE_RESOURCE).map(str::to_string);

        rate
    }

    /// Whether the headers carried any rate limit information at all.
    pub fn is_known(&self) -> bool {
        self.limit > 0 || self.reset.is_some()
    }

    /// True when no requests remain and the window has not reset yet.
    pub fn is_exhausted(&self, now: DateTime<Utc>) -> bool {
        self.remaining == 0 && self.reset.is_some_and(|reset| reset > now)
    }
}

/// Reply metadata returned alongside every decoded value.
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub status: u16,
    pub headers: HeaderMap,

    pub next_page: Option<u32>,
    pub prev_page: Option<u32>,
    pub first_page: Option<u32>,
    pub last_page: Option<u32>,

    /// Raw `page` value of the next link, for endpoints paging by opaque token.
    pub next_page_token: Option<String>,
    /// Cursor for endpoints that page with a `cursor` parameter.
    pub cursor: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,

    pub rate: Rate,
    pub token_expiration: Option<DateTime<Utc>>,
}

impl Response {
    pub fn new(status: u16, headers: HeaderMap) -> Self {
        let mut response = Response {
            status,
            rate: Rate::from_headers(&headers),
            token_expiration: header_str(&headers, HEADER_TOKEN_EXPIRATION)
                .and_then(parse_token_expiration),
            ..Default::default()
        };

        if let Some(links) = header_str(&headers, reqwest::header::LINK.as_str()) {
            response.populate_pages(links);
        }

        response.headers = headers;
        response
    }

    fn populate_pages(&mut self, links: &str) {
        for link in links.split(',') {
            let segments: Vec<&str> = link.trim().split(';').collect();
            if segments.len() < 2 {
                continue;
            }

            let target = segments[0].trim();
            let Some(target) = target.strip_prefix('<').and_then(|t| t.strip_suffix('>')) else {
                continue;
            };
            let Ok(url) = Url::parse(target) else {
                continue;
            };

            let query = |name: &str| {
                url.query_pairs()
                    .find(|(k, _)| k == name)
                    .map(|(_, v)| v.into_owned())
                    .filter(|v| !v.is_empty())
            };
            let rels: Vec<&str> = segments[1..].iter().map(|s| s.trim()).collect();

            if let Some(cursor) = query("cursor") {
                if rels.contains(&r#"rel="next""#) {
                    self.cursor = Some(cursor);
                }
                continue;
            }

            let since = query("since");
            let before = query("before");
            let after = query("after");
            let page = query("page").or_else(|| since.clone());
            if page.is_none() && before.is_none() && after.is_none() {
                continue;
            }
            let number = page.as_deref().and_then(|p| p.parse::<u32>().ok());

            for rel in rels {
                match rel {
                    r#"rel="next""# => {
                        self.next_page = number;
                        self.next_page_token = page.clone();
                        if after.is_some() {
                            self.after = after.clone();
                        }
                    }
                    r#"rel="prev""# => {
                        self.prev_page = number;
                        if before.is_some() {
                            self.before = before.clone();
                        }
                    }
                    r#"rel="first""# => self.first_page = number,
                    r#"rel="last""# => self.last_page = number,
                    _ => {}
                }
            }
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    header_str(headers, name).and_then(|v| v.trim().parse().ok())
}

/// Parse GitHub's token expiration header, e.g. `2023-04-26 20:23:26 UTC`.
fn parse_token_expiration(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt.with_timezone(&Utc));
    }
    value
        .strip_suffix(" UTC")
        .and_then(|v| NaiveDateTime::parse_from_str(v, "%Y-%m-%d %H:%M:%S").ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_populate_pages() {
        let links = concat!(
            r#"<https://api.github.com/?page=1>; rel="first","#,
            r#" <https://api.github.com/?page=2>; rel="prev","#,
            r#" <https://api.github.com/?page=4>; rel="next","#,
            r#" <https://api.github.com/?page=5>; rel="last""#
        );
        let response = Response::new(200, headers(&[("link", links)]));

        assert_eq!(response.first_page, Some(1));
        assert_eq!(response.prev_page, Some(2));
        assert_eq!(response.next_page, Some(4));
        assert_eq!(response.last_page, Some(5));
        assert_eq!(response.next_page_token.as_deref(), Some("4"));
    }

    #[test]
    fn test_populate_pages_since_and_cursors() {
        let links = concat!(
            r#"<https://api.github.com/users?since=135>; rel="next","#,
            r#" <https://api.github.com/x?after=a1b2&per_page=1>; rel="next","#,
            r#" <https://api.github.com/x?before=z9&per_page=1>; rel="prev""#
        );
        let response = Response::new(200, headers(&[("link", links)]));

        // The later next link carries no page number.
        assert_eq!(response.next_page, None);
        assert_eq!(response.after.as_deref(), Some("a1b2"));
        assert_eq!(response.before.as_deref(), Some("z9"));

        let response = Response::new(
            200,
            headers(&[("link", r#"<https://api.github.com/users?since=135>; rel="next""#)]),
        );
        assert_eq!(response.next_page, Some(135));
    }

    #[test]
    fn test_populate_pages_cursor() {
        let links = concat!(
            r#"<https://api.github.com/?cursor=v1_12345678>; rel="next","#,
            r#" <https://api.github.com/?cursor=v1_0>; rel="prev""#
        );
        let response = Response::new(200, headers(&[("link", links)]));
        assert_eq!(response.cursor.as_deref(), Some("v1_12345678"));
        assert_eq!(response.next_page, None);
    }

    #[test]
    fn test_populate_pages_ignores_malformed() {
        for links in [
            r#"https://api.github.com/?page=2; rel="next""#,
            r#"<https://api.github.com/?page=2>"#,
            r#"<:bad url>; rel="next""#,
            r#"<https://api.github.com/?foo=2>; rel="next""#,
        ] {
            let response = Response::new(200, headers(&[("link", links)]));
            assert_eq!(response.next_page, None, "link {links}");
        }
    }

    #[test]
    fn test_rate_from_headers() {
        let rate = Rate::from_headers(&headers(&[
            ("x-ratelimit-limit", "60"),
            ("x-ratelimit-remaining", "59"),
            ("x-ratelimit-used", "1"),
            ("x-ratelimit-reset", "1372700873"),
            ("x-ratelimit-resource", "core"),
        ]));

        assert_eq!(rate.limit, 60);
        assert_eq!(rate.remaining, 59);
        assert_eq!(rate.used, 1);
        assert_eq!(rate.reset.unwrap().timestamp(), 1372700873);
        assert_eq!(rate.resource.as_deref(), Some("core"));
        assert!(rate.is_known());
    }

    #[test]
    fn test_rate_exhausted() {
        let now = Utc::now();
        let rate = Rate {
            remaining: 0,
            reset: Some(now + chrono::Duration::minutes(1)),
            ..Default::default()
        };
        assert!(rate.is_exhausted(now));

        let reset_passed = Rate {
            remaining: 0,
            reset: Some(now - chrono::Duration::minutes(1)),
            ..Default::default()
        };
        assert!(!reset_passed.is_exhausted(now));
        assert!(!Rate::default().is_known());
    }

    #[test]
    fn test_token_expiration() {
        let response = Response::new(
            200,
            headers(&[(HEADER_TOKEN_EXPIRATION, "2021-11-30 23:59:59 UTC")]),
        );
        let expires = response.token_expiration.unwrap();
        assert_eq!(expires.to_rfc3339(), "2021-11-30T23:59:59+00:00");

        let offset = parse_token_expiration("2021-11-30 23:59:59 +0100").unwrap();
        assert_eq!(offset.to_rfc3339(), "2021-11-30T22:59:59+00:00");
        assert!(parse_token_expiration("tomorrow").is_none());
    }
}
