// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::*;
use chrono::TimeZone;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        initial_backoff: Duration::from_millis(10),
        enable_jitter: false,
        ..RetryPolicy::with_max_retries(max_retries)
    }
}

fn client_for(server: &MockServer, timeout: Duration, max_retries: u32, hooks: SyncHooks) -> WpcomClient {
    let config = WpcomClientConfig {
        api_base: format!("{}/rest/v1.1", server.uri()),
        timeout,
        max_retries,
        user_agent: user_agent("WPCOM-CrossPost", "https://local.example"),
        ..Default::default()
    };
    WpcomClient::new(config, hooks)
        .unwrap()
        .with_retry_policy(fast_retry(max_retries))
}

fn since() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 8, 12, 0, 0).unwrap()
}

#[tokio::test]
async fn test_fetch_sends_expected_query_and_user_agent() {
    let server = MockServer::start().await;
    let expected_agent = format!("WPCOM-CrossPost/{};https://local.example", env!("CARGO_PKG_VERSION"));

    Mock::given(method("GET"))
        .and(path("/rest/v1.1/sites/a.com/posts"))
        .and(query_param("after", "2024-01-08"))
        .and(query_param("order", "ASC"))
        .and(query_param("fields", "title,slug,URL,date,excerpt"))
        .and(query_param("status", "publish"))
        .and(header("user-agent", expected_agent.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "posts": [{
                "title": "Hello",
                "slug": "hello",
                "URL": "https://a.com/hello",
                "date": "2024-01-10T09:00:00+00:00",
                "excerpt": "Hi"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5), 0, SyncHooks::default());
    let posts = client.fetch("a.com", since(), &QueryParams::new()).await.unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Hello");
    assert_eq!(posts[0].url, "https://a.com/hello");
}

#[tokio::test]
async fn test_empty_posts_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "found": 0, "posts": [] })))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5), 0, SyncHooks::default());
    let posts = client.fetch("a.com", since(), &QueryParams::new()).await.unwrap();

    assert!(posts.is_empty());
}

#[tokio::test]
async fn test_http_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5), 2, SyncHooks::default());
    let result = client.fetch("a.com", since(), &QueryParams::new()).await;

    assert_eq!(result.unwrap_err(), FetchError::HttpStatus(500));
}

#[tokio::test]
async fn test_malformed_body_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5), 2, SyncHooks::default());
    let result = client.fetch("a.com", since(), &QueryParams::new()).await;

    assert!(matches!(result, Err(FetchError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_missing_posts_field_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "unknown_blog" })))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5), 0, SyncHooks::default());
    let result = client.fetch("a.com", since(), &QueryParams::new()).await;

    assert!(matches!(result, Err(FetchError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_timeout_is_retried_then_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "posts": [] }))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_millis(100), 1, SyncHooks::default());
    let result = client.fetch("a.com", since(), &QueryParams::new()).await;

    assert_eq!(result.unwrap_err(), FetchError::Timeout(Duration::from_millis(100)));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = WpcomClientConfig {
        api_base: format!("http://{}/rest/v1.1/", addr),
        ..Default::default()
    };
    let client = WpcomClient::new(config, SyncHooks::default())
        .unwrap()
        .with_retry_policy(fast_retry(1));

    let result = client.fetch("a.com", since(), &QueryParams::new()).await;

    let err = result.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_invalid_host_is_rejected_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5), 2, SyncHooks::default());

    for host in ["", "a.com/path", "http://a.com", ".a.com", "a b.com"] {
        let result = client.fetch(host, since(), &QueryParams::new()).await;
        assert_eq!(result.unwrap_err(), FetchError::InvalidHost(host.to_string()));
    }
}

#[test]
fn test_query_precedence() {
    let config = WpcomClientConfig {
        default_params: QueryParams::from([
            ("order".to_string(), "DESC".to_string()),
            ("number".to_string(), "5".to_string()),
            ("after".to_string(), "2000-01-01".to_string()),
        ]),
        ..Default::default()
    };
    let client = WpcomClient::new(config, SyncHooks::default()).unwrap();

    let overrides = QueryParams::from([("number".to_string(), "10".to_string())]);
    let params = client.build_query(since(), &overrides);

    assert_eq!(params["order"], "DESC");
    assert_eq!(params["number"], "10");
    assert_eq!(params["after"], "2024-01-08");
    assert_eq!(params["status"], "publish");
    assert_eq!(params["fields"], DEFAULT_FIELDS);
}

#[test]
fn test_api_call_params_hook_runs_last() {
    let hooks = SyncHooks::default().with_api_call_params(|mut params: QueryParams| {
        params.insert("status".to_string(), "any".to_string());
        params.remove("fields");
        params
    });
    let client = WpcomClient::new(WpcomClientConfig::default(), hooks).unwrap();

    let overrides = QueryParams::from([("status".to_string(), "draft".to_string())]);
    let params = client.build_query(since(), &overrides);

    assert_eq!(params["status"], "any");
    assert!(!params.contains_key("fields"));
}

#[test]
fn test_endpoint_joins_base_and_host() {
    let client = WpcomClient::new(WpcomClientConfig::default(), SyncHooks::default()).unwrap();
    let params = QueryParams::from([("order".to_string(), "ASC".to_string())]);

    let url = client.endpoint("awesome.wordpress.com", &params).unwrap();

    assert_eq!(
        url.as_str(),
        "https://public-api.wordpress.com/rest/v1.1/sites/awesome.wordpress.com/posts?order=ASC"
    );
}

#[test]
fn test_user_agent_format() {
    let agent = user_agent("WPCOM-CrossPost", "https://local.example");
    assert_eq!(
        agent,
        format!("WPCOM-CrossPost/{};https://local.example", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn test_truncate_for_log_respects_char_boundaries() {
    let body = "é".repeat(2000);
    let truncated = truncate_for_log(&body, MAX_LOGGED_BODY_BYTES);

    assert!(truncated.len() <= MAX_LOGGED_BODY_BYTES);
    assert!(body.starts_with(truncated));
}
