// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{
    create_test_app, create_test_app_with, default_options, mount_posts, remote_post, REMOTE_HOST,
};
use crosspost::application::use_cases::sync_posts::{BatchPolicy, SyncOptions};
use crosspost::domain::models::cross_post_link::ORIGINAL_URL_META_KEY;
use crosspost::domain::models::sync_config::CrossPostOptions;
use crosspost::domain::models::sync_result::SyncError;
use crosspost::domain::repositories::content_store::ContentStore;
use crosspost::utils::time_expr::Since;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_first_run_creates_link_posts_with_original_url() {
    let app = create_test_app().await;
    mount_posts(
        &app.server,
        vec![
            remote_post("Hello", "2024-01-10T09:30:00+02:00"),
            remote_post("Second Post", "2024-01-11T10:00:00+00:00"),
        ],
    )
    .await;

    let result = app.use_case.run(None).await;

    assert_eq!(result.posts_created, 2);
    assert_eq!(result.posts_skipped, 0);
    assert!(result.errors.is_empty(), "unexpected errors: {:?}", result.errors);

    let links = app.store.list_cross_post_links(10).await.unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0].original_url, format!("https://{}/second-post", REMOTE_HOST));

    let hello_id = links[1].local_post_id;
    let hello = app.store.find_post(hello_id).await.unwrap().unwrap();
    assert_eq!(hello.title, "Hello");
    assert_eq!(hello.format, "link");
    assert_eq!(hello.status, "publish");
    assert_eq!(hello.comment_status, "closed");
    assert_eq!(hello.author_id, 0);
    assert_eq!(hello.published_at.to_string(), "2024-01-10 09:30:00");
    assert!(hello.content.starts_with("<p>Hello</p>"));
    assert!(hello.content.contains("Read more on"));
    assert_eq!(app.store.post_categories(hello_id).await.unwrap(), vec![3]);
    assert_eq!(
        app.store.post_meta(hello_id, ORIGINAL_URL_META_KEY).await.unwrap().as_deref(),
        Some(format!("https://{}/hello", REMOTE_HOST).as_str())
    );
}

#[tokio::test]
async fn test_second_run_skips_existing_posts() {
    let app = create_test_app().await;
    mount_posts(
        &app.server,
        vec![
            remote_post("Hello", "2024-01-10T09:30:00+00:00"),
            remote_post("World", "2024-01-11T09:30:00+00:00"),
        ],
    )
    .await;

    let first = app.use_case.run(None).await;
    let second = app.use_case.run(None).await;

    assert_eq!(first.posts_created, 2);
    assert_eq!(second.posts_created, 0);
    assert_eq!(second.posts_skipped, 2);
    assert_eq!(app.store.list_cross_post_links(10).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_since_is_sent_as_after_date() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .and(query_param("after", "2024-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "posts": [] })))
        .expect(1)
        .mount(&app.server)
        .await;

    let result = app.use_case.run(Some(Since::from("2024-01-01"))).await;

    assert_eq!(result.posts_created, 0);
    assert!(result.errors.is_empty());
}

#[tokio::test]
async fn test_remote_failure_is_recorded() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.server)
        .await;

    let result = app.use_case.run(None).await;

    assert_eq!(result.posts_created, 0);
    assert_eq!(result.errors, vec![SyncError::FetchHttp { status: 503 }]);
}

#[tokio::test]
async fn test_missing_website_makes_no_request() {
    let app = create_test_app_with(
        CrossPostOptions {
            website: None,
            ..default_options()
        },
        SyncOptions::default(),
    )
    .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.server)
        .await;

    let result = app.use_case.run(None).await;

    assert_eq!(result.posts_created, 0);
    assert_eq!(
        result.errors,
        vec![SyncError::ConfigMissing {
            option: "website".to_string()
        }]
    );
}

#[tokio::test]
async fn test_stop_after_first_creates_one_post_per_run() {
    let app = create_test_app_with(
        default_options(),
        SyncOptions {
            batch_policy: BatchPolicy::StopAfterFirst,
            ..SyncOptions::default()
        },
    )
    .await;
    mount_posts(
        &app.server,
        vec![
            remote_post("One", "2024-01-10T09:30:00+00:00"),
            remote_post("Two", "2024-01-11T09:30:00+00:00"),
        ],
    )
    .await;

    let first = app.use_case.run(None).await;
    let second = app.use_case.run(None).await;

    assert_eq!(first.posts_created, 1);
    assert_eq!(second.posts_created, 1);
    assert_eq!(second.posts_skipped, 1);
}

#[tokio::test]
async fn test_admin_email_sets_post_author() {
    let app = create_test_app_with(
        default_options(),
        SyncOptions {
            admin_email: "Admin@Local.Example".to_string(),
            ..SyncOptions::default()
        },
    )
    .await;
    let admin_id = app.store.create_user("admin@local.example", "Admin").await.unwrap();
    mount_posts(&app.server, vec![remote_post("Hello", "2024-01-10T09:30:00+00:00")]).await;

    let result = app.use_case.run(None).await;

    let links = app.store.list_cross_post_links(1).await.unwrap();
    let post = app.store.find_post(links[0].local_post_id).await.unwrap().unwrap();
    assert_eq!(result.posts_created, 1);
    assert_eq!(post.author_id, admin_id);
}
