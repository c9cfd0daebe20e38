// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{Extension, Router};
use crosspost::application::use_cases::sync_posts::{SyncOptions, SyncPostsUseCase};
use crosspost::config::settings::SchedulerSettings;
use crosspost::domain::models::sync_config::CrossPostOptions;
use crosspost::domain::repositories::config_source::StaticConfigSource;
use crosspost::domain::services::hooks::SyncHooks;
use crosspost::infrastructure::repositories::content_store_impl::ContentStoreImpl;
use crosspost::presentation::routes;
use crosspost::remote::wpcom_client::{user_agent, WpcomClient, WpcomClientConfig};
use crosspost::scheduler::binding::SchedulerBinding;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const REMOTE_HOST: &str = "remote.example";
pub const LOCAL_SITE: &str = "https://local.example";

pub type TestUseCase = SyncPostsUseCase<ContentStoreImpl, WpcomClient, StaticConfigSource>;

#[allow(dead_code)]
pub struct TestApp {
    pub server: MockServer,
    pub store: Arc<ContentStoreImpl>,
    pub use_case: Arc<TestUseCase>,
    pub binding: Arc<SchedulerBinding<TestUseCase>>,
    pub router: Router,
}

pub fn default_options() -> CrossPostOptions {
    CrossPostOptions {
        website: Some(format!("https://{}/", REMOTE_HOST)),
        category: Some(3),
        close_comments: Some("yes".to_string()),
    }
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with(default_options(), SyncOptions::default()).await
}

pub async fn create_test_app_with(options: CrossPostOptions, sync_options: SyncOptions) -> TestApp {
    let server = MockServer::start().await;

    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    let store = Arc::new(ContentStoreImpl::new(Arc::new(db)));

    let client = WpcomClient::new(
        WpcomClientConfig {
            api_base: format!("{}/rest/v1.1/", server.uri()),
            timeout: Duration::from_secs(5),
            max_retries: 0,
            user_agent: user_agent("WPCOM-CrossPost", LOCAL_SITE),
            log_responses: true,
            ..Default::default()
        },
        SyncHooks::default(),
    )
    .unwrap();

    let use_case = Arc::new(SyncPostsUseCase::new(
        store.clone(),
        Arc::new(client),
        Arc::new(StaticConfigSource::new(options)),
        SyncHooks::default(),
        sync_options,
    ));

    let binding = Arc::new(SchedulerBinding::from_settings(
        use_case.clone(),
        &SchedulerSettings {
            enabled: true,
            job_name: "crossposts_create_posts".to_string(),
            frequency: "hourly".to_string(),
            run_on_install: false,
        },
        SyncHooks::default(),
    ));

    let router = routes::routes::<ContentStoreImpl, WpcomClient, StaticConfigSource>()
        .layer(Extension(use_case.clone()))
        .layer(Extension(binding.clone()))
        .layer(Extension(store.clone()));

    TestApp {
        server,
        store,
        use_case,
        binding,
        router,
    }
}

/// 远端文章的 JSON 记录
pub fn remote_post(title: &str, date: &str) -> Value {
    let slug = title.to_lowercase().replace(' ', "-");
    json!({
        "title": title,
        "slug": slug,
        "URL": format!("https://{}/{}", REMOTE_HOST, slug),
        "date": date,
        "excerpt": format!("<p>{}</p>", title),
    })
}

/// 挂载远端文章列表响应
pub async fn mount_posts(server: &MockServer, posts: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(format!("/rest/v1.1/sites/{}/posts", REMOTE_HOST)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "found": posts.len(),
            "posts": posts,
        })))
        .mount(server)
        .await;
}
