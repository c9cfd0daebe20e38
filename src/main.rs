// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::Extension;
use crosspost::application::use_cases::sync_posts::{SyncOptions, SyncPostsUseCase};
use crosspost::config::settings::{Settings, SettingsConfigSource, DEFAULT_CONFIG_DIR};
use crosspost::domain::repositories::content_store::ContentStore;
use crosspost::domain::services::hooks::SyncHooks;
use crosspost::infrastructure::database::connection;
use crosspost::infrastructure::metrics;
use crosspost::infrastructure::repositories::content_store_impl::ContentStoreImpl;
use crosspost::infrastructure::repositories::memory_content_store::MemoryContentStore;
use crosspost::presentation::routes;
use crosspost::remote::wpcom_client::{WpcomClient, WpcomClientConfig};
use crosspost::scheduler::binding::SchedulerBinding;
use crosspost::utils::telemetry;
use crosspost::utils::time_expr::Since;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// 运行模式
enum Command {
    /// 启动HTTP服务和定时同步
    Serve,
    /// 执行一次同步后退出
    Once(Option<Since>),
}

impl Command {
    fn from_args(mut args: impl Iterator<Item = String>) -> Self {
        match args.next().as_deref() {
            Some("once") => Command::Once(args.next().map(|since| Since::from(since.as_str()))),
            Some(other) => {
                warn!("Unknown command '{}', starting the server", other);
                Command::Serve
            }
            None => Command::Serve,
        }
    }
}

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let settings = Settings::new()?;

    // 2. Initialize logging and metrics
    telemetry::init_telemetry(settings.logging.json);
    info!("Starting crosspost for {}", settings.site.url);
    metrics::init_metrics(&settings.metrics);

    let command = Command::from_args(std::env::args().skip(1));

    // 3. Pick the content store
    if connection::is_memory_url(&settings.database.url) {
        warn!("Using the in-memory content store, posts will not survive a restart");
        run(settings, Arc::new(MemoryContentStore::new()), command).await
    } else {
        let db = connection::connect_and_migrate(&settings.database).await?;
        info!("Database connection established and migrations applied");
        run(settings, Arc::new(ContentStoreImpl::new(Arc::new(db))), command).await
    }
}

async fn run<S>(settings: Settings, store: Arc<S>, command: Command) -> anyhow::Result<()>
where
    S: ContentStore + 'static,
{
    let hooks = SyncHooks::default();

    // 4. Initialize components
    let client = Arc::new(WpcomClient::new(
        WpcomClientConfig::from_settings(&settings.remote, &settings.site.url),
        hooks.clone(),
    )?);
    let config_source = Arc::new(SettingsConfigSource::new(DEFAULT_CONFIG_DIR));
    let use_case = Arc::new(SyncPostsUseCase::new(
        store.clone(),
        client,
        config_source,
        hooks.clone(),
        SyncOptions::from_settings(&settings),
    ));

    if let Command::Once(since) = command {
        let result = use_case.run(since).await;
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    // 5. Start the scheduler
    let binding = Arc::new(SchedulerBinding::from_settings(
        use_case.clone(),
        &settings.scheduler,
        hooks,
    ));
    if let Some(interval) = binding.activate()? {
        info!("Sync job {} scheduled every {:?}", binding.job_name(), interval);
    }

    // 6. Start HTTP server
    let app = routes::routes::<S, WpcomClient, SettingsConfigSource>()
        .layer(Extension(use_case))
        .layer(Extension(binding.clone()))
        .layer(Extension(store))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    binding.uninstall();
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
