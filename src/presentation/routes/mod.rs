// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::sync_posts::SyncPostsUseCase;
use crate::domain::repositories::config_source::SyncConfigSource;
use crate::domain::repositories::content_store::ContentStore;
use crate::presentation::handlers::{crosspost_handler, schedule_handler, sync_handler};
use crate::remote::traits::RemotePostSource;
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

/// 创建应用路由
///
/// 处理器依赖通过 `Extension` 层注入：
/// `Arc<SyncPostsUseCase<S, R, C>>`、`Arc<SchedulerBinding<SyncPostsUseCase<S, R, C>>>` 和 `Arc<S>`。
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes<S, R, C>() -> Router
where
    S: ContentStore + 'static,
    R: RemotePostSource + 'static,
    C: SyncConfigSource + 'static,
{
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let sync_routes = Router::new()
        .route("/v1/sync", post(sync_handler::trigger_sync::<S, R, C>))
        .route(
            "/v1/schedule",
            get(schedule_handler::get_schedule::<SyncPostsUseCase<S, R, C>>)
                .post(schedule_handler::install_schedule::<SyncPostsUseCase<S, R, C>>)
                .delete(schedule_handler::uninstall_schedule::<SyncPostsUseCase<S, R, C>>),
        )
        .route("/v1/crossposts", get(crosspost_handler::list_crossposts::<S>));

    Router::new().merge(public_routes).merge(sync_routes)
}

/// 健康检查端点
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回包名与版本号
pub async fn version() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
