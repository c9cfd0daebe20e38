// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::sync_request::SyncRequestDto;
use crate::application::use_cases::sync_posts::SyncPostsUseCase;
use crate::domain::models::sync_result::SyncResult;
use crate::domain::repositories::config_source::SyncConfigSource;
use crate::domain::repositories::content_store::ContentStore;
use crate::presentation::errors::AppError;
use crate::remote::traits::RemotePostSource;
use axum::{Extension, Json};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

/// 手动触发一次同步
///
/// # 参数
///
/// * `use_case` - 同步用例
/// * `payload` - 可选的回溯窗口
///
/// # 返回值
///
/// * `Ok(Json<SyncResult>)` - 本次运行的汇总结果
/// * `Err(AppError)` - 请求参数校验失败
pub async fn trigger_sync<S, R, C>(
    Extension(use_case): Extension<Arc<SyncPostsUseCase<S, R, C>>>,
    Json(payload): Json<SyncRequestDto>,
) -> Result<Json<SyncResult>, AppError>
where
    S: ContentStore + 'static,
    R: RemotePostSource + 'static,
    C: SyncConfigSource + 'static,
{
    payload.validate()?;

    info!("Manual sync requested (since: {:?})", payload.since);
    let result = use_case.run(payload.since()).await;
    Ok(Json(result))
}
