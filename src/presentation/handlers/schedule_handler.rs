// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::presentation::errors::AppError;
use crate::scheduler::binding::{ScheduleState, ScheduledJob, SchedulerBinding};
use axum::{Extension, Json};
use std::sync::Arc;

/// 查询调度状态
pub async fn get_schedule<J: ScheduledJob + 'static>(
    Extension(binding): Extension<Arc<SchedulerBinding<J>>>,
) -> Json<ScheduleState> {
    Json(binding.state())
}

/// 安装定时同步
pub async fn install_schedule<J: ScheduledJob + 'static>(
    Extension(binding): Extension<Arc<SchedulerBinding<J>>>,
) -> Result<Json<ScheduleState>, AppError> {
    binding.install()?;
    Ok(Json(binding.state()))
}

/// 卸载定时同步
pub async fn uninstall_schedule<J: ScheduledJob + 'static>(
    Extension(binding): Extension<Arc<SchedulerBinding<J>>>,
) -> Json<ScheduleState> {
    binding.uninstall();
    Json(binding.state())
}
