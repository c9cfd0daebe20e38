// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::time_expr::{parse_time_expression, Since};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 手动同步请求
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct SyncRequestDto {
    /// 回溯窗口起点，如 `"-3 days"`、`"2024-01-01"`
    #[validate(length(min = 1, max = 64), custom(function = "validate_since"))]
    pub since: Option<String>,
}

impl SyncRequestDto {
    pub fn since(&self) -> Option<Since> {
        self.since.as_deref().map(Since::from)
    }
}

fn validate_since(since: &str) -> Result<(), ValidationError> {
    parse_time_expression(since, Utc::now())
        .map(|_| ())
        .map_err(|_| ValidationError::new("unrecognized_time_expression"))
}

/// 交叉发布链接查询参数
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct CrossPostQueryDto {
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<u64>,
}

impl CrossPostQueryDto {
    pub const DEFAULT_LIMIT: u64 = 20;

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}
