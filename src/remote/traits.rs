// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::remote_post::RemotePost;
use crate::domain::models::sync_result::SyncError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// 远端查询参数
pub type QueryParams = BTreeMap<String, String>;

/// 拉取错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// 站点域名不合法
    #[error("Invalid remote site host: '{0}'")]
    InvalidHost(String),
    /// 传输层失败
    #[error("Request failed: {0}")]
    Transport(String),
    /// 超时
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    /// 非 200 响应
    #[error("Unexpected HTTP status: {0}")]
    HttpStatus(u16),
    /// 响应格式错误
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    /// 判断错误是否可重试
    ///
    /// 只有传输层失败（含超时）可能是暂时性的。
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Transport(_) | FetchError::Timeout(_))
    }

    /// 指标标签
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::InvalidHost(_) => "invalid_host",
            FetchError::Transport(_) => "transport",
            FetchError::Timeout(_) => "timeout",
            FetchError::HttpStatus(_) => "http_status",
            FetchError::MalformedResponse(_) => "malformed_response",
        }
    }
}

impl From<FetchError> for SyncError {
    fn from(error: FetchError) -> Self {
        match error {
            FetchError::HttpStatus(status) => SyncError::FetchHttp { status },
            FetchError::MalformedResponse(message) => SyncError::FetchMalformedResponse { message },
            other => SyncError::FetchTransport {
                message: other.to_string(),
            },
        }
    }
}

/// 远端文章来源特质
#[async_trait]
pub trait RemotePostSource: Send + Sync {
    /// 拉取 `since` 之后发布的文章，按发布时间升序
    ///
    /// # 参数
    ///
    /// * `host` - 不含协议的站点域名
    /// * `since` - 回溯窗口起点
    /// * `overrides` - 调用方参数，键冲突时优先
    async fn fetch(
        &self,
        host: &str,
        since: DateTime<Utc>,
        overrides: &QueryParams,
    ) -> Result<Vec<RemotePost>, FetchError>;
}
