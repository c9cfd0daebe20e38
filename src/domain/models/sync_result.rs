// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// 同步错误
///
/// 流水线中的所有失败都不会中断调度器或宿主进程，
/// 最终只会表现为"本次创建的文章更少"。
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyncError {
    /// 配置缺失，已使用默认值
    #[error("Missing configuration option: {option}")]
    ConfigMissing { option: String },
    /// 传输层失败（连接、超时、无效站点）
    #[error("Fetch transport error: {message}")]
    FetchTransport { message: String },
    /// 远端返回非 200 状态码
    #[error("Fetch HTTP error: status {status}")]
    FetchHttp { status: u16 },
    /// 响应体无法解析
    #[error("Malformed fetch response: {message}")]
    FetchMalformedResponse { message: String },
    /// 去重检查失败，记录被跳过
    #[error("Dedup check failed for '{title}': {message}")]
    DedupCheck { title: String, message: String },
    /// 插入失败
    #[error("Insert failed for '{title}': {message}")]
    Insert { title: String, message: String },
    /// 设置文章格式失败
    #[error("Setting post format failed for post {post_id}: {message}")]
    PostFormat { post_id: i64, message: String },
    /// 写入交叉发布链接失败
    #[error("Recording cross-post link failed for post {post_id}: {message}")]
    CrossPostLink { post_id: i64, message: String },
    /// 作者解析失败，回退为无作者
    #[error("Author resolution failed for {email}: {message}")]
    AuthorResolution { email: String, message: String },
}

impl SyncError {
    /// 是否属于拉取失败
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            SyncError::FetchTransport { .. }
                | SyncError::FetchHttp { .. }
                | SyncError::FetchMalformedResponse { .. }
        )
    }
}

/// 一次同步运行的汇总结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    pub run_id: Uuid,
    pub posts_created: usize,
    pub posts_skipped: usize,
    pub errors: Vec<SyncError>,
}

impl SyncResult {
    pub fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            posts_created: 0,
            posts_skipped: 0,
            errors: Vec::new(),
        }
    }

    pub fn record(&mut self, error: SyncError) {
        self.errors.push(error);
    }
}
