// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::cross_post_link::CrossPostLink;
use crate::domain::models::local_post::{LocalPostRequest, PostFormat};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::DbErr;
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 内容存储拒绝了写入
    #[error("Rejected by content store: {0}")]
    Rejected(String),
}

/// 内容存储特质
///
/// 同步核心只消费、不实现的外部协作方：文章存储、用户查询与分类。
/// 具体实现由基础设施层提供。
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// 检查是否存在标题与发布时间都相同的文章
    ///
    /// # 参数
    ///
    /// * `title` - 存储中的文章标题
    /// * `slug` - 为 `None` 时不参与匹配
    /// * `published_at` - 发布时间，精确匹配
    async fn post_exists(
        &self,
        title: &str,
        slug: Option<&str>,
        published_at: NaiveDateTime,
    ) -> Result<bool, RepositoryError>;

    /// 插入文章，返回新文章ID
    async fn insert_post(&self, request: &LocalPostRequest) -> Result<i64, RepositoryError>;

    /// 设置文章格式
    async fn set_post_format(&self, post_id: i64, format: PostFormat) -> Result<(), RepositoryError>;

    /// 写入文章元数据
    async fn set_post_meta(&self, post_id: i64, key: &str, value: &str) -> Result<(), RepositoryError>;

    /// 按邮箱查找用户ID
    async fn lookup_user_by_email(&self, email: &str) -> Result<Option<i64>, RepositoryError>;

    /// 最近创建的交叉发布链接，新的在前
    async fn list_cross_post_links(&self, limit: u64) -> Result<Vec<CrossPostLink>, RepositoryError>;
}
