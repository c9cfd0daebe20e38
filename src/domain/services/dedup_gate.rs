// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::content_store::{ContentStore, RepositoryError};
use chrono::NaiveDateTime;
use std::sync::Arc;

/// 去重闸门
///
/// 判断远端文章是否已经复制到本地：按标题与发布时间精确匹配，slug 不参与。
/// 不做本地缓存，内容存储是唯一的事实来源。
pub struct DedupGate<S: ContentStore> {
    store: Arc<S>,
}

impl<S: ContentStore> DedupGate<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// 是否已存在
    pub async fn exists(&self, title: &str, published_at: NaiveDateTime) -> Result<bool, RepositoryError> {
        self.store.post_exists(title, None, published_at).await
    }
}
