// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::sync_result::SyncError;
use crate::domain::repositories::content_store::ContentStore;
use crate::domain::services::hooks::SyncHooks;
use std::sync::Arc;
use tracing::{debug, warn};

/// 作者解析器
///
/// 按邮箱查找本地用户作为交叉发布文章的作者。默认邮箱为站点管理员邮箱，
/// 可通过 `author_email` 钩子替换。
pub struct AuthorResolver<S: ContentStore> {
    store: Arc<S>,
    hooks: SyncHooks,
    admin_email: String,
}

impl<S: ContentStore> AuthorResolver<S> {
    pub fn new(store: Arc<S>, hooks: SyncHooks, admin_email: impl Into<String>) -> Self {
        Self {
            store,
            hooks,
            admin_email: admin_email.into(),
        }
    }

    /// 解析作者
    ///
    /// # 返回值
    ///
    /// * `Ok(Some(id))` - 找到用户
    /// * `Ok(None)` - 没有配置邮箱或用户不存在
    /// * `Err(SyncError::AuthorResolution)` - 查询失败
    pub async fn resolve(&self) -> Result<Option<i64>, SyncError> {
        let email = self.hooks.author_email(self.admin_email.clone());
        let email = email.trim();

        if email.is_empty() {
            debug!("No author email configured, cross-posts will be authorless");
            return Ok(None);
        }

        match self.store.lookup_user_by_email(email).await {
            Ok(Some(user_id)) => Ok(Some(user_id)),
            Ok(None) => {
                warn!("No local user with email {}, cross-posts will be authorless", email);
                Ok(None)
            }
            Err(e) => Err(SyncError::AuthorResolution {
                email: email.to_string(),
                message: e.to_string(),
            }),
        }
    }
}
