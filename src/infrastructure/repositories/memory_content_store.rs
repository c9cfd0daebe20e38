// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::cross_post_link::{CrossPostLink, ORIGINAL_URL_META_KEY};
use crate::domain::models::local_post::{LocalPostRequest, PostFormat};
use crate::domain::repositories::content_store::{ContentStore, RepositoryError};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

/// 内存中保存的文章
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPost {
    pub id: i64,
    pub request: LocalPostRequest,
    pub format: PostFormat,
    pub meta: BTreeMap<String, String>,
}

#[derive(Debug, Default)]
struct MemoryState {
    posts: Vec<StoredPost>,
    users: HashMap<String, i64>,
    next_post_id: i64,
    next_user_id: i64,
}

/// 进程内内容存储
///
/// 用于测试以及 `database.url = "memory://"` 的本地试运行，重启后数据丢失。
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    state: RwLock<MemoryState>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册用户，返回用户ID；邮箱已存在时返回原ID
    pub fn add_user(&self, email: &str) -> i64 {
        let mut state = self.state.write();
        let key = email.to_ascii_lowercase();
        if let Some(id) = state.users.get(&key) {
            return *id;
        }
        state.next_user_id += 1;
        let id = state.next_user_id;
        state.users.insert(key, id);
        id
    }

    /// 当前所有文章的快照，按插入顺序
    pub fn posts(&self) -> Vec<StoredPost> {
        self.state.read().posts.clone()
    }

    pub fn post_count(&self) -> usize {
        self.state.read().posts.len()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn post_exists(
        &self,
        title: &str,
        slug: Option<&str>,
        published_at: NaiveDateTime,
    ) -> Result<bool, RepositoryError> {
        let state = self.state.read();
        Ok(state.posts.iter().any(|post| {
            post.request.title == title
                && post.request.published_at == published_at
                && slug.map_or(true, |slug| post.request.slug == slug)
        }))
    }

    async fn insert_post(&self, request: &LocalPostRequest) -> Result<i64, RepositoryError> {
        if request.title.trim().is_empty() && request.content.trim().is_empty() {
            return Err(RepositoryError::Rejected("post has no title and no content".to_string()));
        }

        let mut state = self.state.write();
        state.next_post_id += 1;
        let id = state.next_post_id;
        state.posts.push(StoredPost {
            id,
            request: request.clone(),
            format: PostFormat::Standard,
            meta: BTreeMap::new(),
        });
        Ok(id)
    }

    async fn set_post_format(&self, post_id: i64, format: PostFormat) -> Result<(), RepositoryError> {
        let mut state = self.state.write();
        let post = state
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or(RepositoryError::NotFound)?;
        post.format = format;
        Ok(())
    }

    async fn set_post_meta(&self, post_id: i64, key: &str, value: &str) -> Result<(), RepositoryError> {
        let mut state = self.state.write();
        let post = state
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or(RepositoryError::NotFound)?;
        post.meta.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn lookup_user_by_email(&self, email: &str) -> Result<Option<i64>, RepositoryError> {
        Ok(self.state.read().users.get(&email.to_ascii_lowercase()).copied())
    }

    async fn list_cross_post_links(&self, limit: u64) -> Result<Vec<CrossPostLink>, RepositoryError> {
        let state = self.state.read();
        Ok(state
            .posts
            .iter()
            .rev()
            .filter_map(|post| {
                post.meta
                    .get(ORIGINAL_URL_META_KEY)
                    .map(|url| CrossPostLink::new(post.id, url.clone()))
            })
            .take(limit as usize)
            .collect())
    }
}
