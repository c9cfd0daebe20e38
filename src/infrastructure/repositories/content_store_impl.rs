// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::cross_post_link::{CrossPostLink, ORIGINAL_URL_META_KEY};
use crate::domain::models::local_post::{LocalPostRequest, PostFormat};
use crate::domain::repositories::content_store::{ContentStore, RepositoryError};
use crate::infrastructure::database::entities::{post, post_category, post_meta, user};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::sync::Arc;

/// 基于 SeaORM 的内容存储实现
#[derive(Clone)]
pub struct ContentStoreImpl {
    db: Arc<DatabaseConnection>,
}

impl ContentStoreImpl {
    /// 创建新的内容存储实现
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// 注册用户，返回用户ID
    pub async fn create_user(&self, email: &str, display_name: &str) -> Result<i64, RepositoryError> {
        let model = user::ActiveModel {
            email: Set(email.trim().to_ascii_lowercase()),
            display_name: Set(display_name.to_string()),
            ..Default::default()
        };

        let inserted = model.insert(self.db.as_ref()).await?;
        Ok(inserted.id as i64)
    }

    /// 按ID读取文章
    pub async fn find_post(&self, post_id: i64) -> Result<Option<post::Model>, RepositoryError> {
        let id = to_db_id(post_id)?;
        Ok(post::Entity::find_by_id(id).one(self.db.as_ref()).await?)
    }

    /// 文章的分类ID
    pub async fn post_categories(&self, post_id: i64) -> Result<Vec<i64>, RepositoryError> {
        let id = to_db_id(post_id)?;
        let rows = post_category::Entity::find()
            .filter(post_category::Column::PostId.eq(id))
            .order_by_asc(post_category::Column::CategoryId)
            .all(self.db.as_ref())
            .await?;

        Ok(rows.into_iter().map(|row| row.category_id).collect())
    }

    /// 读取单个元数据
    pub async fn post_meta(&self, post_id: i64, key: &str) -> Result<Option<String>, RepositoryError> {
        let id = to_db_id(post_id)?;
        let row = post_meta::Entity::find()
            .filter(post_meta::Column::PostId.eq(id))
            .filter(post_meta::Column::MetaKey.eq(key))
            .one(self.db.as_ref())
            .await?;

        Ok(row.map(|row| row.meta_value))
    }

    async fn require_post(&self, id: i32) -> Result<(), RepositoryError> {
        post::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

fn to_db_id(id: i64) -> Result<i32, RepositoryError> {
    i32::try_from(id).map_err(|_| RepositoryError::NotFound)
}

#[async_trait]
impl ContentStore for ContentStoreImpl {
    async fn post_exists(
        &self,
        title: &str,
        slug: Option<&str>,
        published_at: NaiveDateTime,
    ) -> Result<bool, RepositoryError> {
        let mut query = post::Entity::find()
            .filter(post::Column::Title.eq(title))
            .filter(post::Column::PublishedAt.eq(published_at));

        if let Some(slug) = slug {
            query = query.filter(post::Column::Slug.eq(slug));
        }

        let count = query.count(self.db.as_ref()).await?;
        Ok(count > 0)
    }

    async fn insert_post(&self, request: &LocalPostRequest) -> Result<i64, RepositoryError> {
        if request.title.trim().is_empty() && request.content.trim().is_empty() {
            return Err(RepositoryError::Rejected("post has no title and no content".to_string()));
        }

        let txn = self.db.begin().await?;

        let model = post::ActiveModel {
            title: Set(request.title.clone()),
            slug: Set(request.slug.clone()),
            content: Set(request.content.clone()),
            status: Set(request.status.to_string()),
            comment_status: Set(request.comment_status.to_string()),
            format: Set(PostFormat::Standard.to_string()),
            author_id: Set(request.author_id),
            published_at: Set(request.published_at),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let inserted = model.insert(&txn).await?;

        if !request.category_ids.is_empty() {
            let categories = request
                .category_ids
                .iter()
                .map(|category_id| post_category::ActiveModel {
                    post_id: Set(inserted.id),
                    category_id: Set(*category_id),
                });
            post_category::Entity::insert_many(categories)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(inserted.id as i64)
    }

    async fn set_post_format(&self, post_id: i64, format: PostFormat) -> Result<(), RepositoryError> {
        let id = to_db_id(post_id)?;
        let result = post::Entity::update_many()
            .col_expr(post::Column::Format, Expr::value(format.to_string()))
            .filter(post::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn set_post_meta(&self, post_id: i64, key: &str, value: &str) -> Result<(), RepositoryError> {
        let id = to_db_id(post_id)?;
        self.require_post(id).await?;

        let existing = post_meta::Entity::find()
            .filter(post_meta::Column::PostId.eq(id))
            .filter(post_meta::Column::MetaKey.eq(key))
            .one(self.db.as_ref())
            .await?;

        match existing {
            Some(row) => {
                let mut active: post_meta::ActiveModel = row.into();
                active.meta_value = Set(value.to_string());
                active.update(self.db.as_ref()).await?;
            }
            None => {
                post_meta::ActiveModel {
                    post_id: Set(id),
                    meta_key: Set(key.to_string()),
                    meta_value: Set(value.to_string()),
                    ..Default::default()
                }
                .insert(self.db.as_ref())
                .await?;
            }
        }

        Ok(())
    }

    async fn lookup_user_by_email(&self, email: &str) -> Result<Option<i64>, RepositoryError> {
        let found = user::Entity::find()
            .filter(user::Column::Email.eq(email.trim().to_ascii_lowercase()))
            .one(self.db.as_ref())
            .await?;

        Ok(found.map(|u| u.id as i64))
    }

    async fn list_cross_post_links(&self, limit: u64) -> Result<Vec<CrossPostLink>, RepositoryError> {
        let rows = post_meta::Entity::find()
            .filter(post_meta::Column::MetaKey.eq(ORIGINAL_URL_META_KEY))
            .order_by_desc(post_meta::Column::PostId)
            .limit(limit)
            .all(self.db.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| CrossPostLink::new(row.post_id as i64, row.meta_value))
            .collect())
    }
}

#[cfg(test)]
#[path = "content_store_impl_test.rs"]
mod tests;
