// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::sync_request::CrossPostQueryDto;
use crate::domain::models::cross_post_link::CrossPostLink;
use crate::domain::repositories::content_store::ContentStore;
use crate::presentation::errors::AppError;
use axum::{extract::Query, Extension, Json};
use std::sync::Arc;
use validator::Validate;

/// 最近创建的交叉发布链接
pub async fn list_crossposts<S: ContentStore + 'static>(
    Extension(store): Extension<Arc<S>>,
    Query(query): Query<CrossPostQueryDto>,
) -> Result<Json<Vec<CrossPostLink>>, AppError> {
    query.validate()?;
    let links = store.list_cross_post_links(query.limit()).await?;
    Ok(Json(links))
}
