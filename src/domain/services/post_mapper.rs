// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::local_post::{CommentStatus, LocalPostRequest, PostStatus};
use crate::domain::models::remote_post::RemotePost;
use crate::domain::models::sync_config::SyncConfig;
use crate::domain::services::hooks::SyncHooks;
use crate::utils::text::{escape_html, escape_url, sanitize_html, slugify};
use std::collections::BTreeSet;

/// 无作者时使用的作者ID
pub const NO_AUTHOR_ID: i64 = 0;

/// 文章映射器
///
/// 把一篇远端文章和同步配置转换为本地文章创建请求。
/// 映射是输入的纯函数：不做任何 I/O，相同输入总是得到相同输出。
#[derive(Debug, Clone, Default)]
pub struct PostMapper {
    hooks: SyncHooks,
}

impl PostMapper {
    pub fn new(hooks: SyncHooks) -> Self {
        Self { hooks }
    }

    /// 默认的"阅读原文"片段
    pub fn default_more_text(post: &RemotePost, config: &SyncConfig) -> String {
        format!(
            r#"<p>Read more on <a class="more-link" href="{}" title="{}">{}</a></p>"#,
            escape_url(&post.url),
            slugify(&post.title),
            escape_html(&config.remote_site_host),
        )
    }

    /// 映射远端文章
    ///
    /// # 参数
    ///
    /// * `post` - 远端文章
    /// * `config` - 本次运行的同步配置
    /// * `author_id` - 已解析的作者ID，无作者时为 [`NO_AUTHOR_ID`]
    ///
    /// # 返回值
    ///
    /// 经过 `more_text` 与 `post_data` 钩子处理后的创建请求
    pub fn map(&self, post: &RemotePost, config: &SyncConfig, author_id: i64) -> LocalPostRequest {
        let more_text = self
            .hooks
            .more_text(Self::default_more_text(post, config), post);

        let comment_status = if config.close_comments {
            CommentStatus::Closed
        } else {
            CommentStatus::Open
        };

        let request = LocalPostRequest {
            title: escape_html(&post.title),
            slug: slugify(&post.slug),
            content: sanitize_html(&format!("{}{}", post.excerpt, more_text)),
            status: PostStatus::Publish,
            comment_status,
            author_id,
            category_ids: BTreeSet::from([config.default_category_id]),
            published_at: post.published_at.naive_local(),
        };

        self.hooks.post_data(request, post, config)
    }
}
