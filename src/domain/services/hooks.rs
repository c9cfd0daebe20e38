// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::local_post::LocalPostRequest;
use crate::domain::models::remote_post::RemotePost;
use crate::domain::models::sync_config::SyncConfig;
use crate::remote::traits::QueryParams;
use std::fmt;
use std::sync::Arc;

type FrequencyHook = Arc<dyn Fn(String) -> String + Send + Sync>;
type MoreTextHook = Arc<dyn Fn(String, &RemotePost) -> String + Send + Sync>;
type AuthorEmailHook = Arc<dyn Fn(String) -> String + Send + Sync>;
type PostDataHook =
    Arc<dyn Fn(LocalPostRequest, &RemotePost, &SyncConfig) -> LocalPostRequest + Send + Sync>;
type ApiParamsHook = Arc<dyn Fn(QueryParams) -> QueryParams + Send + Sync>;

/// 同步扩展点
///
/// 每个钩子都是纯函数，接收默认值并返回替换值，默认实现为恒等函数。
/// 在构建编排器时一次性组合，而不是在调用时动态查找。
#[derive(Clone)]
pub struct SyncHooks {
    sync_frequency: FrequencyHook,
    more_text: MoreTextHook,
    author_email: AuthorEmailHook,
    post_data: PostDataHook,
    api_call_params: ApiParamsHook,
}

impl Default for SyncHooks {
    fn default() -> Self {
        Self {
            sync_frequency: Arc::new(|frequency: String| frequency),
            more_text: Arc::new(keep_more_text),
            author_email: Arc::new(|email: String| email),
            post_data: Arc::new(keep_post_data),
            api_call_params: Arc::new(|params: QueryParams| params),
        }
    }
}

fn keep_more_text(text: String, _post: &RemotePost) -> String {
    text
}

fn keep_post_data(request: LocalPostRequest, _post: &RemotePost, _config: &SyncConfig) -> LocalPostRequest {
    request
}

impl fmt::Debug for SyncHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncHooks").finish_non_exhaustive()
    }
}

impl SyncHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// 替换调度频率
    pub fn with_sync_frequency<F>(mut self, hook: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.sync_frequency = Arc::new(hook);
        self
    }

    /// 替换"阅读原文"片段
    pub fn with_more_text<F>(mut self, hook: F) -> Self
    where
        F: Fn(String, &RemotePost) -> String + Send + Sync + 'static,
    {
        self.more_text = Arc::new(hook);
        self
    }

    /// 替换作者邮箱
    pub fn with_author_email<F>(mut self, hook: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.author_email = Arc::new(hook);
        self
    }

    /// 改写最终的文章创建请求
    pub fn with_post_data<F>(mut self, hook: F) -> Self
    where
        F: Fn(LocalPostRequest, &RemotePost, &SyncConfig) -> LocalPostRequest + Send + Sync + 'static,
    {
        self.post_data = Arc::new(hook);
        self
    }

    /// 改写远端查询参数
    pub fn with_api_call_params<F>(mut self, hook: F) -> Self
    where
        F: Fn(QueryParams) -> QueryParams + Send + Sync + 'static,
    {
        self.api_call_params = Arc::new(hook);
        self
    }

    pub fn sync_frequency(&self, frequency: String) -> String {
        (self.sync_frequency)(frequency)
    }

    pub fn more_text(&self, text: String, post: &RemotePost) -> String {
        (self.more_text)(text, post)
    }

    pub fn author_email(&self, email: String) -> String {
        (self.author_email)(email)
    }

    pub fn post_data(&self, request: LocalPostRequest, post: &RemotePost, config: &SyncConfig) -> LocalPostRequest {
        (self.post_data)(request, post, config)
    }

    pub fn api_call_params(&self, params: QueryParams) -> QueryParams {
        (self.api_call_params)(params)
    }
}
