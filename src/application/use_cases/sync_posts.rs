// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::models::cross_post_link::{CrossPostLink, ORIGINAL_URL_META_KEY};
use crate::domain::models::local_post::PostFormat;
use crate::domain::models::remote_post::RemotePost;
use crate::domain::models::sync_config::SyncConfig;
use crate::domain::models::sync_result::{SyncError, SyncResult};
use crate::domain::repositories::config_source::SyncConfigSource;
use crate::domain::repositories::content_store::ContentStore;
use crate::domain::services::author_resolver::AuthorResolver;
use crate::domain::services::dedup_gate::DedupGate;
use crate::domain::services::hooks::SyncHooks;
use crate::domain::services::post_mapper::{PostMapper, NO_AUTHOR_ID};
use crate::remote::traits::{QueryParams, RemotePostSource};
use crate::scheduler::binding::ScheduledJob;
use crate::utils::time_expr::Since;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// 默认回溯窗口
pub const DEFAULT_LOOKBACK: &str = "-7 days";

/// 默认每次运行最多创建的文章数
pub const DEFAULT_MAX_POSTS_PER_RUN: usize = 100;

/// 批处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// 处理拉取到的全部文章
    #[default]
    ProcessAll,
    /// 创建第一篇文章后结束本次运行
    StopAfterFirst,
}

/// 同步运行选项
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub batch_policy: BatchPolicy,
    pub max_posts_per_run: Option<usize>,
    pub default_lookback: Since,
    pub admin_email: String,
    pub query_overrides: QueryParams,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            batch_policy: BatchPolicy::default(),
            max_posts_per_run: Some(DEFAULT_MAX_POSTS_PER_RUN),
            default_lookback: Since::from(DEFAULT_LOOKBACK),
            admin_email: String::new(),
            query_overrides: QueryParams::new(),
        }
    }
}

impl SyncOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            batch_policy: settings.sync.batch_policy,
            max_posts_per_run: settings.sync.max_posts_per_run,
            default_lookback: Since::from(settings.sync.default_lookback.as_str()),
            admin_email: settings.site.admin_email.clone(),
            query_overrides: QueryParams::new(),
        }
    }
}

/// 同步文章用例
///
/// 一次运行：加载配置、拉取远端文章、逐篇去重并创建本地文章。
/// 任何失败都记录在结果中，`run` 本身从不返回错误。
pub struct SyncPostsUseCase<S, R, C>
where
    S: ContentStore,
{
    store: Arc<S>,
    source: Arc<R>,
    config_source: Arc<C>,
    mapper: PostMapper,
    dedup: DedupGate<S>,
    authors: AuthorResolver<S>,
    options: SyncOptions,
}

impl<S, R, C> SyncPostsUseCase<S, R, C>
where
    S: ContentStore + 'static,
    R: RemotePostSource + 'static,
    C: SyncConfigSource + 'static,
{
    pub fn new(
        store: Arc<S>,
        source: Arc<R>,
        config_source: Arc<C>,
        hooks: SyncHooks,
        options: SyncOptions,
    ) -> Self {
        Self {
            dedup: DedupGate::new(store.clone()),
            authors: AuthorResolver::new(store.clone(), hooks.clone(), options.admin_email.clone()),
            mapper: PostMapper::new(hooks),
            store,
            source,
            config_source,
            options,
        }
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// 执行一次同步
    ///
    /// # 参数
    ///
    /// * `since` - 回溯窗口起点，`None` 使用默认回溯窗口
    ///
    /// # 返回值
    ///
    /// 本次运行的汇总结果
    pub async fn run(&self, since: Option<Since>) -> SyncResult {
        let run_id = Uuid::new_v4();
        let span = info_span!("sync_run", %run_id);

        async move {
            let started = Instant::now();
            let result = self.execute(run_id, since).await;

            counter!("crosspost_runs_total").increment(1);
            counter!("crosspost_posts_created_total").increment(result.posts_created as u64);
            counter!("crosspost_posts_skipped_total").increment(result.posts_skipped as u64);
            histogram!("crosspost_sync_duration_seconds").record(started.elapsed().as_secs_f64());

            info!(
                "Sync run finished: {} created, {} skipped, {} errors",
                result.posts_created,
                result.posts_skipped,
                result.errors.len()
            );
            result
        }
        .instrument(span)
        .await
    }

    async fn execute(&self, run_id: Uuid, since: Option<Since>) -> SyncResult {
        let mut result = SyncResult::new(run_id);

        let config = match self.load_config(&mut result) {
            Some(config) => config,
            None => return result,
        };

        let since = self.resolve_since(since, Utc::now());
        info!("Fetching posts from {} since {}", config.remote_site_host, since);

        let posts = match self
            .source
            .fetch(&config.remote_site_host, since, &self.options.query_overrides)
            .await
        {
            Ok(posts) => posts,
            Err(e) => {
                counter!("crosspost_fetch_failures_total", "kind" => e.kind()).increment(1);
                warn!("Fetching remote posts failed: {}", e);
                result.record(e.into());
                return result;
            }
        };

        if posts.is_empty() {
            info!("No new remote posts");
            return result;
        }

        let author_id = match self.authors.resolve().await {
            Ok(id) => id.unwrap_or(NO_AUTHOR_ID),
            Err(e) => {
                warn!("{}", e);
                result.record(e);
                NO_AUTHOR_ID
            }
        };

        for post in &posts {
            if let Some(max) = self.options.max_posts_per_run {
                if result.posts_created >= max {
                    info!("Reached the limit of {} posts per run", max);
                    break;
                }
            }

            let created = self.process_post(post, &config, author_id, &mut result).await;

            if created && self.options.batch_policy == BatchPolicy::StopAfterFirst {
                debug!("Stopping after the first created post");
                break;
            }
        }

        result
    }

    /// 加载本次运行的配置，没有远端站点时返回 `None`
    fn load_config(&self, result: &mut SyncResult) -> Option<SyncConfig> {
        let options = self.config_source.load().unwrap_or_default();
        let resolved = options.resolve();

        for option in resolved.missing {
            warn!("Cross-post option '{}' is not configured", option);
            result.record(SyncError::ConfigMissing {
                option: option.to_string(),
            });
        }

        if resolved.config.has_remote_site() {
            Some(resolved.config)
        } else {
            warn!("No remote site configured, nothing to sync");
            None
        }
    }

    fn resolve_since(&self, since: Option<Since>, now: DateTime<Utc>) -> DateTime<Utc> {
        if let Some(since) = since {
            match since.resolve(now) {
                Ok(at) => return at,
                Err(e) => warn!("{}, falling back to '{}'", e, self.options.default_lookback),
            }
        }

        self.options.default_lookback.resolve(now).unwrap_or_else(|e| {
            warn!("Invalid default lookback: {}", e);
            now - Duration::days(7)
        })
    }

    /// 处理单篇文章，返回是否创建了新文章
    async fn process_post(
        &self,
        post: &RemotePost,
        config: &SyncConfig,
        author_id: i64,
        result: &mut SyncResult,
    ) -> bool {
        let request = self.mapper.map(post, config, author_id);

        match self.dedup.exists(&request.title, request.published_at).await {
            Ok(true) => {
                debug!("Post '{}' already cross-posted, skipping", request.title);
                result.posts_skipped += 1;
                return false;
            }
            Ok(false) => {}
            Err(e) => {
                error!("Existence check failed for '{}': {}", request.title, e);
                result.record(SyncError::DedupCheck {
                    title: request.title.clone(),
                    message: e.to_string(),
                });
                return false;
            }
        }

        let post_id = match self.store.insert_post(&request).await {
            Ok(id) => id,
            Err(e) => {
                counter!("crosspost_insert_failures_total").increment(1);
                error!("Inserting '{}' failed: {}", request.title, e);
                result.record(SyncError::Insert {
                    title: request.title.clone(),
                    message: e.to_string(),
                });
                return false;
            }
        };

        if let Err(e) = self.store.set_post_format(post_id, PostFormat::Link).await {
            error!("Setting post format for {} failed: {}", post_id, e);
            result.record(SyncError::PostFormat {
                post_id,
                message: e.to_string(),
            });
        }

        let link = CrossPostLink::new(post_id, post.url.clone());
        if let Err(e) = self
            .store
            .set_post_meta(link.local_post_id, ORIGINAL_URL_META_KEY, &link.original_url)
            .await
        {
            error!("Recording original URL for {} failed: {}", post_id, e);
            result.record(SyncError::CrossPostLink {
                post_id,
                message: e.to_string(),
            });
        }

        info!("Created post {} from {}", post_id, post.url);
        result.posts_created += 1;
        true
    }
}

#[async_trait]
impl<S, R, C> ScheduledJob for SyncPostsUseCase<S, R, C>
where
    S: ContentStore + 'static,
    R: RemotePostSource + 'static,
    C: SyncConfigSource + 'static,
{
    async fn run(&self) {
        SyncPostsUseCase::run(self, None).await;
    }
}

#[cfg(test)]
#[path = "sync_posts_test.rs"]
mod tests;
