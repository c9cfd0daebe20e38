// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::RemoteSettings;
use crate::domain::models::remote_post::{RemotePost, RemotePostEnvelope};
use crate::domain::services::hooks::SyncHooks;
use crate::remote::traits::{FetchError, QueryParams, RemotePostSource};
use crate::utils::retry_policy::RetryPolicy;
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Months, Utc};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// 默认 API 基础地址
pub const DEFAULT_API_BASE: &str = "https://public-api.wordpress.com/rest/v1.1/";

/// 原始响应日志的最大字节数
const MAX_LOGGED_BODY_BYTES: usize = 2048;

const DEFAULT_FIELDS: &str = "title,slug,URL,date,excerpt";

/// 构造 User-Agent：`<product>/<version>;<local-site-url>`
pub fn user_agent(product: &str, site_url: &str) -> String {
    format!("{}/{};{}", product, env!("CARGO_PKG_VERSION"), site_url)
}

/// 远端客户端配置
#[derive(Debug, Clone)]
pub struct WpcomClientConfig {
    pub api_base: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub user_agent: String,
    pub log_responses: bool,
    pub default_params: QueryParams,
}

impl Default for WpcomClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(20),
            max_retries: 2,
            user_agent: user_agent("WPCOM-CrossPost", "http://localhost"),
            log_responses: false,
            default_params: QueryParams::new(),
        }
    }
}

impl WpcomClientConfig {
    /// 从远端配置和本地站点地址构造
    pub fn from_settings(remote: &RemoteSettings, site_url: &str) -> Self {
        Self {
            api_base: remote.api_base.clone(),
            timeout: Duration::from_secs(remote.timeout_secs),
            max_retries: remote.max_retries,
            user_agent: user_agent(&remote.user_agent_product, site_url),
            log_responses: remote.log_responses,
            default_params: remote.default_params.clone(),
        }
    }
}

/// WordPress.com 公共 API 客户端
///
/// 只发起无需认证的只读 GET 请求，传输层失败按退避策略重试。
#[derive(Debug, Clone)]
pub struct WpcomClient {
    client: reqwest::Client,
    api_base: Url,
    timeout: Duration,
    retry: RetryPolicy,
    default_params: QueryParams,
    hooks: SyncHooks,
    log_responses: bool,
}

impl WpcomClient {
    /// 创建客户端
    ///
    /// # 参数
    ///
    /// * `config` - 客户端配置
    /// * `hooks` - 同步扩展点，使用其中的 `api_call_params`
    ///
    /// # 返回值
    ///
    /// * `Ok(WpcomClient)` - 客户端实例
    /// * `Err(anyhow::Error)` - API 地址无效或 HTTP 客户端构建失败
    pub fn new(config: WpcomClientConfig, hooks: SyncHooks) -> anyhow::Result<Self> {
        let mut base = config.api_base.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let api_base = Url::parse(&base).with_context(|| format!("invalid api base '{}'", base))?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            api_base,
            timeout: config.timeout,
            retry: RetryPolicy::with_max_retries(config.max_retries),
            default_params: config.default_params,
            hooks,
            log_responses: config.log_responses,
        })
    }

    /// 替换重试策略
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// 合并查询参数
    ///
    /// 优先级从低到高：内置默认值、配置默认值、`since` 推导的 `after`、调用方参数，
    /// 最后交给 `api_call_params` 钩子改写。
    pub fn build_query(&self, since: DateTime<Utc>, overrides: &QueryParams) -> QueryParams {
        let month_ago = Utc::now()
            .checked_sub_months(Months::new(1))
            .unwrap_or_else(Utc::now);

        let mut params = QueryParams::new();
        params.insert("after".to_string(), month_ago.format("%Y-%m-%d").to_string());
        params.insert("order".to_string(), "ASC".to_string());
        params.insert("fields".to_string(), DEFAULT_FIELDS.to_string());
        params.insert("status".to_string(), "publish".to_string());

        params.extend(self.default_params.clone());
        params.insert("after".to_string(), since.format("%Y-%m-%d").to_string());
        params.extend(overrides.clone());

        self.hooks.api_call_params(params)
    }

    /// 构造完整请求地址
    pub fn endpoint(&self, host: &str, params: &QueryParams) -> Result<Url, FetchError> {
        validate_host(host)?;

        let mut url = self
            .api_base
            .join(&format!("sites/{}/posts", host))
            .map_err(|_| FetchError::InvalidHost(host.to_string()))?;

        let query = serde_urlencoded::to_string(params)
            .map_err(|e| FetchError::Transport(format!("failed to encode query: {}", e)))?;
        url.set_query(Some(&query));

        Ok(url)
    }

    async fn fetch_once(&self, url: &Url) -> Result<Vec<RemotePost>, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if self.log_responses {
            debug!(
                "Remote response from {} ({} bytes): {}",
                url,
                body.len(),
                truncate_for_log(&body, MAX_LOGGED_BODY_BYTES)
            );
        }

        let envelope: RemotePostEnvelope = serde_json::from_str(&body)
            .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

        let (posts, rejected) = envelope.into_posts();
        for reason in rejected {
            warn!("Skipping malformed remote record: {}", reason);
        }

        Ok(posts)
    }

    fn map_transport_error(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl RemotePostSource for WpcomClient {
    async fn fetch(
        &self,
        host: &str,
        since: DateTime<Utc>,
        overrides: &QueryParams,
    ) -> Result<Vec<RemotePost>, FetchError> {
        let params = self.build_query(since, overrides);
        let url = self.endpoint(host, &params)?;

        let mut attempt = 0;
        loop {
            match self.fetch_once(&url).await {
                Ok(posts) => {
                    debug!("Fetched {} posts from {}", posts.len(), host);
                    return Ok(posts);
                }
                Err(e) if e.is_retryable() && self.retry.should_retry(attempt) => {
                    attempt += 1;
                    let backoff = self.retry.calculate_backoff(attempt);
                    warn!(
                        "Fetch from {} failed ({}), retry {}/{} in {:?}",
                        host, e, attempt, self.retry.max_retries, backoff
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// 校验站点域名
///
/// 必须是不含协议和路径的裸域名。
pub fn validate_host(host: &str) -> Result<(), FetchError> {
    let invalid = || FetchError::InvalidHost(host.to_string());

    if host.is_empty()
        || host.starts_with(['.', '-'])
        || host.ends_with(['.', '-'])
        || !host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(invalid());
    }

    url::Host::parse(host).map(|_| ()).map_err(|_| invalid())
}

fn truncate_for_log(body: &str, max: usize) -> &str {
    if body.len() <= max {
        return body;
    }
    let mut end = max;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
#[path = "wpcom_client_test.rs"]
mod tests;
