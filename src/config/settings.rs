// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::sync_posts::BatchPolicy;
use crate::domain::models::sync_config::CrossPostOptions;
use crate::domain::repositories::config_source::SyncConfigSource;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// 默认配置目录
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// 环境变量前缀
pub const ENV_PREFIX: &str = "CROSSPOST";

/// 应用程序配置设置
///
/// 包含服务器、数据库、站点、交叉发布选项、远端、同步、调度、指标和日志等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 本地站点配置
    pub site: SiteSettings,
    /// 交叉发布选项（设置表单持久化的三个值）
    #[serde(default)]
    pub crosspost: CrossPostOptions,
    /// 远端 API 配置
    pub remote: RemoteSettings,
    /// 同步策略配置
    pub sync: SyncSettings,
    /// 调度配置
    pub scheduler: SchedulerSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
    /// 日志配置
    pub logging: LoggingSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL，`memory://` 表示使用进程内存储
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 本地站点配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SiteSettings {
    /// 本地站点地址，出现在 User-Agent 中
    pub url: String,
    /// 管理员邮箱，默认作为交叉发布文章的作者
    #[serde(default)]
    pub admin_email: String,
}

/// 远端 API 配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSettings {
    /// API 基础地址
    pub api_base: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 传输失败的最大重试次数
    pub max_retries: u32,
    /// User-Agent 中的产品名
    pub user_agent_product: String,
    /// 是否在 debug 级别记录原始响应
    pub log_responses: bool,
    /// 覆盖内置默认查询参数
    #[serde(default)]
    pub default_params: BTreeMap<String, String>,
}

/// 同步策略配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SyncSettings {
    /// 批处理策略
    pub batch_policy: BatchPolicy,
    /// 每次运行最多创建的文章数
    pub max_posts_per_run: Option<usize>,
    /// 默认回溯窗口
    pub default_lookback: String,
}

/// 调度配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerSettings {
    /// 是否启用定时同步
    pub enabled: bool,
    /// 定时任务名称
    pub job_name: String,
    /// 同步频率（hourly、twicedaily、daily、weekly 或秒数）
    pub frequency: String,
    /// 安装后是否立即执行一次
    pub run_on_install: bool,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出器监听地址
    pub listen_addr: String,
}

/// 日志配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// 是否输出 JSON 格式日志
    pub json: bool,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从 `config/` 目录和环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_dir(DEFAULT_CONFIG_DIR)
    }

    /// 从指定目录加载配置
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::builder(dir.as_ref())?.build()?.try_deserialize()
    }

    /// 只重新读取交叉发布选项
    pub fn load_crosspost_options(dir: impl AsRef<Path>) -> Result<CrossPostOptions, ConfigError> {
        let config = Self::builder(dir.as_ref())?.build()?;
        match config.get::<CrossPostOptions>("crosspost") {
            Ok(options) => Ok(options.sanitized()),
            Err(ConfigError::NotFound(_)) => Ok(CrossPostOptions::default()),
            Err(e) => Err(e),
        }
    }

    fn builder(dir: &Path) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());

        Ok(Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.url", "sqlite://crosspost.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            .set_default("site.url", "http://localhost")?
            .set_default("site.admin_email", "")?
            // Remote API settings
            .set_default("remote.api_base", "https://public-api.wordpress.com/rest/v1.1/")?
            .set_default("remote.timeout_secs", 20)?
            .set_default("remote.max_retries", 2)?
            .set_default("remote.user_agent_product", "WPCOM-CrossPost")?
            .set_default("remote.log_responses", false)?
            // Sync settings
            .set_default("sync.batch_policy", "process_all")?
            .set_default("sync.max_posts_per_run", 100)?
            .set_default("sync.default_lookback", "-7 days")?
            // Scheduler settings
            .set_default("scheduler.enabled", true)?
            .set_default("scheduler.job_name", "crossposts_create_posts")?
            .set_default("scheduler.frequency", "daily")?
            .set_default("scheduler.run_on_install", true)?
            .set_default("metrics.enabled", true)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")?
            .set_default("logging.json", false)?
            .add_source(File::with_name(&dir.join("default").to_string_lossy()).required(false))
            .add_source(File::with_name(&dir.join(&env).to_string_lossy()).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__")))
    }
}

/// 基于配置文件的同步配置来源
///
/// 每次运行都重新读取，设置修改后无需重启即可生效。
#[derive(Debug, Clone)]
pub struct SettingsConfigSource {
    dir: PathBuf,
}

impl SettingsConfigSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SyncConfigSource for SettingsConfigSource {
    fn load(&self) -> Option<CrossPostOptions> {
        match Settings::load_crosspost_options(&self.dir) {
            Ok(options) => Some(options),
            Err(e) => {
                warn!("Failed to load cross-post options: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
