// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// CMS 的默认分类（"未分类"）
pub const DEFAULT_CATEGORY_ID: i64 = 1;

static PROTOCOL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://").expect("valid protocol regex"));

/// 同步配置
///
/// 每次运行开始时加载一次，运行期间不可变，由编排器持有并传给各组件。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// 远端站点域名（不含协议）
    pub remote_site_host: String,
    /// 交叉发布文章使用的分类
    pub default_category_id: i64,
    /// 是否关闭评论
    pub close_comments: bool,
}

impl SyncConfig {
    pub fn new(remote_site_host: impl Into<String>, default_category_id: i64, close_comments: bool) -> Self {
        Self {
            remote_site_host: remote_site_host.into(),
            default_category_id,
            close_comments,
        }
    }

    /// 是否配置了可拉取的远端站点
    pub fn has_remote_site(&self) -> bool {
        !self.remote_site_host.is_empty()
    }
}

/// 设置表单持久化的原始选项
///
/// 对应 `website`、`category`、`close_comments` 三个可识别选项，
/// 任何一项都可能缺失。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossPostOptions {
    pub website: Option<String>,
    pub category: Option<i64>,
    /// `"yes"` 或 `"no"`（也接受布尔值的字符串形式）
    pub close_comments: Option<String>,
}

/// 选项解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub config: SyncConfig,
    /// 缺失并已使用默认值的选项名
    pub missing: Vec<&'static str>,
}

impl CrossPostOptions {
    /// 净化选项
    ///
    /// 去掉站点地址的协议前缀与结尾斜杠，未勾选的关闭评论选项强制为 `"no"`。
    pub fn sanitized(mut self) -> Self {
        self.website = self
            .website
            .map(|w| strip_protocol(&w))
            .filter(|w| !w.is_empty());

        if self.close_comments.is_none() {
            self.close_comments = Some("no".to_string());
        }

        self
    }

    /// 尽力将选项转换为同步配置
    ///
    /// 缺失的选项使用默认值并记录在 `missing` 中，从不失败。
    pub fn resolve(&self) -> ResolvedConfig {
        let mut missing = Vec::new();

        let remote_site_host = match self.website.as_deref().map(strip_protocol) {
            Some(host) if !host.is_empty() => host,
            _ => {
                missing.push("website");
                String::new()
            }
        };

        let default_category_id = match self.category {
            Some(category) if category > 0 => category,
            _ => {
                missing.push("category");
                DEFAULT_CATEGORY_ID
            }
        };

        let close_comments = match self.close_comments.as_deref() {
            Some(value) => matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "yes" | "true" | "on" | "1"
            ),
            None => {
                missing.push("close_comments");
                false
            }
        };

        ResolvedConfig {
            config: SyncConfig {
                remote_site_host,
                default_category_id,
                close_comments,
            },
            missing,
        }
    }
}

/// 去掉协议前缀、首尾空白和结尾斜杠
pub fn strip_protocol(website: &str) -> String {
    PROTOCOL_PREFIX
        .replace(website.trim(), "")
        .trim_end_matches('/')
        .to_string()
}
