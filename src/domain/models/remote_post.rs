// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// 远端文章
///
/// 远端站点 REST API 返回的单篇文章记录，只在一次同步中存在，
/// 不会原样持久化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemotePost {
    /// 文章标题（原始文本，未转义）
    pub title: String,
    /// 远端 slug
    #[serde(default)]
    pub slug: String,
    /// 远端文章的永久链接
    #[serde(rename = "URL")]
    pub url: String,
    /// 发布时间
    #[serde(rename = "date", deserialize_with = "deserialize_published_at")]
    pub published_at: DateTime<FixedOffset>,
    /// 摘要 HTML
    #[serde(default)]
    pub excerpt: String,
}

/// 远端 API 的响应信封
///
/// `posts` 字段缺失或不是数组时整个响应视为格式错误；
/// 单条记录无法解析时只跳过该条。
#[derive(Debug, Deserialize)]
pub struct RemotePostEnvelope {
    pub posts: Vec<serde_json::Value>,
}

impl RemotePostEnvelope {
    /// 解析所有记录，返回可用的文章和被跳过的原因
    pub fn into_posts(self) -> (Vec<RemotePost>, Vec<String>) {
        let mut posts = Vec::with_capacity(self.posts.len());
        let mut rejected = Vec::new();

        for raw in self.posts {
            match serde_json::from_value::<RemotePost>(raw) {
                Ok(post) => posts.push(post),
                Err(e) => rejected.push(e.to_string()),
            }
        }

        (posts, rejected)
    }
}

/// 解析远端日期
///
/// 支持 RFC 3339、`YYYY-MM-DD HH:MM:SS` 与 `YYYY-MM-DD` 三种格式，
/// 不带时区的日期按 UTC 处理。
pub fn parse_remote_date(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed);
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    Some(Utc.from_utc_datetime(&naive).fixed_offset())
}

fn deserialize_published_at<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_remote_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized post date: {}", raw)))
}
