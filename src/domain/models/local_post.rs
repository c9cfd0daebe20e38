// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// 本地文章创建请求
///
/// 由远端文章和同步配置确定性地生成，交给内容存储插入后即丢弃。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalPostRequest {
    /// 已做 HTML 转义的标题
    pub title: String,
    pub slug: String,
    /// 已净化的 HTML 正文
    pub content: String,
    pub status: PostStatus,
    pub comment_status: CommentStatus,
    /// 作者ID，0 表示无作者
    pub author_id: i64,
    pub category_ids: BTreeSet<i64>,
    /// 发布时间（远端文章的本地墙钟时间）
    pub published_at: NaiveDateTime,
}

/// 文章状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    #[default]
    Publish,
    Draft,
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PostStatus::Publish => write!(f, "publish"),
            PostStatus::Draft => write!(f, "draft"),
        }
    }
}

/// 评论状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CommentStatus {
    #[default]
    Open,
    Closed,
}

impl fmt::Display for CommentStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CommentStatus::Open => write!(f, "open"),
            CommentStatus::Closed => write!(f, "closed"),
        }
    }
}

impl FromStr for CommentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(CommentStatus::Open),
            "closed" => Ok(CommentStatus::Closed),
            other => Err(format!("Invalid comment status: {}", other)),
        }
    }
}

/// 文章格式
///
/// 交叉发布的文章统一使用 `link` 格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostFormat {
    Standard,
    Link,
}

impl fmt::Display for PostFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PostFormat::Standard => write!(f, "standard"),
            PostFormat::Link => write!(f, "link"),
        }
    }
}

impl FromStr for PostFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(PostFormat::Standard),
            "link" => Ok(PostFormat::Link),
            other => Err(format!("Invalid post format: {}", other)),
        }
    }
}
