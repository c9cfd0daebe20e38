// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 记录原文地址的文章元数据键
pub const ORIGINAL_URL_META_KEY: &str = "original_url";

/// 交叉发布链接
///
/// 每篇成功复制的文章恰好对应一条记录，插入成功后立即写入，之后不再修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossPostLink {
    pub local_post_id: i64,
    pub original_url: String,
}

impl CrossPostLink {
    pub fn new(local_post_id: i64, original_url: impl Into<String>) -> Self {
        Self {
            local_post_id,
            original_url: original_url.into(),
        }
    }
}
