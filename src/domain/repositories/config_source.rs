// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::sync_config::CrossPostOptions;

/// 同步配置来源特质
///
/// 每次运行开始时调用一次。返回 `None` 表示配置不可用，
/// 编排器会按缺失配置处理而不是失败。
pub trait SyncConfigSource: Send + Sync {
    fn load(&self) -> Option<CrossPostOptions>;
}

/// 固定配置来源
#[derive(Debug, Clone, Default)]
pub struct StaticConfigSource {
    options: CrossPostOptions,
}

impl StaticConfigSource {
    pub fn new(options: CrossPostOptions) -> Self {
        Self {
            options: options.sanitized(),
        }
    }
}

impl SyncConfigSource for StaticConfigSource {
    fn load(&self) -> Option<CrossPostOptions> {
        Some(self.options.clone())
    }
}
