// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 作者解析（author_resolver）：按邮箱查找交叉发布文章的作者
/// - 去重闸门（dedup_gate）：判断远端文章是否已复制
/// - 扩展点（hooks）：可注入的纯函数策略
/// - 文章映射（post_mapper）：远端文章到本地创建请求的纯转换
pub mod author_resolver;
pub mod dedup_gate;
pub mod hooks;
pub mod post_mapper;
