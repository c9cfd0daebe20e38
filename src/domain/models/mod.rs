// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了交叉发布的核心数据结构：
/// - 远端文章（remote_post）：远端 API 返回的文章记录
/// - 本地文章（local_post）：写入内容存储的创建请求
/// - 交叉发布链接（cross_post_link）：本地文章与原文地址的对应关系
/// - 同步配置（sync_config）：每次运行加载一次的不可变配置
/// - 同步结果（sync_result）：运行汇总与错误分类
pub mod cross_post_link;
pub mod local_post;
pub mod remote_post;
pub mod sync_config;
pub mod sync_result;
