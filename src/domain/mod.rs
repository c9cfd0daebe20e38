// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含交叉发布的核心业务逻辑，包括：
/// - 领域模型（models）：远端文章、本地文章请求、同步配置与结果
/// - 仓库接口（repositories）：内容存储抽象接口
/// - 服务（services）：文章映射、去重闸门、作者解析与扩展点
///
/// 领域层不依赖于任何外部实现。
pub mod models;
pub mod repositories;
pub mod services;
