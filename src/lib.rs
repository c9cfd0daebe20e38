// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含同步用例和请求DTO
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置、环境变量和交叉发布选项
pub mod config;

/// 领域模块
///
/// 包含文章模型、同步结果、扩展钩子和存储接口
pub mod domain;

/// 基础设施模块
///
/// 提供数据库、内容存储实现和指标导出
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由和处理器
pub mod presentation;

/// 远端模块
///
/// WordPress.com REST API 客户端
pub mod remote;

/// 调度模块
///
/// 定时同步任务的安装、卸载与频率解析
pub mod scheduler;

/// 工具模块
///
/// 提供文本处理、时间表达式、重试策略和日志初始化
pub mod utils;

/// 工作器模块
///
/// 按间隔触发同步的后台工作器
pub mod workers;
