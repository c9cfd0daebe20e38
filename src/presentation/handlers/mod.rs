// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP处理器模块
///
/// 运维接口的请求处理器：手动同步、调度管理和交叉发布记录查询
pub mod crosspost_handler;
pub mod schedule_handler;
pub mod sync_handler;
