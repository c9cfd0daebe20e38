// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
/// 包括遥测初始化、重试策略、文本处理和时间表达式解析
pub mod retry_policy;
pub mod telemetry;
pub mod text;
pub mod time_expr;
