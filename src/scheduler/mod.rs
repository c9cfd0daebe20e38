// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 调度模块
///
/// 把同步用例绑定到周期触发器上，支持安装、卸载与状态查询
pub mod binding;
pub mod frequency;
