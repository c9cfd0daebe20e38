// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 提供内容存储接口的具体实现：
/// 基于数据库的实现与进程内实现
pub mod content_store_impl;
pub mod memory_content_store;
