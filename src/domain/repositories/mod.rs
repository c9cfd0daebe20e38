// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 定义领域层依赖的内容存储抽象，具体实现由基础设施层提供，
/// 领域层不依赖于具体的数据存储技术。
pub mod content_store;
pub mod config_source;
