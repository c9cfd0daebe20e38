// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 远端文章来源
///
/// 定义拉取特质与错误类型，以及基于 WordPress.com 公共 API 的实现。
pub mod traits;
pub mod wpcom_client;
