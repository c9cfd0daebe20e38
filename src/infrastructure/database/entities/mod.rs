// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据库实体模块
///
/// 定义内容存储各表对应的实体结构
/// 使用SeaORM框架进行对象关系映射
pub mod post;
pub mod post_category;
pub mod post_meta;
pub mod user;
