//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 连接字符串检查模块
//!
//! 支持 SQLite、MySQL 和 PostgreSQL 三种数据库类型。

use crate::error::Result;
use std::path::{Path, PathBuf};

/// 数据库类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbType {
    SQLite,
    MySQL,
    PostgreSQL,
}

impl DbType {
    /// 从连接字符串推断数据库类型，无法识别时按SQLite处理
    pub fn from_connection_string(s: &str) -> Self {
        let lower = s.to_lowercase();
        if lower.starts_with("mysql") {
            DbType::MySQL
        } else if lower.starts_with("postgres") {
            DbType::PostgreSQL
        } else {
            DbType::SQLite
        }
    }
}

/// 是否为SQLite内存数据库
pub fn is_sqlite_memory(s: &str) -> bool {
    DbType::from_connection_string(s) == DbType::SQLite && s.contains(":memory:")
}

/// 提取 SQLite 数据库文件路径
///
/// 如果连接字符串指向内存数据库或其他数据库类型，返回 None
pub fn extract_sqlite_path(connection_string: &str) -> Option<PathBuf> {
    if DbType::from_connection_string(connection_string) != DbType::SQLite
        || is_sqlite_memory(connection_string)
    {
        return None;
    }
    let rest = connection_string.strip_prefix("sqlite:")?;
    let path = rest.split('?').next().unwrap_or(rest);
    // `//` 之后的部分原样作为路径，与sqlx的解析一致
    let path = path.strip_prefix("//").unwrap_or(path);
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

/// 为文件型SQLite准备连接字符串
///
/// 创建数据库所在目录，并在未指定 `mode` 参数时追加 `mode=rwc`，
/// 使首次启动时自动创建数据库文件。其他数据库原样返回。
pub fn prepare_connection_string(connection_string: &str) -> Result<String> {
    let Some(path) = extract_sqlite_path(connection_string) else {
        return Ok(connection_string.to_string());
    };

    let full_path = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()?.join(path)
    };
    if let Some(parent) = full_path.parent() {
        if !parent.as_os_str().is_empty() && !Path::new(parent).exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    if connection_string.contains("mode=") {
        Ok(connection_string.to_string())
    } else if connection_string.contains('?') {
        Ok(format!("{}&mode=rwc", connection_string))
    } else {
        Ok(format!("{}?mode=rwc", connection_string))
    }
}
