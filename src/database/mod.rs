//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 数据库连接模块

pub mod connection_string;

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::utils::redaction::redact_connection_string;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use secrecy::ExposeSecret;
use std::time::Duration;
use tracing::{info, instrument};

pub use connection_string::{
    extract_sqlite_path, is_sqlite_memory, prepare_connection_string, DbType,
};

/// 按配置建立数据库连接
///
/// SQLite内存数据库每个连接都是独立的库，因此连接池固定为1个连接。
#[instrument(skip(config), level = "info")]
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    let url = prepare_connection_string(config.url.expose_secret())?;

    let mut opt = ConnectOptions::new(url.clone());
    if is_sqlite_memory(&url) {
        opt.max_connections(1).min_connections(1);
    } else {
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections);
    }
    opt.connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(config.sqlx_logging);

    let connection = Database::connect(opt).await?;
    info!(
        "Connected to {:?} database: {}",
        DbType::from_connection_string(&url),
        redact_connection_string(&url)
    );
    Ok(connection)
}
