//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了服务的配置结构和解析逻辑。

use crate::error::{CandidateError, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_VERSION: u32 = 1;

/// 缓存条目默认有效期：10分钟
pub const DEFAULT_CACHE_TTL_SECS: u64 = 600;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub config_version: Option<u32>,
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// 全局配置
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct GlobalConfig {
    /// 服务名称，用于日志与指标标签
    pub service_name: String,
    /// 日志过滤指令（`RUST_LOG` 语法），环境变量优先
    pub log_level: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            service_name: "candidates".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// 缓存配置
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct CacheConfig {
    /// 缓存过期时间（秒）
    pub ttl_secs: u64,
    /// 最大条目数
    pub max_capacity: u64,
    /// 是否压缩缓存值
    pub compress: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_CACHE_TTL_SECS,
            max_capacity: 10_000,
            compress: false,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// 数据库配置
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct DatabaseConfig {
    /// 连接字符串（sqlite / postgres / mysql）
    pub url: SecretString,
    /// 连接池最大连接数
    pub max_connections: u32,
    /// 连接池最小连接数
    pub min_connections: u32,
    /// 连接超时时间（秒）
    pub connect_timeout_secs: u64,
    /// 是否输出sqlx语句日志
    pub sqlx_logging: bool,
    /// 启动时若表不存在则创建
    pub create_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: SecretString::new("sqlite:./data/candidates.db".into()),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 30,
            sqlx_logging: false,
            create_schema: true,
        }
    }
}

impl Config {
    /// 从TOML字符串解析配置并校验
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| CandidateError::ConfigError(e.to_string()))?;
        config.validate().map_err(CandidateError::ConfigError)?;
        Ok(config)
    }

    /// 从TOML文件加载配置
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// 验证配置
    ///
    /// 检查配置的有效性，确保所有值在合理范围内
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Some(version) = self.config_version {
            if version > CONFIG_VERSION {
                return Err(format!(
                    "Configuration version {} is not supported. Current version is {}.",
                    version, CONFIG_VERSION
                ));
            }
        }

        if self.global.service_name.is_empty() {
            return Err("Service name cannot be empty".to_string());
        }

        if self.global.service_name.contains(':') {
            return Err(format!(
                "Service name '{}' cannot contain ':'",
                self.global.service_name
            ));
        }

        if self.cache.ttl_secs == 0 {
            return Err("Cache ttl_secs cannot be zero".to_string());
        }

        if self.cache.ttl_secs > 86400 * 30 {
            return Err("Cache ttl_secs cannot exceed 30 days (2592000 seconds)".to_string());
        }

        if self.cache.max_capacity == 0 {
            return Err("Cache max_capacity cannot be zero".to_string());
        }

        if self.cache.max_capacity > 10_000_000 {
            return Err("Cache max_capacity cannot exceed 10,000,000".to_string());
        }

        if self.database.url.expose_secret().trim().is_empty() {
            return Err("Database url cannot be empty".to_string());
        }

        if self.database.max_connections == 0 {
            return Err("Database max_connections cannot be zero".to_string());
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(format!(
                "Database min_connections ({}) must be <= max_connections ({})",
                self.database.min_connections, self.database.max_connections
            ));
        }

        if !(1..=300).contains(&self.database.connect_timeout_secs) {
            return Err("Database connect_timeout_secs must be between 1 and 300".to_string());
        }

        Ok(())
    }
}
