//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了JSON序列化器的实现。

use crate::error::{CandidateError, Result};
use serde::{de::DeserializeOwned, Serialize};

/// JSON序列化器
///
/// 基于serde_json，可选gzip压缩（需要启用 `flate2` 特性）
#[derive(Clone, Debug, Default)]
pub struct JsonSerializer {
    compress: bool,
}

impl JsonSerializer {
    pub fn new() -> Self {
        Self { compress: false }
    }

    /// 创建启用压缩的JSON序列化器
    pub fn with_compression() -> Self {
        Self { compress: true }
    }

    /// 按配置选择是否压缩
    pub fn from_compression(compress: bool) -> Self {
        Self { compress }
    }

    pub fn is_compressed(&self) -> bool {
        self.compress
    }

    /// 序列化值为字节数组
    pub fn serialize<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        let json_bytes =
            serde_json::to_vec(value).map_err(|e| CandidateError::Serialization(e.to_string()))?;
        if self.compress {
            gzip(&json_bytes)
        } else {
            Ok(json_bytes)
        }
    }

    /// 从字节数组反序列化值
    pub fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        let result = if self.compress {
            serde_json::from_slice(&gunzip(data)?)
        } else {
            serde_json::from_slice(data)
        };
        result.map_err(|e| CandidateError::Serialization(e.to_string()))
    }
}

#[cfg(feature = "flate2")]
fn gzip(data: &[u8]) -> Result<Vec<u8>> {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
    encoder
        .write_all(data)
        .map_err(|e| CandidateError::Serialization(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| CandidateError::Serialization(e.to_string()))
}

#[cfg(feature = "flate2")]
fn gunzip(data: &[u8]) -> Result<Vec<u8>> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoded = Vec::new();
    GzDecoder::new(data)
        .read_to_end(&mut decoded)
        .map_err(|e| CandidateError::Serialization(e.to_string()))?;
    Ok(decoded)
}

// 未启用flate2时压缩选项不生效，数据原样保存
#[cfg(not(feature = "flate2"))]
fn gzip(data: &[u8]) -> Result<Vec<u8>> {
    Ok(data.to_vec())
}

#[cfg(not(feature = "flate2"))]
fn gunzip(data: &[u8]) -> Result<Vec<u8>> {
    Ok(data.to_vec())
}
