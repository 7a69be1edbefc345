//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了缓存值的序列化机制。
//!
//! 缓存值统一使用JSON，按配置决定是否gzip压缩。

pub mod json;

pub use json::JsonSerializer;
