//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了候选人服务的错误类型和处理机制。

use crate::model::CandidateId;
use thiserror::Error;

/// 候选人服务错误类型枚举
///
/// 核心流程不做任何本地恢复，仓储与缓存的错误原样向上传递，
/// 由调用方（CLI 或传输层）映射为对外的失败响应。
#[derive(Error, Debug)]
pub enum CandidateError {
    /// 输入校验失败（在进入核心之前拒绝）
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// 唯一约束冲突（同一规范化邮箱已存在）
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 按标识替换时记录不存在
    #[error("Candidate {0} not found")]
    NotFound(CandidateId),

    /// Sea-ORM数据库错误
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// 缓存操作失败
    #[error("Cache operation failed: {0}")]
    Cache(String),

    /// 配置错误
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO错误
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CandidateError {
    /// 是否为唯一约束冲突
    pub fn is_conflict(&self) -> bool {
        matches!(self, CandidateError::Conflict(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CandidateError::NotFound(_))
    }
}

/// 服务操作结果类型别名
pub type Result<T> = std::result::Result<T, CandidateError>;
