//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了候选人持久化仓储的接口和实现。

pub mod entity;
pub mod memory;
pub mod sea;

use crate::error::Result;
use crate::model::{CandidateRecord, NewCandidate};
use async_trait::async_trait;

pub use memory::InMemoryCandidateRepository;
pub use sea::SeaOrmCandidateRepository;

/// 候选人仓储特征
///
/// 以规范化邮箱为自然键。唯一性由存储自身保证：
/// 并发插入同一邮箱时只有一个成功，其余返回 `CandidateError::Conflict`。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    /// 按邮箱查找，参数在查找前会被转为小写
    async fn find_by_normalized_email(&self, email: &str) -> Result<Option<CandidateRecord>>;

    /// 插入新记录并分配标识
    ///
    /// 邮箱已存在时返回 `CandidateError::Conflict`
    async fn insert(&self, candidate: NewCandidate) -> Result<CandidateRecord>;

    /// 按标识整体替换记录的可变字段
    ///
    /// 标识不存在时返回 `CandidateError::NotFound`
    async fn replace(&self, candidate: &CandidateRecord) -> Result<()>;
}
