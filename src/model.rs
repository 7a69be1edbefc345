//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了候选人记录的领域模型。
//!
//! 邮箱在创建时统一转为小写，之后不可修改；所有按邮箱的查找
//! 以及缓存键的构造都先经过 [`normalize_email`]。

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 缓存键前缀
pub const CACHE_KEY_PREFIX: &str = "candidate";

/// 候选人标识，由持久化存储在首次插入时分配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub i32);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 规范化邮箱（转为小写）
pub fn normalize_email(email: &str) -> String {
    email.to_lowercase()
}

/// 构造缓存键：`candidate:<规范化邮箱>`
pub fn cache_key(email: &str) -> String {
    format!("{}:{}", CACHE_KEY_PREFIX, normalize_email(email))
}

/// 已通过校验的候选人输入
///
/// 核心流程信任调用方已经完成字段校验，不会再次检查。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub start_call_time: Option<NaiveTime>,
    pub end_call_time: Option<NaiveTime>,
    pub linked_in_profile_url: Option<String>,
    pub github_profile_url: Option<String>,
    pub comment: String,
}

/// 尚未持久化的候选人
///
/// 只能通过 [`NewCandidate::from_input`] 构造，保证邮箱已规范化。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCandidate {
    pub(crate) email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub start_call_time: Option<NaiveTime>,
    pub end_call_time: Option<NaiveTime>,
    pub linked_in_profile_url: Option<String>,
    pub github_profile_url: Option<String>,
    pub comment: String,
}

impl NewCandidate {
    /// 从输入创建新的候选人，邮箱转为小写，其余字段原样复制
    pub fn from_input(input: &CandidateInput) -> Self {
        Self {
            email: normalize_email(&input.email),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            phone_number: input.phone_number.clone(),
            start_call_time: input.start_call_time,
            end_call_time: input.end_call_time,
            linked_in_profile_url: input.linked_in_profile_url.clone(),
            github_profile_url: input.github_profile_url.clone(),
            comment: input.comment.clone(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// 分配标识，转换为已持久化的记录
    pub fn into_record(self, id: CandidateId) -> CandidateRecord {
        CandidateRecord {
            id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: self.phone_number,
            start_call_time: self.start_call_time,
            end_call_time: self.end_call_time,
            linked_in_profile_url: self.linked_in_profile_url,
            github_profile_url: self.github_profile_url,
            comment: self.comment,
        }
    }
}

/// 候选人记录
///
/// `id` 与 `email` 在记录生命周期内保持不变，
/// 资料字段只能通过 [`CandidateRecord::apply`] 整体更新。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub(crate) id: CandidateId,
    pub(crate) email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub start_call_time: Option<NaiveTime>,
    pub end_call_time: Option<NaiveTime>,
    pub linked_in_profile_url: Option<String>,
    pub github_profile_url: Option<String>,
    pub comment: String,
}

impl CandidateRecord {
    pub fn id(&self) -> CandidateId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// 用输入覆盖全部可变字段
    ///
    /// 不会修改 `id` 和 `email`，即使输入中的邮箱大小写不同。
    pub fn apply(&mut self, input: &CandidateInput) {
        self.first_name = input.first_name.clone();
        self.last_name = input.last_name.clone();
        self.phone_number = input.phone_number.clone();
        self.start_call_time = input.start_call_time;
        self.end_call_time = input.end_call_time;
        self.linked_in_profile_url = input.linked_in_profile_url.clone();
        self.github_profile_url = input.github_profile_url.clone();
        self.comment = input.comment.clone();
    }
}
