//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 传输层的请求与响应结构。
//!
//! 时间字段使用 `HH:mm` 格式；响应中缺失的字段输出为 `null`。

use crate::model::{CandidateId, CandidateInput, CandidateRecord};
use serde::{Deserialize, Serialize};

/// `HH:mm` 格式的可选时间
pub mod hh_mm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(value: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => s.serialize_str(&time.format(FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    /// 空字符串与 `null` 均视为缺失
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let value: Option<String> = Option::deserialize(d)?;
        match value.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => NaiveTime::parse_from_str(raw, FORMAT).map(Some).map_err(|_| {
                de::Error::custom(format!(
                    "Unable to convert \"{}\" to a time of day. Expected format is HH:mm.",
                    raw
                ))
            }),
        }
    }
}

/// 新增或更新请求
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    #[serde(with = "hh_mm")]
    pub start_call_time: Option<chrono::NaiveTime>,
    #[serde(with = "hh_mm")]
    pub end_call_time: Option<chrono::NaiveTime>,
    pub linked_in_profile_url: Option<String>,
    #[serde(rename = "gitHubProfileUrl", alias = "githubProfileUrl")]
    pub github_profile_url: Option<String>,
    pub comment: String,
}

// 空白的可选字符串按缺失处理
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<CandidateRequest> for CandidateInput {
    fn from(request: CandidateRequest) -> Self {
        CandidateInput {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone_number: non_blank(request.phone_number),
            start_call_time: request.start_call_time,
            end_call_time: request.end_call_time,
            linked_in_profile_url: non_blank(request.linked_in_profile_url),
            github_profile_url: non_blank(request.github_profile_url),
            comment: request.comment,
        }
    }
}

/// 返回给调用方的候选人
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResponse {
    pub id: CandidateId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    #[serde(with = "hh_mm")]
    pub start_call_time: Option<chrono::NaiveTime>,
    #[serde(with = "hh_mm")]
    pub end_call_time: Option<chrono::NaiveTime>,
    pub linked_in_profile_url: Option<String>,
    pub github_profile_url: Option<String>,
    pub comment: String,
}

impl From<&CandidateRecord> for CandidateResponse {
    fn from(record: &CandidateRecord) -> Self {
        Self {
            id: record.id(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email().to_string(),
            phone_number: record.phone_number.clone(),
            start_call_time: record.start_call_time,
            end_call_time: record.end_call_time,
            linked_in_profile_url: record.linked_in_profile_url.clone(),
            github_profile_url: record.github_profile_url.clone(),
            comment: record.comment.clone(),
        }
    }
}
