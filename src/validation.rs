//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 候选人输入校验。
//!
//! 在调用 [`CandidateService::add_or_update`](crate::service::CandidateService::add_or_update)
//! 之前执行，服务本身不再重复检查。

use crate::error::{CandidateError, Result};
use crate::model::CandidateInput;
use lazy_static::lazy_static;
use regex::Regex;

/// 存储列的最大长度
pub const MAX_FIELD_LENGTH: usize = 256;
pub const MAX_PHONE_LENGTH: usize = 20;

lazy_static! {
    static ref PHONE_PATTERN: Regex =
        Regex::new(r"^[+]*[(]{0,1}[0-9]{1,4}[)]{0,1}[-\s\./0-9]*$").expect("valid phone regex");
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// `@` 恰好出现一次，且不在首尾
fn is_email(value: &str) -> bool {
    match (value.find('@'), value.rfind('@')) {
        (Some(first), Some(last)) => first == last && first > 0 && first < value.len() - 1,
        _ => false,
    }
}

fn is_absolute_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

fn check_length(errors: &mut Vec<String>, label: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.push(format!("{} cannot exceed {} characters", label, max));
    }
}

/// 校验输入，返回全部错误信息
pub fn validate(input: &CandidateInput) -> Result<()> {
    let mut errors = Vec::new();

    if is_blank(&input.first_name) {
        errors.push("First name is required".to_string());
    }
    check_length(&mut errors, "First name", &input.first_name, MAX_FIELD_LENGTH);

    if is_blank(&input.last_name) {
        errors.push("Last name is required".to_string());
    }
    check_length(&mut errors, "Last name", &input.last_name, MAX_FIELD_LENGTH);

    if is_blank(&input.email) {
        errors.push("Email is required".to_string());
    } else if !is_email(&input.email) {
        errors.push("A valid email address is required".to_string());
    }
    check_length(&mut errors, "Email", &input.email, MAX_FIELD_LENGTH);

    if let Some(phone) = input.phone_number.as_deref().filter(|p| !is_blank(p)) {
        if phone.chars().count() > MAX_PHONE_LENGTH {
            errors.push(format!(
                "Phone number cannot exceed {} characters",
                MAX_PHONE_LENGTH
            ));
        }
        if !PHONE_PATTERN.is_match(phone) {
            errors.push("Please enter a valid phone number".to_string());
        }
    }

    if is_blank(&input.comment) {
        errors.push("Comment is required".to_string());
    }
    check_length(&mut errors, "Comment", &input.comment, MAX_FIELD_LENGTH);

    for (label, value) in [
        ("LinkedIn", &input.linked_in_profile_url),
        ("GitHub", &input.github_profile_url),
    ] {
        if let Some(url) = value.as_deref().filter(|u| !is_blank(u)) {
            if !is_absolute_url(url) {
                errors.push(format!("Please enter a valid {} URL", label));
            }
            check_length(&mut errors, &format!("{} URL", label), url, MAX_FIELD_LENGTH);
        }
    }

    match (input.start_call_time, input.end_call_time) {
        (Some(_), None) => errors
            .push("End call time is required when start call time is provided".to_string()),
        (None, Some(_)) => errors
            .push("Start call time is required when end call time is provided".to_string()),
        (Some(start), Some(end)) if end <= start => {
            errors.push("End call time must be later than start call time".to_string())
        }
        _ => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(CandidateError::Validation(errors))
    }
}
