//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了候选人查询命令的实现。

use super::{user_facing, ShowArgs};
use crate::dto::CandidateResponse;
use crate::manager::ServiceManager;
use crate::model::normalize_email;
use anyhow::{bail, Result};

pub async fn execute(manager: &ServiceManager, args: &ShowArgs) -> Result<()> {
    let email = normalize_email(&args.email);
    match manager
        .repository()
        .find_by_normalized_email(&email)
        .await
        .map_err(user_facing)?
    {
        Some(record) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&CandidateResponse::from(&record))?
            );
            Ok(())
        }
        None => bail!("No candidate found for {}", email),
    }
}
