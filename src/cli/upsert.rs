//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了单条新增或更新命令的实现。

use super::{parse_request, read_input, user_facing, UpsertArgs};
use crate::dto::CandidateResponse;
use crate::manager::ServiceManager;
use crate::model::CandidateInput;
use crate::validation::validate;
use anyhow::Result;

pub async fn execute(manager: &ServiceManager, args: &UpsertArgs) -> Result<()> {
    let body = read_input(&args.input).await?;
    let input = CandidateInput::from(parse_request(&body)?);
    validate(&input).map_err(user_facing)?;

    let record = manager
        .service()
        .add_or_update(&input)
        .await
        .map_err(user_facing)?;

    println!(
        "{}",
        serde_json::to_string_pretty(&CandidateResponse::from(&record))?
    );
    Ok(())
}
