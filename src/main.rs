//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块是候选人服务的命令行入口。

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    candidate_cache::cli::run().await
}
