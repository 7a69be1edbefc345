//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了CLI命令行接口。

use crate::config::Config;
use crate::dto::CandidateRequest;
use crate::error::CandidateError;
use crate::manager::ServiceManager;
use crate::repository::InMemoryCandidateRepository;
use crate::telemetry::init_tracing;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::error;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "candidate-cache")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Path to the TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Keep candidates in process memory instead of the configured database"
    )]
    pub in_memory: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(name = "upsert", about = "Create or update one candidate from a JSON request")]
    Upsert(UpsertArgs),

    #[command(name = "import", about = "Upsert a JSON array of candidates concurrently")]
    Import(ImportArgs),

    #[command(name = "show", about = "Print the stored candidate for an email")]
    Show(ShowArgs),
}

#[derive(Parser, Debug)]
pub struct UpsertArgs {
    #[arg(short, long, default_value = "-", help = "Request file, '-' reads stdin")]
    pub input: String,
}

#[derive(Parser, Debug)]
pub struct ImportArgs {
    #[arg(short, long, help = "File containing a JSON array of requests")]
    pub file: PathBuf,

    #[arg(short = 'j', long, default_value_t = 8, help = "Maximum concurrent upserts")]
    pub concurrency: usize,

    #[arg(short, long, help = "Print metrics after the import")]
    pub metrics: bool,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    #[arg(short, long, help = "Candidate email, matched case-insensitively")]
    pub email: String,
}

mod import;
mod show;
mod upsert;

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    init_tracing(&config.global.service_name, &config.global.log_level);

    let manager = if cli.in_memory {
        config
            .validate()
            .map_err(CandidateError::ConfigError)
            .context("Invalid configuration")?;
        ServiceManager::with_repository(config, Arc::new(InMemoryCandidateRepository::new()))
    } else {
        ServiceManager::init(config)
            .await
            .context("Failed to initialize candidate storage")?
    };

    match &cli.command {
        Commands::Upsert(args) => upsert::execute(&manager, args).await,
        Commands::Import(args) => import::execute(&manager, args).await,
        Commands::Show(args) => show::execute(&manager, args).await,
    }
}

/// 读取请求文本，`-` 表示标准输入
pub(crate) async fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buffer)
            .await
            .context("Failed to read request from stdin")?;
        Ok(buffer)
    } else {
        read_file(Path::new(source)).await
    }
}

pub(crate) async fn read_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

pub(crate) fn parse_request(body: &str) -> Result<CandidateRequest> {
    serde_json::from_str(body).context("Request body is not a valid candidate")
}

/// 将失败转换为面向用户的信息
///
/// 校验错误原样展示；其他错误完整记录到日志，用户只看到关联标识。
pub(crate) fn user_facing(err: CandidateError) -> anyhow::Error {
    match err {
        CandidateError::Validation(messages) => {
            anyhow::anyhow!("Validation failed:\n  {}", messages.join("\n  "))
        }
        other => {
            let correlation_id = Uuid::new_v4();
            error!(%correlation_id, error = ?other, "candidate request failed");
            anyhow::anyhow!(
                "An unexpected error occurred. Reference: {}",
                correlation_id
            )
        }
    }
}
