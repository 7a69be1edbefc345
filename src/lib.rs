//! candidate-cache - 带缓存旁路的候选人新增或更新服务
//!
//! 以规范化邮箱为自然键，先查进程内缓存，未命中再查持久化仓储，
//! 然后插入或整体替换记录，并以固定有效期刷新缓存。

pub use serde;
pub use serde::{Deserialize, Serialize};
pub use serde_json;
pub use tokio;

pub mod backend;
pub mod cache;
pub mod cli;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod manager;
pub mod metrics;
pub mod model;
pub mod repository;
pub mod serialization;
pub mod service;
pub mod telemetry;
pub mod utils;
pub mod validation;

// Re-export commonly used items
pub use cache::{CacheExt, CacheOps, MemoryCache};
pub use config::Config;
pub use error::{CandidateError, Result};
pub use manager::ServiceManager;
pub use model::{CandidateId, CandidateInput, CandidateRecord, NewCandidate};
pub use repository::{CandidateRepository, InMemoryCandidateRepository, SeaOrmCandidateRepository};
pub use service::CandidateService;

/// candidate-cache 版本号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
