//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了基于SeaORM的持久化仓储。

use super::entity::{ActiveModel, Column, Entity};
use super::CandidateRepository;
use crate::config::DatabaseConfig;
use crate::database;
use crate::error::{CandidateError, Result};
use crate::model::{normalize_email, CandidateRecord, NewCandidate};
use crate::utils::redaction::RedactedEmail;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Schema,
    SqlErr,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// SeaORM仓储
///
/// 邮箱列上有唯一索引，并发插入冲突由数据库判定。
#[derive(Clone, Debug)]
pub struct SeaOrmCandidateRepository {
    connection: Arc<DatabaseConnection>,
}

impl SeaOrmCandidateRepository {
    pub fn new(connection: DatabaseConnection) -> Self {
        Self {
            connection: Arc::new(connection),
        }
    }

    /// 按配置连接数据库，必要时创建表
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let repository = Self::new(database::connect(config).await?);
        if config.create_schema {
            repository.ensure_schema().await?;
        }
        Ok(repository)
    }

    /// 若 `candidates` 表不存在则按实体定义创建
    #[instrument(skip(self), level = "info")]
    pub async fn ensure_schema(&self) -> Result<()> {
        let backend = self.connection.get_database_backend();
        let schema = Schema::new(backend);
        let mut statement = schema.create_table_from_entity(Entity);
        statement.if_not_exists();
        self.connection.execute(backend.build(&statement)).await?;
        info!("candidates table is ready");
        Ok(())
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }
}

/// 将唯一约束冲突映射为 `Conflict`，其余错误保持原样
fn map_write_error(err: DbErr) -> CandidateError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => CandidateError::Conflict(detail),
        _ => CandidateError::Database(err),
    }
}

#[async_trait]
impl CandidateRepository for SeaOrmCandidateRepository {
    #[instrument(skip(self, email), level = "debug", fields(email = %RedactedEmail(email)))]
    async fn find_by_normalized_email(&self, email: &str) -> Result<Option<CandidateRecord>> {
        let model = Entity::find()
            .filter(Column::Email.eq(normalize_email(email)))
            .one(self.connection.as_ref())
            .await?;
        debug!("sea repository find: found={}", model.is_some());
        Ok(model.map(CandidateRecord::from))
    }

    #[instrument(skip(self, candidate), level = "debug", fields(email = %RedactedEmail(candidate.email())))]
    async fn insert(&self, candidate: NewCandidate) -> Result<CandidateRecord> {
        let active = ActiveModel {
            id: NotSet,
            email: Set(candidate.email),
            first_name: Set(candidate.first_name),
            last_name: Set(candidate.last_name),
            phone_number: Set(candidate.phone_number),
            start_call_time: Set(candidate.start_call_time),
            end_call_time: Set(candidate.end_call_time),
            linked_in_profile_url: Set(candidate.linked_in_profile_url),
            github_profile_url: Set(candidate.github_profile_url),
            comment: Set(candidate.comment),
        };
        let model = active
            .insert(self.connection.as_ref())
            .await
            .map_err(|e| {
                warn!("sea repository insert failed: {}", e);
                map_write_error(e)
            })?;
        debug!("sea repository insert: id={}", model.id);
        Ok(model.into())
    }

    #[instrument(skip(self, candidate), level = "debug", fields(id = %candidate.id()))]
    async fn replace(&self, candidate: &CandidateRecord) -> Result<()> {
        // 邮箱不在更新列中
        let active = ActiveModel {
            id: Unchanged(candidate.id().0),
            email: NotSet,
            first_name: Set(candidate.first_name.clone()),
            last_name: Set(candidate.last_name.clone()),
            phone_number: Set(candidate.phone_number.clone()),
            start_call_time: Set(candidate.start_call_time),
            end_call_time: Set(candidate.end_call_time),
            linked_in_profile_url: Set(candidate.linked_in_profile_url.clone()),
            github_profile_url: Set(candidate.github_profile_url.clone()),
            comment: Set(candidate.comment.clone()),
        };
        match active.update(self.connection.as_ref()).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => {
                Err(CandidateError::NotFound(candidate.id()))
            }
            Err(e) => Err(map_write_error(e)),
        }
    }
}
