//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! SeaORM SQLite仓储测试

#[path = "../common/mod.rs"]
mod common;

use candidate_cache::config::{Config, DatabaseConfig};
use candidate_cache::error::CandidateError;
use candidate_cache::manager::ServiceManager;
use candidate_cache::model::{CandidateId, NewCandidate};
use candidate_cache::repository::{CandidateRepository, SeaOrmCandidateRepository};
use common::{minimal_input, sample_input, setup_logging};
use secrecy::SecretString;
use std::sync::Arc;

fn sqlite_config(url: &str) -> DatabaseConfig {
    DatabaseConfig {
        url: SecretString::new(url.into()),
        ..Default::default()
    }
}

async fn memory_repository() -> SeaOrmCandidateRepository {
    setup_logging();
    SeaOrmCandidateRepository::connect(&sqlite_config("sqlite::memory:"))
        .await
        .expect("Failed to open in-memory SQLite")
}

mod repository_tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_then_find_case_insensitive() {
        let repo = memory_repository().await;

        let created = repo
            .insert(NewCandidate::from_input(&sample_input("John.Doe@Example.com")))
            .await
            .unwrap();
        assert_eq!(created.email(), "john.doe@example.com");

        let found = repo
            .find_by_normalized_email("JOHN.DOE@example.COM")
            .await
            .unwrap()
            .expect("candidate should exist");
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repo = memory_repository().await;
        let found = repo
            .find_by_normalized_email("nobody@test.com")
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_conflict() {
        let repo = memory_repository().await;

        repo.insert(NewCandidate::from_input(&sample_input("dup@test.com")))
            .await
            .unwrap();
        let err = repo
            .insert(NewCandidate::from_input(&sample_input("DUP@test.com")))
            .await
            .unwrap_err();

        assert!(err.is_conflict(), "unexpected error: {:?}", err);
    }

    #[tokio::test]
    async fn test_replace_persists_profile_changes() {
        let repo = memory_repository().await;

        let mut record = repo
            .insert(NewCandidate::from_input(&sample_input("john_doe@test.com")))
            .await
            .unwrap();

        record.apply(&minimal_input("John_Doe@Test.com", "Jon"));
        repo.replace(&record).await.unwrap();

        let stored = repo
            .find_by_normalized_email("john_doe@test.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.id(), record.id());
        assert_eq!(stored.email(), "john_doe@test.com");
        assert_eq!(stored.first_name, "Jon");
        assert_eq!(stored.phone_number, None);
        assert_eq!(stored.start_call_time, None);
        assert_eq!(stored.github_profile_url, None);
    }

    #[tokio::test]
    async fn test_replace_unknown_id_is_not_found() {
        let repo = memory_repository().await;

        let ghost = NewCandidate::from_input(&sample_input("ghost@test.com"))
            .into_record(CandidateId(404));
        let err = repo.replace(&ghost).await.unwrap_err();

        assert!(
            matches!(err, CandidateError::NotFound(CandidateId(404))),
            "unexpected error: {:?}",
            err
        );
    }

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let repo = memory_repository().await;
        repo.ensure_schema().await.unwrap();
        repo.ensure_schema().await.unwrap();
    }
}

mod file_database_tests {
    use super::*;

    #[tokio::test]
    async fn test_file_database_survives_reconnect() {
        setup_logging();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("candidates.db");
        let url = format!("sqlite:{}", path.display());

        let created = {
            let repo = SeaOrmCandidateRepository::connect(&sqlite_config(&url))
                .await
                .unwrap();
            repo.insert(NewCandidate::from_input(&sample_input("persist@test.com")))
                .await
                .unwrap()
        };
        assert!(path.exists());

        let repo = SeaOrmCandidateRepository::connect(&sqlite_config(&url))
            .await
            .unwrap();
        let found = repo
            .find_by_normalized_email("persist@test.com")
            .await
            .unwrap();
        assert_eq!(found, Some(created));
    }
}

mod service_tests {
    use super::*;

    #[tokio::test]
    async fn test_service_upsert_against_sqlite() {
        let repo: Arc<dyn CandidateRepository> = Arc::new(memory_repository().await);
        let manager = ServiceManager::with_repository(Config::default(), repo.clone());

        let created = manager
            .service()
            .add_or_update(&minimal_input("John.Doe@Example.com", "John"))
            .await
            .unwrap();
        let updated = manager
            .service()
            .add_or_update(&minimal_input("JOHN.DOE@EXAMPLE.COM", "Jon"))
            .await
            .unwrap();

        assert_eq!(updated.id(), created.id());
        assert_eq!(updated.email(), "john.doe@example.com");

        let stored = repo
            .find_by_normalized_email("john.doe@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.first_name, "Jon");
    }

    #[tokio::test]
    async fn test_manager_init_with_memory_database() {
        setup_logging();
        let config = Config::from_toml_str(
            r#"
            [global]
            service_name = "sqlite_manager_test"

            [database]
            url = "sqlite::memory:"
            "#,
        )
        .unwrap();

        let manager = ServiceManager::init(config).await.unwrap();
        let record = manager
            .service()
            .add_or_update(&sample_input("init@test.com"))
            .await
            .unwrap();

        let stored = manager
            .repository()
            .find_by_normalized_email("init@test.com")
            .await
            .unwrap();
        assert_eq!(stored, Some(record));
    }
}
