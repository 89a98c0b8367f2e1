//! Integration tests for MySqlUserRepository.
//!
//! These run against a real MySQL database using testcontainers and need
//! Docker: `cargo test -p larder-repository -- --ignored`.

mod common;

use common::TestDatabase;
use larder_core::{HealthCheck, LarderError, User, UserId};
use larder_repository::{MySqlUserRepository, UserRepository};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_insert_assigns_id_and_find_returns_it() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let saved = repo.save(&User::new("Alice")).await.expect("Failed to save user");
    let id = saved.id.expect("Store must assign an id");
    assert_eq!(saved.name, "Alice");

    let found = repo.find_by_id(id).await.expect("Query failed");
    assert_eq!(found, Some(User::with_id(id, "Alice")));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_missing_returns_none() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let found = repo.find_by_id(UserId::new(4242)).await.expect("Query failed");
    assert!(found.is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_replace_existing() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let id = repo.save(&User::new("Alice")).await.unwrap().id.unwrap();
    let replaced = repo.save(&User::with_id(id, "Bob")).await.expect("Replace failed");
    assert_eq!(replaced, User::with_id(id, "Bob"));

    // Same name again: MySQL reports zero changed rows but the row exists.
    let unchanged = repo.save(&User::with_id(id, "Bob")).await.expect("Replace failed");
    assert_eq!(unchanged, User::with_id(id, "Bob"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_replace_missing_is_not_found() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let err = repo
        .save(&User::with_id(UserId::new(4242), "Ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, LarderError::NotFound { .. }));
    assert!(repo.find_by_id(UserId::new(4242)).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_then_delete_again() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let id = repo.save(&User::new("Alice")).await.unwrap().id.unwrap();
    repo.delete_by_id(id).await.expect("Delete failed");
    repo.delete_by_id(id).await.expect("Deleting a missing row must succeed");

    assert!(repo.find_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_pool_health_check() {
    let db = TestDatabase::new().await;
    let status = db.pool().check().await;
    assert!(status.is_healthy());
}
