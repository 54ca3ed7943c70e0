//! UserStore tests against SeaORM's mock connection.
//!
//! These exercise the real row mapping and the service orchestration
//! without a running PostgreSQL.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, MockExecResult};

use common::{AppError, StorageError};
use domain::{CredentialError, CredentialHasher, HasAuditTimestamps, HashingCost, User};
use user_service_lib::repository::entities::user;
use user_service_lib::repository::{UserGateway, UserStore, SELECT_ALL_USERS, SELECT_USER_BY_ID};
use user_service_lib::service::{UserManager, UserService};

fn cheap_hasher() -> CredentialHasher {
    CredentialHasher::new(HashingCost {
        memory_kib: 64,
        iterations: 1,
        parallelism: 1,
    })
}

fn row(id: i64, email: &str, created_at: DateTime<Utc>) -> user::Model {
    user::Model {
        id,
        name: format!("User {id}"),
        email: email.to_string(),
        hashed_password: String::new(),
        created_at,
        updated_at: created_at,
    }
}

fn mock_db(mock: MockDatabase) -> Arc<DatabaseConnection> {
    Arc::new(mock.into_connection())
}

fn service(db: &Arc<DatabaseConnection>) -> UserManager {
    UserManager::with_hasher(Arc::new(UserStore::new(Arc::clone(db))), cheap_hasher())
}

/// Statements the mock connection saw. Every other handle must be dropped.
fn transaction_log(db: Arc<DatabaseConnection>) -> String {
    let db = Arc::try_unwrap(db).expect("connection still shared");
    format!("{:?}", db.into_transaction_log())
}

#[tokio::test]
async fn test_select_one_maps_row() {
    let created = Utc::now() - Duration::days(1);
    let db = mock_db(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(4, "four@example.com", created)]]),
    );

    let store = UserStore::new(db);
    let user = store
        .select_one(SELECT_USER_BY_ID, vec![4i64.into()])
        .await
        .unwrap();

    assert_eq!(user.id, Some(4));
    assert_eq!(user.email, "four@example.com");
    assert_eq!(user.created_at(), Some(created));
    assert!(!user.has_credential());
}

#[tokio::test]
async fn test_store_shares_connection_handle() {
    let db = mock_db(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(9, "nine@example.com", Utc::now())]]),
    );

    let users = service(&db);
    assert_eq!(Arc::strong_count(&db), 2);

    let user = users.find_by_id(9).await.unwrap();
    assert_eq!(user.id, Some(9));

    drop(users);
    assert!(transaction_log(db).contains("WHERE id = $1"));
}

#[tokio::test]
async fn test_select_one_no_rows_is_not_found() {
    let db = mock_db(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()]),
    );

    let store = UserStore::new(db);
    let result = store.select_one(SELECT_USER_BY_ID, vec![404i64.into()]).await;

    assert!(matches!(result, Err(StorageError::NotFound)));
}

#[tokio::test]
async fn test_select_one_backend_failure() {
    let db = mock_db(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())]),
    );

    let store = UserStore::new(db);
    let result = store.select_one(SELECT_USER_BY_ID, vec![1i64.into()]).await;

    assert!(matches!(result, Err(StorageError::Database(_))));
}

#[tokio::test]
async fn test_get_by_id_missing_leaves_target() {
    let db = mock_db(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()]),
    );

    let mut target = User::new("Kept", "kept@example.com");
    let before = target.clone();
    let result = service(&db).get_by_id(&mut target, 12345).await;

    assert!(matches!(
        result,
        Err(AppError::Storage(StorageError::NotFound))
    ));
    assert_eq!(target, before);
}

#[tokio::test]
async fn test_insert_stores_normalized_email_and_hash_only() {
    let now = Utc::now();
    let db = mock_db(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(15, "user@example.com", now)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 15,
                rows_affected: 1,
            }]),
    );

    let mut user = User::new("Mixed Case", "User@Example.COM");
    service(&db)
        .insert(&mut user, "SecurePass123!")
        .await
        .unwrap();

    assert_eq!(user.id, Some(15));
    assert_eq!(user.email, "user@example.com");
    assert!(user.check_password("SecurePass123!").is_ok());

    let log = transaction_log(db);
    assert!(log.contains("INSERT INTO"));
    assert!(log.contains("user@example.com"));
    assert!(!log.contains("User@Example.COM"));
    assert!(!log.contains("SecurePass123!"));
}

#[tokio::test]
async fn test_insert_without_password_then_check_is_malformed() {
    let now = Utc::now();
    let db = mock_db(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(2, "nopass@example.com", now)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 2,
                rows_affected: 1,
            }]),
    );

    let mut user = User::new("No Password", "nopass@example.com");
    service(&db).insert(&mut user, "").await.unwrap();

    assert!(user.hashed_password.is_empty());
    assert!(matches!(
        user.check_password("guess"),
        Err(CredentialError::MalformedHash(_))
    ));
}

#[tokio::test]
async fn test_list_all_orders_newest_first() {
    let t1 = Utc::now() - Duration::hours(3);
    let t2 = Utc::now() - Duration::hours(2);
    let t3 = Utc::now() - Duration::hours(1);
    let db = mock_db(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                row(3, "three@example.com", t3),
                row(2, "two@example.com", t2),
                row(1, "one@example.com", t1),
            ]]),
    );

    let users = service(&db).list_all().await.unwrap();

    let created: Vec<_> = users.iter().filter_map(|u| u.created_at()).collect();
    assert_eq!(created, vec![t3, t2, t1]);

    let log = transaction_log(db);
    assert!(log.contains("ORDER BY created_at DESC"));
    assert!(SELECT_ALL_USERS.ends_with("ORDER BY created_at DESC"));
}

#[tokio::test]
async fn test_list_all_failure_is_returned() {
    let db = mock_db(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("relation \"users\" does not exist".to_string())]),
    );

    let result = service(&db).list_all().await;

    let err = result.unwrap_err();
    assert_eq!(err.code(), "DATABASE_ERROR");
    assert_eq!(err.user_message(), "A database error occurred");
}
