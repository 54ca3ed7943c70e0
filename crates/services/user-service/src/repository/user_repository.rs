//! Persistence gateway for user rows.
//!
//! The gateway executes parameterized queries and maps rows through the
//! entity's explicit `Model -> User` conversion. Callers supply the query and
//! positional parameters; binding is left to the driver.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Statement, Value};

use super::entities::user::{self, Entity as UserEntity};
use common::{OptionExt, StorageResult};
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Single-row lookup by surrogate key
pub const SELECT_USER_BY_ID: &str = "SELECT id, name, email, hashed_password, created_at, updated_at \
     FROM users WHERE id = $1";

/// Every row, newest first
pub const SELECT_ALL_USERS: &str = "SELECT id, name, email, hashed_password, created_at, updated_at \
     FROM users ORDER BY created_at DESC";

/// Persistence gateway trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserGateway: Send + Sync {
    /// Map a single-row result. `StorageError::NotFound` when no row matches.
    async fn select_one(&self, query: &str, params: Vec<Value>) -> StorageResult<User>;

    /// Map a multi-row result, preserving the query's order.
    async fn select_many(&self, query: &str, params: Vec<Value>) -> StorageResult<Vec<User>>;

    /// Persist a new row and return the store-generated key.
    async fn insert_row(&self, user: &User) -> StorageResult<i64>;
}

/// SeaORM implementation of UserGateway
pub struct UserStore {
    db: Arc<DatabaseConnection>,
}

impl UserStore {
    /// Create new gateway over an open connection
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn statement(&self, query: &str, params: Vec<Value>) -> Statement {
        Statement::from_sql_and_values(self.db.get_database_backend(), query, params)
    }
}

#[async_trait]
impl UserGateway for UserStore {
    async fn select_one(&self, query: &str, params: Vec<Value>) -> StorageResult<User> {
        let model = UserEntity::find()
            .from_raw_sql(self.statement(query, params))
            .one(self.db.as_ref())
            .await?
            .ok_or_not_found()?;

        Ok(User::from(model))
    }

    async fn select_many(&self, query: &str, params: Vec<Value>) -> StorageResult<Vec<User>> {
        let models = UserEntity::find()
            .from_raw_sql(self.statement(query, params))
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn insert_row(&self, user: &User) -> StorageResult<i64> {
        let model = user::new_row(user)?.insert(self.db.as_ref()).await?;
        Ok(model.id)
    }
}
