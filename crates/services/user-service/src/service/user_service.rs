//! User service - Handles user account persistence and credentials.
//!
//! Every mutation path normalizes, hashes and stamps the record in memory
//! before handing it to the gateway.

use async_trait::async_trait;
use std::sync::Arc;

use common::AppResult;
use domain::{CredentialHasher, HasAuditTimestamps, User, UserList};

use crate::repository::{UserGateway, SELECT_ALL_USERS, SELECT_USER_BY_ID};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Persist a new user.
    ///
    /// An empty `password` creates the account without a credential. Nothing
    /// distinguishes that from a caller that forgot to pass one; callers that
    /// require a password must check before calling.
    async fn insert(&self, user: &mut User, password: &str) -> AppResult<()>;

    /// Load a user by key into `target`. `target` is untouched on error.
    async fn get_by_id(&self, target: &mut User, id: i64) -> AppResult<()>;

    /// Load a user by key
    async fn find_by_id(&self, id: i64) -> AppResult<User>;

    /// List every user, newest first
    async fn list_all(&self) -> AppResult<UserList>;
}

/// Concrete implementation of UserService using a persistence gateway.
pub struct UserManager {
    gateway: Arc<dyn UserGateway>,
    hasher: CredentialHasher,
}

impl UserManager {
    /// Create new user service with the default hashing cost
    pub fn new(gateway: Arc<dyn UserGateway>) -> Self {
        Self::with_hasher(gateway, CredentialHasher::default())
    }

    /// Create new user service with a configured hasher
    pub fn with_hasher(gateway: Arc<dyn UserGateway>, hasher: CredentialHasher) -> Self {
        Self { gateway, hasher }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn insert(&self, user: &mut User, password: &str) -> AppResult<()> {
        user.normalize_email();
        user.set_password_with(&self.hasher, password)?;
        user.touch();

        let id = self.gateway.insert_row(user).await?;
        user.id = Some(id);

        tracing::info!(user_id = id, has_credential = user.has_credential(), "User created");
        Ok(())
    }

    async fn get_by_id(&self, target: &mut User, id: i64) -> AppResult<()> {
        *target = self.find_by_id(id).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<User> {
        tracing::debug!(user_id = id, "Loading user");
        let user = self
            .gateway
            .select_one(SELECT_USER_BY_ID, vec![id.into()])
            .await?;
        Ok(user)
    }

    async fn list_all(&self) -> AppResult<UserList> {
        let users = self
            .gateway
            .select_many(SELECT_ALL_USERS, Vec::new())
            .await
            .map_err(|e| {
                tracing::error!("Failed to list users: {}", e);
                e
            })?;

        tracing::debug!(count = users.len(), "Listed users");
        Ok(UserList::new(users))
    }
}
