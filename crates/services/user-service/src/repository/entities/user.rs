//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use common::{StorageError, StorageResult};
use domain::{AuditTimestamps, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub hashed_password: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: Some(model.id),
            name: model.name,
            email: model.email,
            hashed_password: model.hashed_password,
            timestamps: AuditTimestamps::from_stored(model.created_at, model.updated_at),
        }
    }
}

/// Build the insert row for a new user. The key is left to the store.
///
/// # Errors
/// Fails if the record was never timestamped.
pub fn new_row(user: &User) -> StorageResult<ActiveModel> {
    let (Some(created_at), Some(updated_at)) =
        (user.timestamps.created_at(), user.timestamps.updated_at())
    else {
        return Err(StorageError::backend("user record has not been timestamped"));
    };

    Ok(ActiveModel {
        id: NotSet,
        name: Set(user.name.clone()),
        email: Set(user.email.clone()),
        hashed_password: Set(user.hashed_password.clone()),
        created_at: Set(created_at),
        updated_at: Set(updated_at),
    })
}
