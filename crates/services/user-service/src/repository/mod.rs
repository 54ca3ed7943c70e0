//! Repository layer for data access.

pub mod entities;
mod user_repository;

#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserGateway;
pub use user_repository::{UserGateway, UserStore, SELECT_ALL_USERS, SELECT_USER_BY_ID};
