//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user account record, its audit timestamps and the credential hasher.

pub mod constants;
pub mod error;
pub mod password;
pub mod timestamps;
pub mod user;

pub use constants::*;
pub use error::{CredentialError, CredentialResult};
pub use password::{CredentialHasher, HashingCost};
pub use timestamps::{AuditTimestamps, HasAuditTimestamps};
pub use user::{normalize_email, User, UserList};
