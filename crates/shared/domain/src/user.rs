//! User domain entity and related types.

use serde::{Deserialize, Serialize};

use crate::error::CredentialResult;
use crate::password::CredentialHasher;
use crate::timestamps::{AuditTimestamps, HasAuditTimestamps};

/// Lowercase an email address. This is the only normalization applied.
pub fn normalize_email(email: &str) -> String {
    email.to_lowercase()
}

/// User account record.
///
/// A default value is an unpersisted account with no credential and no
/// timestamps.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-generated key (None until inserted)
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    /// PHC hash string, empty when no password was ever set
    #[serde(skip_serializing, default)]
    pub hashed_password: String,
    #[serde(flatten)]
    pub timestamps: AuditTimestamps,
}

// Keep the credential hash out of debug output
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let credential = if self.has_credential() { "[REDACTED]" } else { "" };
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("hashed_password", &credential)
            .field("timestamps", &self.timestamps)
            .finish()
    }
}

impl User {
    /// Create an unpersisted user with identity fields only
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// Whether the record has been assigned a store key
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Whether a credential hash is present
    pub fn has_credential(&self) -> bool {
        !self.hashed_password.is_empty()
    }

    /// Lowercase the email in place.
    pub fn normalize_email(&mut self) {
        self.email = normalize_email(&self.email);
    }

    /// Hash and store a password with the default cost.
    ///
    /// See [`User::set_password_with`].
    pub fn set_password(&mut self, plain_text: &str) -> CredentialResult<()> {
        self.set_password_with(&CredentialHasher::default(), plain_text)
    }

    /// Hash and store a password with the given hasher.
    ///
    /// An empty password is a no-op. On error the existing hash is kept.
    ///
    /// # Errors
    /// Returns [`CredentialError::Hashing`](crate::CredentialError::Hashing)
    /// if the hash cannot be produced.
    pub fn set_password_with(
        &mut self,
        hasher: &CredentialHasher,
        plain_text: &str,
    ) -> CredentialResult<()> {
        if plain_text.is_empty() {
            return Ok(());
        }

        self.hashed_password = hasher.hash(plain_text)?;
        Ok(())
    }

    /// Verify a password against the stored hash.
    ///
    /// # Errors
    /// - [`CredentialError::Mismatch`](crate::CredentialError::Mismatch) on a wrong password
    /// - [`CredentialError::MalformedHash`](crate::CredentialError::MalformedHash)
    ///   if no credential is set or the hash is unrecognized
    pub fn check_password(&self, plain_text: &str) -> CredentialResult<()> {
        CredentialHasher::verify(plain_text, &self.hashed_password)
    }
}

impl HasAuditTimestamps for User {
    fn timestamps(&self) -> &AuditTimestamps {
        &self.timestamps
    }

    fn timestamps_mut(&mut self) -> &mut AuditTimestamps {
        &mut self.timestamps
    }
}

/// Users as returned by a listing query, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserList(Vec<User>);

impl UserList {
    pub fn new(users: Vec<User>) -> Self {
        Self(users)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, User> {
        self.0.iter()
    }
}

impl FromIterator<User> for UserList {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for UserList {
    type Item = User;
    type IntoIter = std::vec::IntoIter<User>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a UserList {
    type Item = &'a User;
    type IntoIter = std::slice::Iter<'a, User>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
