//! Credential hashing - Argon2id with a fixed, configurable cost.
//!
//! The salt and cost are embedded in the PHC string produced by
//! [`CredentialHasher::hash`], so verification never needs the hasher's
//! current configuration: a hash created under an older cost still verifies.

use argon2::{
    password_hash::{
        rand_core::{CryptoRng, OsRng, RngCore},
        Error as PhcError, PasswordHash, PasswordHasher, PasswordVerifier, Salt, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HASH_ITERATIONS, DEFAULT_HASH_MEMORY_KIB, DEFAULT_HASH_PARALLELISM};
use crate::error::{CredentialError, CredentialResult};

/// Argon2id work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct HashingCost {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashingCost {
    fn default() -> Self {
        Self {
            memory_kib: DEFAULT_HASH_MEMORY_KIB,
            iterations: DEFAULT_HASH_ITERATIONS,
            parallelism: DEFAULT_HASH_PARALLELISM,
        }
    }
}

/// Produces and verifies salted one-way credential hashes.
///
/// The cost is fixed per instance. Invalid cost parameters are reported as
/// [`CredentialError::Hashing`] when a hash is requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CredentialHasher {
    cost: HashingCost,
}

impl CredentialHasher {
    /// Create a hasher with the given cost.
    pub fn new(cost: HashingCost) -> Self {
        Self { cost }
    }

    /// The configured cost.
    pub fn cost(&self) -> HashingCost {
        self.cost
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Errors
    /// Returns [`CredentialError::Hashing`] if the OS entropy source is
    /// unavailable, the cost is invalid or the algorithm rejects the input.
    pub fn hash(&self, plain_text: &str) -> CredentialResult<String> {
        self.hash_with_rng(plain_text, &mut OsRng)
    }

    fn hash_with_rng<R: RngCore + CryptoRng>(
        &self,
        plain_text: &str,
        rng: &mut R,
    ) -> CredentialResult<String> {
        let mut bytes = [0u8; Salt::RECOMMENDED_LENGTH];
        rng.try_fill_bytes(&mut bytes)
            .map_err(|e| CredentialError::hashing(format!("entropy source unavailable: {e}")))?;
        let salt =
            SaltString::encode_b64(&bytes).map_err(|e| CredentialError::hashing(e.to_string()))?;

        self.argon2()?
            .hash_password(plain_text.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CredentialError::hashing(e.to_string()))
    }

    /// Verify a plaintext password against a stored PHC hash.
    ///
    /// The comparison runs in constant time inside the argon2 crate, using the
    /// algorithm, salt and cost recorded in `hash`.
    ///
    /// # Errors
    /// - [`CredentialError::MalformedHash`] if `hash` is empty or unparseable
    /// - [`CredentialError::Mismatch`] if the password does not match
    pub fn verify(plain_text: &str, hash: &str) -> CredentialResult<()> {
        if hash.is_empty() {
            return Err(CredentialError::malformed("no credential set"));
        }

        let parsed = PasswordHash::new(hash).map_err(|e| CredentialError::malformed(e.to_string()))?;

        match Argon2::default().verify_password(plain_text.as_bytes(), &parsed) {
            Ok(()) => Ok(()),
            Err(PhcError::Password) => Err(CredentialError::Mismatch),
            Err(e) => Err(CredentialError::malformed(e.to_string())),
        }
    }

    fn argon2(&self) -> CredentialResult<Argon2<'static>> {
        let params = Params::new(
            self.cost.memory_kib,
            self.cost.iterations,
            self.cost.parallelism,
            None,
        )
        .map_err(|e| CredentialError::hashing(e.to_string()))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}
