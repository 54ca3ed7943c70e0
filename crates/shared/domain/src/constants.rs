//! Domain-level constants.
//!
//! Credential cost defaults shared by every crate in the workspace.

// =============================================================================
// Credential hashing (Argon2id)
// =============================================================================

/// Default memory cost in KiB (OWASP minimum for Argon2id)
pub const DEFAULT_HASH_MEMORY_KIB: u32 = 19_456;

/// Default number of passes over memory
pub const DEFAULT_HASH_ITERATIONS: u32 = 2;

/// Default degree of parallelism
pub const DEFAULT_HASH_PARALLELISM: u32 = 1;

