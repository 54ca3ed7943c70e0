//! User service configuration.

use std::env;
use std::str::FromStr;

use common::DatabaseConfig;
use domain::{CredentialHasher, HashingCost};

/// User service configuration.
#[derive(Clone, Default)]
pub struct UserServiceConfig {
    pub database: DatabaseConfig,
    /// Argon2id cost for new credentials
    pub hashing: HashingCost,
}

impl std::fmt::Debug for UserServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceConfig")
            .field("database_url", &"[REDACTED]")
            .field("max_connections", &self.database.max_connections)
            .field("min_connections", &self.database.min_connections)
            .field("connect_timeout_secs", &self.database.connect_timeout_secs)
            .field("hashing", &self.hashing)
            .finish()
    }
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let db_defaults = DatabaseConfig::default();
        let hash_defaults = HashingCost::default();

        Self {
            database: DatabaseConfig {
                url: env::var("USER_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(db_defaults.url),
                max_connections: env_or("DATABASE_MAX_CONNECTIONS", db_defaults.max_connections),
                min_connections: env_or("DATABASE_MIN_CONNECTIONS", db_defaults.min_connections),
                connect_timeout_secs: env_or(
                    "DATABASE_CONNECT_TIMEOUT_SECS",
                    db_defaults.connect_timeout_secs,
                ),
            },
            hashing: HashingCost {
                memory_kib: env_or("PASSWORD_HASH_MEMORY_KIB", hash_defaults.memory_kib),
                iterations: env_or("PASSWORD_HASH_ITERATIONS", hash_defaults.iterations),
                parallelism: env_or("PASSWORD_HASH_PARALLELISM", hash_defaults.parallelism),
            },
        }
    }

    /// Hasher built from the configured cost
    pub fn hasher(&self) -> CredentialHasher {
        CredentialHasher::new(self.hashing)
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
