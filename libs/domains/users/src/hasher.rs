//! Argon2id password hashing with a server-held salt.
//!
//! The salt is shared by every user and comes from configuration, so hashing
//! the same password twice with the same settings yields the same PHC string.

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use core_config::{ConfigError, FromEnv, env_parse_or, env_required};
use std::fmt;

use crate::error::{UserError, UserResult};

pub const MIN_SALT_LEN: usize = 8;
/// Longest salt that still fits a PHC salt field once base64 encoded.
pub const MAX_SALT_LEN: usize = 48;

/// Argon2id cost parameters and the shared salt.
///
/// Environment variables:
/// - `HASH_TIME_COST` (default 3)
/// - `HASH_MEMORY_COST` in KiB (default 19456)
/// - `HASH_LANES` (default: available parallelism)
/// - `HASH_LENGTH` in bytes (default 32)
/// - `HASH_SALT` (required, 8 to 48 bytes)
#[derive(Clone)]
pub struct HashConfig {
    pub time_cost: u32,
    pub memory_cost: u32,
    pub lanes: u32,
    pub hash_length: usize,
    pub salt: String,
}

impl HashConfig {
    /// Default costs with the given salt.
    pub fn new(salt: impl Into<String>) -> Self {
        Self {
            time_cost: 3,
            memory_cost: 19_456,
            lanes: default_lanes(),
            hash_length: 32,
            salt: salt.into(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let len = self.salt.len();
        if !(MIN_SALT_LEN..=MAX_SALT_LEN).contains(&len) {
            return Err(ConfigError::parse(
                "HASH_SALT",
                format!("must be between {MIN_SALT_LEN} and {MAX_SALT_LEN} bytes (got {len})"),
            ));
        }
        Ok(())
    }
}

fn default_lanes() -> u32 {
    std::thread::available_parallelism()
        .map(|n| u32::try_from(n.get()).unwrap_or(1))
        .unwrap_or(1)
}

impl fmt::Debug for HashConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashConfig")
            .field("time_cost", &self.time_cost)
            .field("memory_cost", &self.memory_cost)
            .field("lanes", &self.lanes)
            .field("hash_length", &self.hash_length)
            .field("salt", &"<redacted>")
            .finish()
    }
}

impl FromEnv for HashConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            time_cost: env_parse_or("HASH_TIME_COST", 3u32)?,
            memory_cost: env_parse_or("HASH_MEMORY_COST", 19_456u32)?,
            lanes: env_parse_or("HASH_LANES", default_lanes())?,
            hash_length: env_parse_or("HASH_LENGTH", 32usize)?,
            salt: env_required("HASH_SALT")?,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Argon2id v0x13 hasher. Cheap to clone; hashing itself is CPU bound, so
/// async callers go through [`Argon2IdHasher::hash_blocking`].
#[derive(Clone)]
pub struct Argon2IdHasher {
    argon2: Argon2<'static>,
    salt: SaltString,
}

impl Argon2IdHasher {
    pub fn new(config: &HashConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let params = Params::new(
            config.memory_cost,
            config.time_cost,
            config.lanes,
            Some(config.hash_length),
        )
        .map_err(|e| ConfigError::parse("HASH_MEMORY_COST", e))?;

        let salt = SaltString::encode_b64(config.salt.as_bytes())
            .map_err(|e| ConfigError::parse("HASH_SALT", e))?;

        tracing::info!(
            time_cost = config.time_cost,
            memory_cost = config.memory_cost,
            lanes = config.lanes,
            hash_length = config.hash_length,
            "Argon2id hasher initialized"
        );

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            salt,
        })
    }

    /// Hash `plaintext` into a PHC string.
    pub fn hash(&self, plaintext: &str) -> UserResult<String> {
        self.argon2
            .hash_password(plaintext.as_bytes(), self.salt.as_salt())
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    /// `true` when `plaintext` produces `hashed`. Unparsable hashes never match.
    pub fn verify(&self, plaintext: &str, hashed: &str) -> bool {
        match PasswordHash::new(hashed) {
            Ok(parsed) => self
                .argon2
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// [`Self::hash`] on the blocking thread pool.
    pub async fn hash_blocking(&self, plaintext: String) -> UserResult<String> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| UserError::Internal(format!("Hashing task failed: {e}")))?
    }
}
