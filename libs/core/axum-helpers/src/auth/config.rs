//! Login and token settings, loaded through `core_config::FromEnv`.

use chrono::{TimeDelta, Utc};
use core_config::{ConfigError, FromEnv, env_parse_or, env_required};
use std::fmt;

/// Minimum signing key length in bytes for HS256.
pub const MIN_SECRET_LEN: usize = 32;

/// Token issuance settings and the pre-shared login pair.
///
/// Environment variables:
/// - `JWT_LOGIN` (required)
/// - `JWT_PASSWORD` (required)
/// - `JWT_KEY` (required, at least 32 bytes)
/// - `JWT_HOURS_TO_EXPIRE` (default 8, positive, expiry must stay a representable date)
#[derive(Clone)]
pub struct JwtConfig {
    pub login: String,
    pub password: String,
    pub secret: String,
    pub hours_to_expire: i64,
}

impl JwtConfig {
    /// Construct and validate in code, mainly for tests.
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
        secret: impl Into<String>,
        hours_to_expire: i64,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            login: login.into(),
            password: password.into(),
            secret: secret.into(),
            hours_to_expire,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::parse(
                "JWT_KEY",
                format!(
                    "must be at least {MIN_SECRET_LEN} bytes (got {}). Generate one with: openssl rand -base64 32",
                    self.secret.len()
                ),
            ));
        }
        if self.hours_to_expire <= 0 {
            return Err(ConfigError::parse(
                "JWT_HOURS_TO_EXPIRE",
                format!("must be positive (got {})", self.hours_to_expire),
            ));
        }
        let expiry = TimeDelta::try_hours(self.hours_to_expire)
            .and_then(|validity| Utc::now().checked_add_signed(validity));
        if expiry.is_none() {
            return Err(ConfigError::parse(
                "JWT_HOURS_TO_EXPIRE",
                format!("is out of range (got {})", self.hours_to_expire),
            ));
        }
        if self.login.is_empty() || self.password.is_empty() {
            return Err(ConfigError::parse("JWT_LOGIN", "login and password must not be empty"));
        }
        Ok(())
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .field("secret", &"<redacted>")
            .field("hours_to_expire", &self.hours_to_expire)
            .finish()
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            login: env_required("JWT_LOGIN")?,
            password: env_required("JWT_PASSWORD")?,
            secret: env_required("JWT_KEY")?,
            hours_to_expire: env_parse_or("JWT_HOURS_TO_EXPIRE", 8i64)?,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

    fn with_jwt_env<F: FnOnce()>(key: &str, hours: Option<&str>, f: F) {
        temp_env::with_vars(
            [
                ("JWT_LOGIN", Some("admin")),
                ("JWT_PASSWORD", Some("admin-password")),
                ("JWT_KEY", Some(key)),
                ("JWT_HOURS_TO_EXPIRE", hours),
            ],
            f,
        );
    }

    #[test]
    fn test_jwt_config_from_env_valid() {
        with_jwt_env(SECRET, Some("2"), || {
            let config = JwtConfig::from_env().unwrap();
            assert_eq!(config.login, "admin");
            assert_eq!(config.password, "admin-password");
            assert_eq!(config.hours_to_expire, 2);
        });
    }

    #[test]
    fn test_jwt_config_defaults_to_eight_hours() {
        with_jwt_env(SECRET, None, || {
            assert_eq!(JwtConfig::from_env().unwrap().hours_to_expire, 8);
        });
    }

    #[test]
    fn test_jwt_config_from_env_missing_login() {
        temp_env::with_var_unset("JWT_LOGIN", || {
            let err = JwtConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("JWT_LOGIN"));
        });
    }

    #[test]
    fn test_jwt_config_rejects_short_key() {
        with_jwt_env("short", None, || {
            let err = JwtConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("JWT_KEY"));
            assert!(err.to_string().contains("32 bytes"));
        });
    }

    #[test]
    fn test_jwt_config_rejects_non_positive_lifetime() {
        assert!(JwtConfig::new("admin", "pw", SECRET, 0).is_err());
        assert!(JwtConfig::new("admin", "pw", SECRET, -1).is_err());
    }

    #[test]
    fn test_jwt_config_rejects_oversized_lifetime() {
        let err = JwtConfig::new("admin", "pw", SECRET, 2_000_000_000_000).unwrap_err();
        assert!(err.to_string().contains("JWT_HOURS_TO_EXPIRE"));
        assert!(JwtConfig::new("admin", "pw", SECRET, i64::MAX).is_err());
    }

    #[test]
    fn test_jwt_config_from_env_rejects_oversized_lifetime() {
        with_jwt_env(SECRET, Some("2000000000000"), || {
            let err = JwtConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("JWT_HOURS_TO_EXPIRE"));
        });
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = JwtConfig::new("admin", "hunter22", SECRET, 1).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter22"));
        assert!(!debug.contains(SECRET));
    }
}
