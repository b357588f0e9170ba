//! Login gate in front of token issuance.

use super::config::JwtConfig;

/// Decides whether a login/password pair may receive a token.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, login: &str, password: &str) -> bool;
}

/// Accepts exactly the configured `JWT_LOGIN` / `JWT_PASSWORD` pair.
#[derive(Clone)]
pub struct StaticCredentials {
    login: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(config.login.clone(), config.password.clone())
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, login: &str, password: &str) -> bool {
        // Evaluate both sides so a wrong login costs the same as a wrong password.
        let login_ok = constant_time_eq(login.as_bytes(), self.login.as_bytes());
        let password_ok = constant_time_eq(password.as_bytes(), self.password.as_bytes());
        login_ok & password_ok
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
