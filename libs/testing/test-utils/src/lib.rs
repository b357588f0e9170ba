//! Shared test infrastructure for the user manager crates.
//!
//! - `TestDatabase`: throwaway PostgreSQL container with the schema migrated
//!   (feature: "postgres", enabled by default)
//! - [`TestDataBuilder`]: deterministic, collision-free names and emails
//! - [`assertions`]: small assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! # async fn example() {
//! let db = TestDatabase::new().await;
//! let data = TestDataBuilder::from_test_name("creates_user");
//! let email = data.email("alice");
//! # let _ = (db.connection(), email);
//! # }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeded generator for test values.
///
/// Two builders created from the same test name produce the same values, and
/// different test names produce different values, so tests sharing one
/// database never collide on the unique email index.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test's name.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let data = TestDataBuilder::from_test_name("test_update_user");
    /// assert!(data.email("bob").ends_with("@example.com"));
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A display name between 3 and 80 characters.
    pub fn name(&self, label: &str) -> String {
        format!("Test {} {:x}", label, self.seed % 0xffff_ffff)
    }

    /// A syntactically valid, seed-unique address on `example.com`.
    pub fn email(&self, label: &str) -> String {
        format!("{}.{:x}@example.com", label.to_lowercase(), self.seed)
    }
}

pub mod assertions {
    /// Unwrap an option with a descriptive panic.
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert a stored password is a PHC-formatted Argon2id hash, not the input.
    pub fn assert_argon2id_hash(stored: &str, plaintext: &str) {
        assert_ne!(stored, plaintext, "password was stored in clear text");
        assert!(
            stored.starts_with("$argon2id$"),
            "expected an Argon2id PHC string, got {stored}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let a = TestDataBuilder::from_test_name("same");
        let b = TestDataBuilder::from_test_name("same");

        assert_eq!(a.email("alice"), b.email("alice"));
        assert_eq!(a.name("alice"), b.name("alice"));
    }

    #[test]
    fn test_data_builder_different_names() {
        let a = TestDataBuilder::from_test_name("test1");
        let b = TestDataBuilder::from_test_name("test2");

        assert_ne!(a.email("alice"), b.email("alice"));
    }

    #[test]
    fn test_generated_values_fit_user_limits() {
        let data = TestDataBuilder::new(u64::MAX);
        let name = data.name("Alice");
        let email = data.email("Alice");

        assert!((3..=80).contains(&name.chars().count()), "{name}");
        assert!((10..=180).contains(&email.chars().count()), "{email}");
        assert_eq!(email, email.to_lowercase());
    }

    #[test]
    #[should_panic(expected = "lookup: expected Some")]
    fn test_assert_some_panics_with_context() {
        assertions::assert_some::<u8>(None, "lookup");
    }
}
