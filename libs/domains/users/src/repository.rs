use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::user::User;

/// Repository trait for User persistence
///
/// Email matching is case-insensitive everywhere; listings are ordered by id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return it with its generated id
    async fn create(&self, user: User) -> UserResult<User>;

    /// Overwrite every field of an existing user
    async fn update(&self, user: User) -> UserResult<User>;

    /// Delete a user by ID; `false` when nothing was deleted
    async fn delete(&self, id: i64) -> UserResult<bool>;

    /// Get a user by ID
    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>>;

    /// Get a user by exact email
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// All users
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Users whose email contains `term`
    async fn search_by_email(&self, term: &str) -> UserResult<Vec<User>>;

    /// Users whose name contains `term`
    async fn search_by_name(&self, term: &str) -> UserResult<Vec<User>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<BTreeMap<i64, User>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn email_taken(users: &BTreeMap<i64, User>, email: &str, except: Option<i64>) -> bool {
    let email = email.to_lowercase();
    users
        .values()
        .any(|u| Some(u.id) != except && u.email.to_lowercase() == email)
}

fn matching<'a>(
    users: impl Iterator<Item = &'a User>,
    term: &str,
    field: fn(&User) -> &str,
) -> Vec<User> {
    let term = term.to_lowercase();
    users
        .filter(|u| field(u).to_lowercase().contains(&term))
        .cloned()
        .collect()
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, mut user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if email_taken(&users, &user.email, None) {
            return Err(UserError::DuplicateEmail(user.email));
        }

        user.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(UserError::UserNotFound(user.id));
        }

        if email_taken(&users, &user.email, Some(user.id)) {
            return Err(UserError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, "Updated user");
        Ok(user)
    }

    async fn delete(&self, id: i64) -> UserResult<bool> {
        let mut users = self.users.write().await;
        let removed = users.remove(&id).is_some();

        if removed {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(removed)
    }

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        let email = email.to_lowercase();
        Ok(users
            .values()
            .find(|u| u.email.to_lowercase() == email)
            .cloned())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn search_by_email(&self, term: &str) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(matching(users.values(), term, |u| u.email.as_str()))
    }

    async fn search_by_name(&self, term: &str) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(matching(users.values(), term, |u| u.name.as_str()))
    }
}
