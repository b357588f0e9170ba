use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::hasher::Argon2IdHasher;
use crate::models::UserDto;
use crate::repository::UserRepository;
use crate::user::User;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    hasher: Argon2IdHasher,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, hasher: Argon2IdHasher) -> Self {
        Self {
            repository: Arc::new(repository),
            hasher,
        }
    }

    /// Register a new user.
    ///
    /// Rejects a taken email (any case) before validating, then stores the
    /// user with its password replaced by the Argon2id hash.
    #[instrument(skip(self, dto), fields(email = %dto.email))]
    pub async fn create(&self, dto: UserDto) -> UserResult<UserDto> {
        if self.repository.get_by_email(&dto.email).await?.is_some() {
            return Err(UserError::DuplicateEmail(dto.email));
        }

        let mut user = User::from(dto);
        user.id = 0;
        self.prepare(&mut user).await?;

        let created = self.repository.create(user).await?;
        Ok(created.into())
    }

    /// Overwrite every field of an existing user.
    #[instrument(skip(self, dto), fields(user_id = dto.id))]
    pub async fn update(&self, dto: UserDto) -> UserResult<UserDto> {
        if self.repository.get_by_id(dto.id).await?.is_none() {
            return Err(UserError::UserNotFound(dto.id));
        }

        let mut user = User::from(dto);
        self.prepare(&mut user).await?;

        let updated = self.repository.update(user).await?;
        Ok(updated.into())
    }

    /// Delete a user. Removing an unknown id is not an error.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: i64) -> UserResult<()> {
        if !self.repository.delete(id).await? {
            tracing::debug!(user_id = id, "Remove requested for unknown user");
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> UserResult<Option<UserDto>> {
        Ok(self.repository.get_by_id(id).await?.map(UserDto::from))
    }

    pub async fn get_all(&self) -> UserResult<Vec<UserDto>> {
        Ok(into_dtos(self.repository.list().await?))
    }

    /// Exact, case-insensitive email lookup.
    #[instrument(skip(self))]
    pub async fn get_by_email(&self, email: &str) -> UserResult<Option<UserDto>> {
        Ok(self.repository.get_by_email(email).await?.map(UserDto::from))
    }

    #[instrument(skip(self))]
    pub async fn search_by_email(&self, term: &str) -> UserResult<Vec<UserDto>> {
        Ok(into_dtos(self.repository.search_by_email(term).await?))
    }

    #[instrument(skip(self))]
    pub async fn search_by_name(&self, term: &str) -> UserResult<Vec<UserDto>> {
        Ok(into_dtos(self.repository.search_by_name(term).await?))
    }

    /// Validate, then swap the plaintext password for its hash.
    async fn prepare(&self, user: &mut User) -> UserResult<()> {
        let result = user.validate();
        if !result.ok {
            return Err(UserError::Validation(result.messages));
        }

        let hashed = self.hasher.hash_blocking(user.password.clone()).await?;
        user.set_password(hashed);
        Ok(())
    }
}

fn into_dtos(users: Vec<User>) -> Vec<UserDto> {
    users.into_iter().map(UserDto::from).collect()
}
