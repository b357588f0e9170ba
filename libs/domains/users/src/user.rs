use crate::models::UserDto;
use crate::validation::{self, ValidationResult};

/// A registered user.
///
/// `password` holds plaintext only between construction and
/// [`User::set_password`]; everything that reaches storage carries the hash.
/// An `id` of `0` marks a user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Evaluate every field rule.
    pub fn validate(&self) -> ValidationResult {
        validation::validate_user(Some(self))
    }

    pub fn is_valid(&self) -> bool {
        self.validate().ok
    }

    /// Replace the plaintext password with its hash.
    pub fn set_password(&mut self, hashed: String) {
        self.password = hashed;
    }
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            email: dto.email,
            password: dto.password,
        }
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            password: user.password,
        }
    }
}
