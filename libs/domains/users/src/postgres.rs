use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait, QueryOrder, SqlErr,
    Statement,
};

use crate::{
    entity,
    error::{UserError, UserResult},
    repository::UserRepository,
    user::User,
};

/// PostgreSQL implementation of UserRepository using SeaORM
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_raw(&self, sql: &str, value: String) -> UserResult<Vec<User>> {
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [value.into()]);

        let models = entity::Entity::find()
            .from_raw_sql(stmt)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(models.into_iter().map(User::from).collect())
    }
}

fn internal(e: DbErr) -> UserError {
    UserError::Internal(format!("Database error: {e}"))
}

/// `idx_users_email_lower` is the authoritative duplicate check.
fn write_error(e: DbErr, email: &str) -> UserError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => UserError::DuplicateEmail(email.to_string()),
        _ => internal(e),
    }
}

fn like_pattern(term: &str) -> String {
    let escaped = term
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let email = user.email.clone();
        let mut active: entity::ActiveModel = user.into();
        active.id = sea_orm::ActiveValue::NotSet;

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, &email))?;

        tracing::info!(user_id = model.id, email = %model.email, "Created user");
        Ok(model.into())
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let id = user.id;
        let email = user.email.clone();
        let active: entity::ActiveModel = user.into();

        let model = active.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => UserError::UserNotFound(id),
            other => write_error(other, &email),
        })?;

        tracing::info!(user_id = model.id, "Updated user");
        Ok(model.into())
    }

    async fn delete(&self, id: i64) -> UserResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(internal)?;

        let deleted = result.rows_affected > 0;
        if deleted {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(deleted)
    }

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(model.map(User::from))
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self
            .find_raw(
                "SELECT * FROM users WHERE LOWER(email) = $1 LIMIT 1",
                email.to_lowercase(),
            )
            .await?;

        Ok(users.into_iter().next())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn search_by_email(&self, term: &str) -> UserResult<Vec<User>> {
        self.find_raw(
            "SELECT * FROM users WHERE LOWER(email) LIKE $1 ORDER BY id",
            like_pattern(term),
        )
        .await
    }

    async fn search_by_name(&self, term: &str) -> UserResult<Vec<User>> {
        self.find_raw(
            "SELECT * FROM users WHERE LOWER(name) LIKE $1 ORDER BY id",
            like_pattern(term),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(id: i64, name: &str, email: &str) -> entity::Model {
        entity::Model {
            id,
            name: name.to_string(),
            email: email.to_string(),
            password: "$argon2id$hash".to_string(),
        }
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Alice"), "%alice%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[tokio::test]
    async fn test_get_by_id_maps_model() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(3, "Alice", "alice@example.com")]])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let user = repo.get_by_id(3).await.unwrap().unwrap();
        assert_eq!(user.id, 3);
        assert_eq!(user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_get_by_email_takes_first_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Alice", "Alice@Example.com")]])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let user = repo.get_by_email("alice@example.com").await.unwrap();
        assert_eq!(user.map(|u| u.id), Some(1));
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgUserRepository::new(db);

        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_query_failure_is_internal() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = PgUserRepository::new(db);

        assert!(matches!(repo.list().await, Err(UserError::Internal(_))));
    }
}
