use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::user::User;

/// Sea-ORM entity for the `users` table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            password: model.password,
        }
    }
}

/// Insert when the user has no id yet, otherwise a full overwrite of that row.
impl From<User> for ActiveModel {
    fn from(user: User) -> Self {
        ActiveModel {
            id: if user.id > 0 { Set(user.id) } else { NotSet },
            name: Set(user.name),
            email: Set(user.email),
            password: Set(user.password),
        }
    }
}
