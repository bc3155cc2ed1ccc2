//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User model.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub email: String,

    /// Argon2 password hash.
    pub password_hash: String,

    /// Access token for bearer authentication.
    #[sea_orm(unique, nullable)]
    pub token: Option<String>,

    /// Whether this user can moderate reports.
    #[sea_orm(default_value = false)]
    pub is_admin: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
