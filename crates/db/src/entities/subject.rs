//! Subject entity (a company or individual that reports are about).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Subject kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    #[sea_orm(string_value = "company")]
    Company,
    #[sea_orm(string_value = "individual")]
    Individual,
}

/// Subject model.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "subject")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Company or individual.
    pub kind: SubjectKind,
    /// Free-form description.
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Location (city, region, or "Nationwide").
    #[sea_orm(nullable)]
    pub location: Option<String>,
    /// Set by administrative action only.
    #[sea_orm(default_value = false)]
    pub verified: bool,
    /// When the subject was first recorded.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::report::Entity")]
    Report,
}

impl Related<super::report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Report.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
