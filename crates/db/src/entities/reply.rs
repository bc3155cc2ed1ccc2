//! Reply entity (a subject's moderated response to a report).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::report::ModerationStatus;

/// Reply model.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "reply")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// The report being replied to.
    pub report_id: String,
    /// The subject issuing the reply.
    pub subject_id: String,
    /// Reply text.
    #[sea_orm(column_type = "Text")]
    pub content: String,
    /// Publicly visible only once approved.
    pub status: ModerationStatus,
    /// When the reply was submitted.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::report::Entity",
        from = "Column::ReportId",
        to = "super::report::Column::Id",
        on_delete = "Cascade"
    )]
    Report,
    #[sea_orm(
        belongs_to = "super::subject::Entity",
        from = "Column::SubjectId",
        to = "super::subject::Column::Id"
    )]
    Subject,
}

impl Related<super::report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Report.def()
    }
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
