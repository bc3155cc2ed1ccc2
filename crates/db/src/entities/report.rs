//! Report entity (a user's account of an experience with a subject).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Moderation status, shared by reports and replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Report kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    #[sea_orm(string_value = "positive")]
    Positive,
    #[sea_orm(string_value = "negative")]
    Negative,
}

/// Report model.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "report")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// The subject this report is about.
    pub subject_id: String,
    /// The user who submitted the report. Server-assigned, never
    /// client-supplied.
    pub reporter_id: String,
    /// Positive or negative experience.
    pub kind: ReportKind,
    /// Category label from the fixed per-kind vocabulary.
    pub category: String,
    /// Short headline.
    pub title: String,
    /// Redacted text shown publicly. Written once at creation.
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Unredacted text retained for moderator review.
    #[sea_orm(column_type = "Text")]
    pub original_description: String,
    /// Current moderation status.
    pub status: ModerationStatus,
    /// Hides reporter identity from public view only.
    #[sea_orm(default_value = false)]
    pub is_anonymous: bool,
    /// When the report was submitted.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subject::Entity",
        from = "Column::SubjectId",
        to = "super::subject::Column::Id"
    )]
    Subject,
    #[sea_orm(has_many = "super::evidence::Entity")]
    Evidence,
    #[sea_orm(has_many = "super::reply::Entity")]
    Reply,
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::evidence::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evidence.def()
    }
}

impl Related<super::reply::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reply.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
