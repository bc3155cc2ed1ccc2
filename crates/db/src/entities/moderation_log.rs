//! Moderation log entity (audit trail of moderator decisions).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Moderator action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    #[sea_orm(string_value = "approve")]
    Approve,
    #[sea_orm(string_value = "reject")]
    Reject,
    #[sea_orm(string_value = "restore")]
    Restore,
    #[sea_orm(string_value = "flag")]
    Flag,
}

/// Moderation log model.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "moderation_log")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// The report the decision applies to.
    pub report_id: String,
    /// The moderator who acted.
    pub moderator_id: String,
    /// What the moderator did.
    pub action: ModerationAction,
    /// Optional free-form notes. Kept on the audit record, never on the
    /// report itself.
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    /// When the decision was made.
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
}

impl Related<super::report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Report.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
