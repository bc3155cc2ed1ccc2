//! Evidence entity (a file attachment supporting a report).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Evidence model.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "evidence")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Parent report.
    pub report_id: String,
    /// Opaque storage locator (URL or key).
    #[sea_orm(column_type = "Text")]
    pub file_path: String,
    /// Original file name as uploaded.
    pub file_name: String,
    /// MIME type.
    pub file_type: String,
    /// When the file was attached.
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
