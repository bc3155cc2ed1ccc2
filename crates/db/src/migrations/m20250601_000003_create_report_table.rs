//! Create `report` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Report::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Report::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Report::SubjectId).string_len(32).not_null())
                    .col(ColumnDef::new(Report::ReporterId).string_len(32).not_null())
                    .col(ColumnDef::new(Report::Kind).string_len(32).not_null())
                    .col(ColumnDef::new(Report::Category).string_len(64).not_null())
                    .col(ColumnDef::new(Report::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Report::Description).text().not_null())
                    .col(
                        ColumnDef::new(Report::OriginalDescription)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Report::Status)
                            .string_len(32)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Report::IsAnonymous)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Report::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_subject")
                            .from(Report::Table, Report::SubjectId)
                            .to(Subject::Table, Subject::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: subject_id (for per-subject listing and stats)
        manager
            .create_index(
                Index::create()
                    .name("idx_report_subject_id")
                    .table(Report::Table)
                    .col(Report::SubjectId)
                    .to_owned(),
            )
            .await?;

        // Index: reporter_id (for "my reports")
        manager
            .create_index(
                Index::create()
                    .name("idx_report_reporter_id")
                    .table(Report::Table)
                    .col(Report::ReporterId)
                    .to_owned(),
            )
            .await?;

        // Index: status (for the moderation queue)
        manager
            .create_index(
                Index::create()
                    .name("idx_report_status")
                    .table(Report::Table)
                    .col(Report::Status)
                    .to_owned(),
            )
            .await?;

        // Index: created_at (for newest-first listing)
        manager
            .create_index(
                Index::create()
                    .name("idx_report_created_at")
                    .table(Report::Table)
                    .col(Report::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Report::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Report {
    Table,
    Id,
    SubjectId,
    ReporterId,
    Kind,
    Category,
    Title,
    Description,
    OriginalDescription,
    Status,
    IsAnonymous,
    CreatedAt,
}

#[derive(Iden)]
enum Subject {
    Table,
    Id,
}
