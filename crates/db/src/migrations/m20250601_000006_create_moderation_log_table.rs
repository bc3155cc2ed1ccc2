//! Create `moderation_log` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ModerationLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ModerationLog::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ModerationLog::ReportId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ModerationLog::ModeratorId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ModerationLog::Action).string_len(32).not_null())
                    .col(ColumnDef::new(ModerationLog::Notes).text())
                    .col(
                        ColumnDef::new(ModerationLog::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_moderation_log_report")
                            .from(ModerationLog::Table, ModerationLog::ReportId)
                            .to(Report::Table, Report::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: report_id (for per-report audit history)
        manager
            .create_index(
                Index::create()
                    .name("idx_moderation_log_report_id")
                    .table(ModerationLog::Table)
                    .col(ModerationLog::ReportId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ModerationLog::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ModerationLog {
    Table,
    Id,
    ReportId,
    ModeratorId,
    Action,
    Notes,
    CreatedAt,
}

#[derive(Iden)]
enum Report {
    Table,
    Id,
}
