//! Create `reply` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reply::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reply::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reply::ReportId).string_len(32).not_null())
                    .col(ColumnDef::new(Reply::SubjectId).string_len(32).not_null())
                    .col(ColumnDef::new(Reply::Content).text().not_null())
                    .col(
                        ColumnDef::new(Reply::Status)
                            .string_len(32)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Reply::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reply_report")
                            .from(Reply::Table, Reply::ReportId)
                            .to(Report::Table, Report::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reply_subject")
                            .from(Reply::Table, Reply::SubjectId)
                            .to(Subject::Table, Subject::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: report_id (for hydrating report views)
        manager
            .create_index(
                Index::create()
                    .name("idx_reply_report_id")
                    .table(Reply::Table)
                    .col(Reply::ReportId)
                    .to_owned(),
            )
            .await?;

        // Index: status (for the moderation queue)
        manager
            .create_index(
                Index::create()
                    .name("idx_reply_status")
                    .table(Reply::Table)
                    .col(Reply::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reply::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Reply {
    Table,
    Id,
    ReportId,
    SubjectId,
    Content,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum Report {
    Table,
    Id,
}

#[derive(Iden)]
enum Subject {
    Table,
    Id,
}
