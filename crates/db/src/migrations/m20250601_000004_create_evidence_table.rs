//! Create `evidence` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Evidence::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evidence::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Evidence::ReportId).string_len(32).not_null())
                    .col(ColumnDef::new(Evidence::FilePath).text().not_null())
                    .col(ColumnDef::new(Evidence::FileName).string_len(256).not_null())
                    .col(ColumnDef::new(Evidence::FileType).string_len(128).not_null())
                    .col(
                        ColumnDef::new(Evidence::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_evidence_report")
                            .from(Evidence::Table, Evidence::ReportId)
                            .to(Report::Table, Report::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: report_id (for hydrating report views)
        manager
            .create_index(
                Index::create()
                    .name("idx_evidence_report_id")
                    .table(Evidence::Table)
                    .col(Evidence::ReportId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Evidence::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Evidence {
    Table,
    Id,
    ReportId,
    FilePath,
    FileName,
    FileType,
    CreatedAt,
}

#[derive(Iden)]
enum Report {
    Table,
    Id,
}
