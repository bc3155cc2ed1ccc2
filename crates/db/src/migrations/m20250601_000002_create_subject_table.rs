//! Create `subject` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subject::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subject::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subject::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Subject::Kind).string_len(32).not_null())
                    .col(ColumnDef::new(Subject::Description).text())
                    .col(ColumnDef::new(Subject::Location).string_len(256))
                    .col(
                        ColumnDef::new(Subject::Verified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Subject::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: name (for lookup at submission time)
        manager
            .create_index(
                Index::create()
                    .name("idx_subject_name")
                    .table(Subject::Table)
                    .col(Subject::Name)
                    .to_owned(),
            )
            .await?;

        // Index: created_at (for newest-first listing)
        manager
            .create_index(
                Index::create()
                    .name("idx_subject_created_at")
                    .table(Subject::Table)
                    .col(Subject::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subject::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Subject {
    Table,
    Id,
    Name,
    Kind,
    Description,
    Location,
    Verified,
    CreatedAt,
}
