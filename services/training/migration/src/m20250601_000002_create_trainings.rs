use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Trainings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Trainings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Trainings::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Trainings::Venue).string_len(200).not_null())
                    .col(ColumnDef::new(Trainings::TrainingDate).date().not_null())
                    .col(
                        ColumnDef::new(Trainings::TrainingType)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Trainings::Category).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Trainings::Status)
                            .string_len(20)
                            .not_null()
                            .default("scheduled"),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Trainings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Trainings {
    Table,
    Id,
    Title,
    Venue,
    TrainingDate,
    TrainingType,
    Category,
    Status,
}
