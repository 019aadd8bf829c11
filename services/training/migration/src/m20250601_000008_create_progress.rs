use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Progress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Progress::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Progress::EmployeeId).integer().not_null())
                    .col(ColumnDef::new(Progress::TrainingId).integer().not_null())
                    .col(ColumnDef::new(Progress::LapId).integer().not_null())
                    .col(
                        ColumnDef::new(Progress::Status)
                            .string_len(100)
                            .not_null()
                            .default("to_evaluate"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Progress::Table, Progress::EmployeeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Progress::Table, Progress::TrainingId)
                            .to(Trainings::Table, Trainings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Progress::Table, Progress::LapId)
                            .to(LearningActionPlans::Table, LearningActionPlans::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Progress::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Progress {
    Table,
    Id,
    EmployeeId,
    TrainingId,
    LapId,
    Status,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Trainings {
    Table,
    Id,
}

#[derive(Iden)]
enum LearningActionPlans {
    Table,
    Id,
}
