use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LearningActionPlans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LearningActionPlans::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LearningActionPlans::EmployeeId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LearningActionPlans::TrainingId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LearningActionPlans::SubmittedOn)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LearningActionPlans::Takeaways).text().not_null())
                    .col(ColumnDef::new(LearningActionPlans::Goal).text().not_null())
                    .col(ColumnDef::new(LearningActionPlans::Plan).text().not_null())
                    .col(ColumnDef::new(LearningActionPlans::Timeframe).text().not_null())
                    .col(ColumnDef::new(LearningActionPlans::Support).text().not_null())
                    .col(ColumnDef::new(LearningActionPlans::Outcome).text().not_null())
                    .col(
                        ColumnDef::new(LearningActionPlans::Status)
                            .string_len(20)
                            .not_null()
                            .default("to_evaluate"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(LearningActionPlans::Table, LearningActionPlans::EmployeeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(LearningActionPlans::Table, LearningActionPlans::TrainingId)
                            .to(Trainings::Table, Trainings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LearningActionPlans::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum LearningActionPlans {
    Table,
    Id,
    EmployeeId,
    TrainingId,
    SubmittedOn,
    Takeaways,
    Goal,
    Plan,
    Timeframe,
    Support,
    Outcome,
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
