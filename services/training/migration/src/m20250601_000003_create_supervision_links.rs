use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SupervisionLinks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SupervisionLinks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SupervisionLinks::SupervisorId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SupervisionLinks::EmployeeId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SupervisionLinks::Table, SupervisionLinks::SupervisorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SupervisionLinks::Table, SupervisionLinks::EmployeeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SupervisionLinks::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SupervisionLinks {
    Table,
    Id,
    SupervisorId,
    EmployeeId,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
