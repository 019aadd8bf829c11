use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let rating = |col: Competencies| {
            ColumnDef::new(col)
                .small_integer()
                .not_null()
                .default(1)
                .to_owned()
        };
        manager
            .create_table(
                Table::create()
                    .table(Competencies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Competencies::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Competencies::EmployeeId).integer().not_null())
                    .col(rating(Competencies::Global))
                    .col(rating(Competencies::Solutions))
                    .col(rating(Competencies::Networking))
                    .col(rating(Competencies::Delivering))
                    .col(rating(Competencies::Collaboration))
                    .col(rating(Competencies::Agility))
                    .col(rating(Competencies::Professionalism))
                    .col(
                        ColumnDef::new(Competencies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Competencies::Table, Competencies::EmployeeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Competencies::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Competencies {
    Table,
    Id,
    EmployeeId,
    Global,
    Solutions,
    Networking,
    Delivering,
    Collaboration,
    Agility,
    Professionalism,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
