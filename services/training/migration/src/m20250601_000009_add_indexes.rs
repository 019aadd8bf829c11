use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const UNIQUE_INDEXES: &[(&str, &str, &[&str])] = &[
    ("uq_users_username", "users", &["username"]),
    ("uq_users_email", "users", &["email"]),
    (
        "uq_assignments_user_training",
        "assignments",
        &["user_id", "training_id"],
    ),
    (
        "uq_enrollments_user_training",
        "enrollments",
        &["user_id", "training_id"],
    ),
];

const LOOKUP_INDEXES: &[(&str, &str, &str)] = &[
    ("idx_trainings_training_date", "trainings", "training_date"),
    ("idx_assignments_training_id", "assignments", "training_id"),
    ("idx_enrollments_training_id", "enrollments", "training_id"),
    ("idx_competencies_employee_id", "competencies", "employee_id"),
    (
        "idx_learning_action_plans_employee_id",
        "learning_action_plans",
        "employee_id",
    ),
    ("idx_progress_employee_id", "progress", "employee_id"),
    ("idx_progress_lap_id", "progress", "lap_id"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, cols) in UNIQUE_INDEXES {
            let mut index = Index::create();
            index.name(*name).table(Alias::new(*table)).unique();
            for col in *cols {
                index.col(Alias::new(*col));
            }
            manager.create_index(index.to_owned()).await?;
        }
        for (name, table, col) in LOOKUP_INDEXES {
            manager
                .create_index(
                    Index::create()
                        .name(*name)
                        .table(Alias::new(*table))
                        .col(Alias::new(*col))
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, _) in LOOKUP_INDEXES.iter().rev() {
            manager
                .drop_index(
                    Index::drop()
                        .name(*name)
                        .table(Alias::new(*table))
                        .to_owned(),
                )
                .await?;
        }
        for (name, table, _) in UNIQUE_INDEXES.iter().rev() {
            manager
                .drop_index(
                    Index::drop()
                        .name(*name)
                        .table(Alias::new(*table))
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }
}
