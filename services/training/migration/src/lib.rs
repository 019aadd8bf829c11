use sea_orm_migration::prelude::*;

pub use sea_orm_migration::MigratorTrait;

mod m20250601_000001_create_users;
mod m20250601_000002_create_trainings;
mod m20250601_000003_create_supervision_links;
mod m20250601_000004_create_assignments;
mod m20250601_000005_create_enrollments;
mod m20250601_000006_create_competencies;
mod m20250601_000007_create_learning_action_plans;
mod m20250601_000008_create_progress;
mod m20250601_000009_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_users::Migration),
            Box::new(m20250601_000002_create_trainings::Migration),
            Box::new(m20250601_000003_create_supervision_links::Migration),
            Box::new(m20250601_000004_create_assignments::Migration),
            Box::new(m20250601_000005_create_enrollments::Migration),
            Box::new(m20250601_000006_create_competencies::Migration),
            Box::new(m20250601_000007_create_learning_action_plans::Migration),
            Box::new(m20250601_000008_create_progress::Migration),
            Box::new(m20250601_000009_add_indexes::Migration),
        ]
    }
}
