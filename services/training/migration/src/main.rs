use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(dti_training_migration::Migrator).await;
}
