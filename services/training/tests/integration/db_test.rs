use sea_orm::{Database, DatabaseConnection};

use dti_domain::user::UserRole;
use dti_training::domain::repository::{LedgerRepository, TrainingRepository, UserRepository};
use dti_training::domain::types::{NewUser, UserProfile};
use dti_training::error::TrainingServiceError;
use dti_training::infra::db::{
    DbAssignmentRepository, DbEnrollmentRepository, DbTrainingRepository, DbUserRepository,
};
use dti_training_migration::{Migrator, MigratorTrait};

use crate::helpers::{day, test_training};

async fn connect() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_owned(),
        email: email.to_owned(),
        password_hash: "hash".to_owned(),
        profile: UserProfile {
            role: UserRole::Employee,
            ..Default::default()
        },
    }
}

/// One employee and one training to hang ledger rows on.
async fn seed(db: &DatabaseConnection) -> (i32, i32) {
    let users = DbUserRepository { db: db.clone() };
    let trainings = DbTrainingRepository { db: db.clone() };
    let user = users
        .create(&new_user("ana", "ana@dti.example"))
        .await
        .unwrap();
    let training = trainings
        .create(&test_training(0, day(2025, 7, 1), Default::default()).fields)
        .await
        .unwrap();
    (user.id, training.id)
}

#[tokio::test]
async fn should_map_duplicate_ledger_insert_to_kind_conflict() {
    let db = connect().await;
    let (user_id, training_id) = seed(&db).await;

    let assignments = DbAssignmentRepository { db: db.clone() };
    assignments.create(user_id, training_id).await.unwrap();
    let second = assignments.create(user_id, training_id).await;
    assert!(
        matches!(second, Err(TrainingServiceError::AlreadyAssigned)),
        "expected AlreadyAssigned, got {second:?}"
    );

    let enrollments = DbEnrollmentRepository { db: db.clone() };
    enrollments.create(user_id, training_id).await.unwrap();
    let second = enrollments.create(user_id, training_id).await;
    assert!(
        matches!(second, Err(TrainingServiceError::AlreadyEnrolled)),
        "expected AlreadyEnrolled, got {second:?}"
    );
    assert_eq!(enrollments.list(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn should_map_user_index_violations_to_the_colliding_field() {
    let db = connect().await;
    let users = DbUserRepository { db };
    users
        .create(&new_user("ana", "ana@dti.example"))
        .await
        .unwrap();

    let same_email = users.create(&new_user("bea", "ana@dti.example")).await;
    assert!(
        matches!(same_email, Err(TrainingServiceError::EmailTaken)),
        "expected EmailTaken, got {same_email:?}"
    );

    let same_username = users.create(&new_user("ana", "other@dti.example")).await;
    assert!(
        matches!(same_username, Err(TrainingServiceError::UsernameTaken)),
        "expected UsernameTaken, got {same_username:?}"
    );
}

#[tokio::test]
async fn should_store_password_with_profile_in_one_update() {
    let db = connect().await;
    let users = DbUserRepository { db };
    let mut user = users
        .create(&new_user("ana", "ana@dti.example"))
        .await
        .unwrap();

    user.profile.first_name = "Ana".to_owned();
    let kept = users.update_profile(&user, None).await.unwrap();
    assert_eq!(kept.profile.first_name, "Ana");
    assert_eq!(kept.password_hash, "hash");

    let changed = users.update_profile(&kept, Some("rehashed")).await.unwrap();
    assert_eq!(changed.password_hash, "rehashed");
    assert_eq!(changed.profile.first_name, "Ana");
}
