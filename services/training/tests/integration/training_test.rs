use dti_domain::training::{DateRange, TrainingCategory, TrainingStatus, TrainingType};
use dti_training::domain::types::Training;
use dti_training::error::TrainingServiceError;
use dti_training::usecase::training::{
    CreateTrainingUseCase, DeleteTrainingUseCase, ListTrainingsUseCase, TrainingInput,
    UpdateTrainingUseCase,
};

use crate::helpers::{MockTrainingRepo, day, test_training};

fn input(title: &str) -> TrainingInput {
    TrainingInput {
        title: title.to_owned(),
        venue: "Room 4".to_owned(),
        date: day(2025, 6, 15),
        training_type: TrainingType::Financial,
        category: TrainingCategory::Optional,
        status: None,
    }
}

#[tokio::test]
async fn should_create_training_as_scheduled() {
    let repo = MockTrainingRepo::new(vec![]);
    let uc = CreateTrainingUseCase { repo: repo.clone() };

    let training = uc.execute(input("Budgeting")).await.unwrap();

    assert_eq!(training.fields.status, TrainingStatus::Scheduled);
    assert_eq!(repo.trainings.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reconcile_statuses_as_clock_advances() {
    let repo = MockTrainingRepo::new(vec![test_training(
        1,
        day(2025, 6, 15),
        TrainingStatus::Scheduled,
    )]);
    let uc = ListTrainingsUseCase { repo: repo.clone() };
    let status_on = |listed: Vec<Training>| listed[0].fields.status;

    let before = uc
        .execute(DateRange::default(), day(2025, 6, 10))
        .await
        .unwrap();
    assert_eq!(status_on(before), TrainingStatus::Scheduled);

    let during = uc
        .execute(DateRange::default(), day(2025, 6, 15))
        .await
        .unwrap();
    assert_eq!(status_on(during), TrainingStatus::Ongoing);

    let after = uc
        .execute(DateRange::default(), day(2025, 6, 16))
        .await
        .unwrap();
    assert_eq!(status_on(after), TrainingStatus::Completed);
}

#[tokio::test]
async fn should_filter_listing_by_inclusive_date_range() {
    let repo = MockTrainingRepo::new(vec![
        test_training(1, day(2025, 5, 31), TrainingStatus::Completed),
        test_training(2, day(2025, 6, 1), TrainingStatus::Completed),
        test_training(3, day(2025, 6, 30), TrainingStatus::Scheduled),
        test_training(4, day(2025, 7, 1), TrainingStatus::Scheduled),
    ]);
    let uc = ListTrainingsUseCase { repo };
    let range = DateRange {
        start: Some(day(2025, 6, 1)),
        end: Some(day(2025, 6, 30)),
    };

    let ids: Vec<i32> = uc
        .execute(range, day(2025, 6, 10))
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![2, 3]);
}

#[tokio::test]
async fn should_keep_status_when_update_omits_it() {
    let repo = MockTrainingRepo::new(vec![test_training(
        1,
        day(2025, 6, 1),
        TrainingStatus::Completed,
    )]);
    let uc = UpdateTrainingUseCase { repo };

    let updated = uc.execute(1, input("Renamed")).await.unwrap();

    assert_eq!(updated.fields.title, "Renamed");
    assert_eq!(updated.fields.date, day(2025, 6, 15));
    assert_eq!(updated.fields.status, TrainingStatus::Completed);
}

#[tokio::test]
async fn should_report_missing_training_on_update_and_delete() {
    let repo = MockTrainingRepo::new(vec![]);

    let update = UpdateTrainingUseCase { repo: repo.clone() };
    let result = update.execute(9, input("Nope")).await;
    assert!(matches!(result, Err(TrainingServiceError::TrainingNotFound)));

    let delete = DeleteTrainingUseCase { repo };
    let result = delete.execute(9).await;
    assert!(matches!(result, Err(TrainingServiceError::TrainingNotFound)));
}
