use dti_domain::training::TrainingStatus;
use dti_domain::user::UserRole;
use dti_training::error::TrainingServiceError;
use dti_training::usecase::assignment::CreateAssignmentUseCase;
use dti_training::usecase::enrollment::CreateEnrollmentUseCase;
use dti_training::usecase::ledger::{
    LedgerKind, ListLedgerEntriesUseCase, TrainingMembersUseCase, UpdateLedgerEntryUseCase,
};

use crate::helpers::{
    MockLedgerRepo, MockTrainingRepo, MockUserRepo, day, test_training, test_user,
};

fn users() -> MockUserRepo {
    MockUserRepo::new(vec![
        test_user(1, "ana", UserRole::Employee),
        test_user(2, "ben", UserRole::Employee),
        test_user(3, "cora", UserRole::Supervisor),
    ])
}

fn assign(
    ledger: &MockLedgerRepo,
    trainings: &MockTrainingRepo,
) -> CreateAssignmentUseCase<MockLedgerRepo, MockTrainingRepo, MockUserRepo> {
    CreateAssignmentUseCase {
        ledger: ledger.clone(),
        trainings: trainings.clone(),
        users: users(),
    }
}

fn enroll(
    ledger: &MockLedgerRepo,
    trainings: &MockTrainingRepo,
) -> CreateEnrollmentUseCase<MockLedgerRepo, MockTrainingRepo, MockUserRepo> {
    CreateEnrollmentUseCase {
        ledger: ledger.clone(),
        trainings: trainings.clone(),
        users: users(),
    }
}

// ── CreateAssignmentUseCase ──────────────────────────────────────────────────

#[tokio::test]
async fn should_assign_user_to_scheduled_training() {
    let ledger = MockLedgerRepo::new(LedgerKind::Assignment);
    let trainings = MockTrainingRepo::new(vec![test_training(
        10,
        day(2025, 6, 15),
        TrainingStatus::Scheduled,
    )]);

    let detail = assign(&ledger, &trainings)
        .execute(1, 10, day(2025, 6, 10))
        .await
        .unwrap();

    assert_eq!(detail.user.username, "ana");
    assert_eq!(detail.training.id, 10);
    assert_eq!(ledger.count(), 1);
}

#[tokio::test]
async fn should_refuse_assignment_once_training_date_arrives() {
    let ledger = MockLedgerRepo::new(LedgerKind::Assignment);
    let trainings = MockTrainingRepo::new(vec![test_training(
        10,
        day(2025, 6, 15),
        TrainingStatus::Scheduled,
    )]);
    let uc = assign(&ledger, &trainings);

    let on_the_day = uc.execute(1, 10, day(2025, 6, 15)).await;
    assert!(
        matches!(
            on_the_day,
            Err(TrainingServiceError::TrainingClosed(TrainingStatus::Ongoing))
        ),
        "expected TrainingClosed(Ongoing), got {on_the_day:?}"
    );

    let after = uc.execute(1, 10, day(2025, 6, 16)).await;
    assert!(
        matches!(
            after,
            Err(TrainingServiceError::TrainingClosed(TrainingStatus::Completed))
        ),
        "expected TrainingClosed(Completed), got {after:?}"
    );
    assert_eq!(ledger.count(), 0);
}

#[tokio::test]
async fn should_refuse_assignment_when_stored_status_is_closed() {
    let ledger = MockLedgerRepo::new(LedgerKind::Assignment);
    let trainings = MockTrainingRepo::new(vec![test_training(
        10,
        day(2025, 6, 15),
        TrainingStatus::Completed,
    )]);

    let result = assign(&ledger, &trainings)
        .execute(1, 10, day(2025, 6, 1))
        .await;
    assert!(
        matches!(
            result,
            Err(TrainingServiceError::TrainingClosed(TrainingStatus::Completed))
        ),
        "expected TrainingClosed(Completed), got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_second_assignment_of_same_pair() {
    let ledger = MockLedgerRepo::new(LedgerKind::Assignment);
    let trainings = MockTrainingRepo::new(vec![test_training(
        10,
        day(2025, 6, 15),
        TrainingStatus::Scheduled,
    )]);
    let uc = assign(&ledger, &trainings);
    let today = day(2025, 6, 10);

    uc.execute(1, 10, today).await.unwrap();
    let second = uc.execute(1, 10, today).await;

    assert!(
        matches!(second, Err(TrainingServiceError::AlreadyAssigned)),
        "expected AlreadyAssigned, got {second:?}"
    );
    assert_eq!(ledger.count(), 1);
}

#[tokio::test]
async fn should_report_missing_training_before_missing_user() {
    let ledger = MockLedgerRepo::new(LedgerKind::Assignment);
    let trainings = MockTrainingRepo::new(vec![test_training(
        10,
        day(2025, 6, 15),
        TrainingStatus::Scheduled,
    )]);
    let uc = assign(&ledger, &trainings);
    let today = day(2025, 6, 10);

    let no_training = uc.execute(99, 404, today).await;
    assert!(matches!(
        no_training,
        Err(TrainingServiceError::TrainingNotFound)
    ));

    let no_user = uc.execute(99, 10, today).await;
    assert!(matches!(no_user, Err(TrainingServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_refuse_assigning_non_employee() {
    let ledger = MockLedgerRepo::new(LedgerKind::Assignment);
    let trainings = MockTrainingRepo::new(vec![test_training(
        10,
        day(2025, 6, 15),
        TrainingStatus::Scheduled,
    )]);

    let result = assign(&ledger, &trainings)
        .execute(3, 10, day(2025, 6, 10))
        .await;

    let Err(TrainingServiceError::Validation(errors)) = result else {
        panic!("expected Validation, got {result:?}");
    };
    assert_eq!(
        errors.get("user_id").unwrap(),
        ["User \"cora\" does not have the employee role."]
    );
    assert_eq!(ledger.count(), 0);
}

// ── CreateEnrollmentUseCase ──────────────────────────────────────────────────

#[tokio::test]
async fn should_enroll_in_completed_training() {
    let ledger = MockLedgerRepo::new(LedgerKind::Enrollment);
    let trainings = MockTrainingRepo::new(vec![test_training(
        10,
        day(2025, 1, 1),
        TrainingStatus::Completed,
    )]);

    let detail = enroll(&ledger, &trainings).execute(2, 10).await.unwrap();

    assert_eq!(detail.user.id, 2);
    assert_eq!(detail.training.fields.status, TrainingStatus::Completed);
}

#[tokio::test]
async fn should_reject_second_enrollment_of_same_pair() {
    let ledger = MockLedgerRepo::new(LedgerKind::Enrollment);
    let trainings = MockTrainingRepo::new(vec![test_training(
        10,
        day(2025, 6, 15),
        TrainingStatus::Scheduled,
    )]);
    let uc = enroll(&ledger, &trainings);

    uc.execute(1, 10).await.unwrap();
    let second = uc.execute(1, 10).await;

    assert!(
        matches!(second, Err(TrainingServiceError::AlreadyEnrolled)),
        "expected AlreadyEnrolled, got {second:?}"
    );
    assert_eq!(ledger.count(), 1);
}

#[tokio::test]
async fn should_refuse_enrollment_by_non_employee() {
    let ledger = MockLedgerRepo::new(LedgerKind::Enrollment);
    let trainings = MockTrainingRepo::new(vec![test_training(
        10,
        day(2025, 6, 15),
        TrainingStatus::Scheduled,
    )]);

    let result = enroll(&ledger, &trainings).execute(3, 10).await;

    let Err(TrainingServiceError::Validation(errors)) = result else {
        panic!("expected Validation, got {result:?}");
    };
    assert!(errors.get("user_id").is_some());
    assert_eq!(ledger.count(), 0);
}

// ── UpdateLedgerEntryUseCase ─────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_update_onto_existing_pair() {
    let ledger = MockLedgerRepo::new(LedgerKind::Assignment);
    let trainings = MockTrainingRepo::new(vec![test_training(
        10,
        day(2025, 6, 15),
        TrainingStatus::Scheduled,
    )]);
    let today = day(2025, 6, 10);
    let create = assign(&ledger, &trainings);
    create.execute(1, 10, today).await.unwrap();
    let second = create.execute(2, 10, today).await.unwrap();

    let uc = UpdateLedgerEntryUseCase {
        kind: LedgerKind::Assignment,
        ledger: ledger.clone(),
        trainings: trainings.clone(),
        users: users(),
    };
    let result = uc.execute(second.id, Some(1), None, today).await;

    assert!(
        matches!(result, Err(TrainingServiceError::AlreadyAssigned)),
        "expected AlreadyAssigned, got {result:?}"
    );
}

#[tokio::test]
async fn should_gate_only_assignments_when_repointing_training() {
    let trainings = MockTrainingRepo::new(vec![
        test_training(10, day(2025, 6, 15), TrainingStatus::Scheduled),
        test_training(11, day(2025, 6, 1), TrainingStatus::Completed),
    ]);
    let today = day(2025, 6, 10);

    let assignments = MockLedgerRepo::new(LedgerKind::Assignment);
    let entry = assign(&assignments, &trainings)
        .execute(1, 10, today)
        .await
        .unwrap();
    let update = UpdateLedgerEntryUseCase {
        kind: LedgerKind::Assignment,
        ledger: assignments.clone(),
        trainings: trainings.clone(),
        users: users(),
    };
    let result = update.execute(entry.id, None, Some(11), today).await;
    assert!(
        matches!(result, Err(TrainingServiceError::TrainingClosed(_))),
        "expected TrainingClosed, got {result:?}"
    );

    let enrollments = MockLedgerRepo::new(LedgerKind::Enrollment);
    let entry = enroll(&enrollments, &trainings).execute(1, 10).await.unwrap();
    let update = UpdateLedgerEntryUseCase {
        kind: LedgerKind::Enrollment,
        ledger: enrollments.clone(),
        trainings: trainings.clone(),
        users: users(),
    };
    let moved = update
        .execute(entry.id, None, Some(11), today)
        .await
        .unwrap();
    assert_eq!(moved.training.id, 11);
}

#[tokio::test]
async fn should_report_unknown_entry_with_kind_specific_error() {
    let uc = UpdateLedgerEntryUseCase {
        kind: LedgerKind::Enrollment,
        ledger: MockLedgerRepo::new(LedgerKind::Enrollment),
        trainings: MockTrainingRepo::new(vec![]),
        users: users(),
    };
    let result = uc.execute(7, Some(1), None, day(2025, 6, 10)).await;
    assert!(matches!(
        result,
        Err(TrainingServiceError::EnrollmentNotFound)
    ));
}

#[tokio::test]
async fn should_refuse_repointing_entry_to_non_employee() {
    let ledger = MockLedgerRepo::new(LedgerKind::Enrollment);
    let trainings = MockTrainingRepo::new(vec![test_training(
        10,
        day(2025, 6, 15),
        TrainingStatus::Scheduled,
    )]);
    let entry = enroll(&ledger, &trainings).execute(1, 10).await.unwrap();
    let uc = UpdateLedgerEntryUseCase {
        kind: LedgerKind::Enrollment,
        ledger: ledger.clone(),
        trainings: trainings.clone(),
        users: users(),
    };

    let result = uc.execute(entry.id, Some(3), None, day(2025, 6, 10)).await;

    assert!(
        matches!(result, Err(TrainingServiceError::Validation(_))),
        "expected Validation, got {result:?}"
    );
}

// ── Listing ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_filter_own_enrollments_by_current_status() {
    let ledger = MockLedgerRepo::new(LedgerKind::Enrollment);
    let trainings = MockTrainingRepo::new(vec![
        test_training(10, day(2025, 6, 1), TrainingStatus::Scheduled),
        test_training(11, day(2025, 6, 10), TrainingStatus::Scheduled),
        test_training(12, day(2025, 6, 20), TrainingStatus::Scheduled),
    ]);
    let create = enroll(&ledger, &trainings);
    for training_id in [10, 11, 12] {
        create.execute(1, training_id).await.unwrap();
    }
    create.execute(2, 10).await.unwrap();

    let uc = ListLedgerEntriesUseCase {
        ledger: ledger.clone(),
        trainings: trainings.clone(),
        users: users(),
    };
    let today = day(2025, 6, 10);

    let completed = uc
        .execute_with_status(1, TrainingStatus::Completed, today)
        .await
        .unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].training.id, 10);

    let scheduled = uc
        .execute_with_status(1, TrainingStatus::Scheduled, today)
        .await
        .unwrap();
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].training.id, 12);

    let everyone = uc.execute(None).await.unwrap();
    assert_eq!(everyone.len(), 4);
}

#[tokio::test]
async fn should_list_training_members() {
    let ledger = MockLedgerRepo::new(LedgerKind::Assignment);
    let trainings = MockTrainingRepo::new(vec![test_training(
        10,
        day(2025, 6, 15),
        TrainingStatus::Scheduled,
    )]);
    let create = assign(&ledger, &trainings);
    let today = day(2025, 6, 10);
    create.execute(1, 10, today).await.unwrap();
    create.execute(2, 10, today).await.unwrap();

    let uc = TrainingMembersUseCase {
        ledger: ledger.clone(),
        trainings: trainings.clone(),
        users: users(),
    };
    let mut names: Vec<String> = uc
        .execute(10)
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    names.sort();
    assert_eq!(names, vec!["ana", "ben"]);

    let missing = uc.execute(404).await;
    assert!(matches!(missing, Err(TrainingServiceError::TrainingNotFound)));
}
