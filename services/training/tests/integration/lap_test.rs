use dti_domain::lap::LapStatus;
use dti_domain::progress::ProgressStatus;
use dti_domain::training::TrainingStatus;
use dti_domain::user::UserRole;
use dti_training::error::TrainingServiceError;
use dti_training::usecase::lap::{CreateLapUseCase, LapPatch, UpdateLapUseCase};
use dti_training::usecase::progress::{
    CreateProgressUseCase, ProgressByLapUseCase, ProgressPatch, ProgressRefs,
    UpdateProgressUseCase,
};

use crate::helpers::{
    MockLapRepo, MockProgressRepo, MockTrainingRepo, MockUserRepo, day, lap_texts, test_training,
    test_user,
};

fn users() -> MockUserRepo {
    MockUserRepo::new(vec![
        test_user(1, "ana", UserRole::Employee),
        test_user(2, "cora", UserRole::Supervisor),
    ])
}

fn trainings() -> MockTrainingRepo {
    MockTrainingRepo::new(vec![test_training(
        10,
        day(2025, 6, 1),
        TrainingStatus::Completed,
    )])
}

async fn submitted_lap(laps: &MockLapRepo) -> i32 {
    let uc = CreateLapUseCase {
        laps: laps.clone(),
        trainings: trainings(),
        users: users(),
    };
    uc.execute(1, 10, lap_texts(), day(2025, 6, 5))
        .await
        .unwrap()
        .id
}

// ── CreateLapUseCase ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_submit_lap_awaiting_evaluation() {
    let laps = MockLapRepo::default();
    let uc = CreateLapUseCase {
        laps: laps.clone(),
        trainings: trainings(),
        users: users(),
    };

    let lap = uc
        .execute(1, 10, lap_texts(), day(2025, 6, 5))
        .await
        .unwrap();

    assert_eq!(lap.status, LapStatus::ToEvaluate);
    assert_eq!(lap.submitted_on, day(2025, 6, 5));
    assert_eq!(lap.texts.goal, "Ship the service");
}

#[tokio::test]
async fn should_report_every_unresolved_lap_reference() {
    let uc = CreateLapUseCase {
        laps: MockLapRepo::default(),
        trainings: trainings(),
        users: users(),
    };

    let result = uc.execute(404, 405, lap_texts(), day(2025, 6, 5)).await;
    let Err(TrainingServiceError::Validation(errors)) = result else {
        panic!("expected Validation, got {result:?}");
    };
    assert_eq!(
        errors.get("employee_id").unwrap(),
        ["Invalid pk \"404\" - object does not exist."]
    );
    assert!(errors.get("training_id").is_some());
}

#[tokio::test]
async fn should_refuse_lap_and_progress_for_non_employee() {
    let laps = MockLapRepo::default();
    let lap_id = submitted_lap(&laps).await;

    let create_lap = CreateLapUseCase {
        laps: laps.clone(),
        trainings: trainings(),
        users: users(),
    };
    let result = create_lap.execute(2, 10, lap_texts(), day(2025, 6, 5)).await;
    let Err(TrainingServiceError::Validation(errors)) = result else {
        panic!("expected Validation, got {result:?}");
    };
    assert_eq!(
        errors.get("employee_id").unwrap(),
        ["User \"cora\" does not have the employee role."]
    );
    assert!(errors.get("training_id").is_none());

    let create_progress = CreateProgressUseCase {
        progress: MockProgressRepo::default(),
        trainings: trainings(),
        users: users(),
        laps: laps.clone(),
    };
    let refs = ProgressRefs {
        employee_id: 2,
        training_id: 10,
        lap_id,
    };
    let result = create_progress.execute(refs, None).await;
    let Err(TrainingServiceError::Validation(errors)) = result else {
        panic!("expected Validation, got {result:?}");
    };
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["employee_id"]);
}

// ── UpdateLapUseCase ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_keep_evaluated_lap_terminal() {
    let laps = MockLapRepo::default();
    let id = submitted_lap(&laps).await;
    let uc = UpdateLapUseCase { laps: laps.clone() };

    let approved = uc
        .execute(
            id,
            LapPatch {
                status: Some(LapStatus::Approved),
                ..LapPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(approved.status, LapStatus::Approved);

    let reopened = uc
        .execute(
            id,
            LapPatch {
                status: Some(LapStatus::ToEvaluate),
                ..LapPatch::default()
            },
        )
        .await;
    assert!(
        matches!(reopened, Err(TrainingServiceError::LapFinalized(_))),
        "expected LapFinalized, got {reopened:?}"
    );

    let stored = laps.laps.lock().unwrap()[0].clone();
    assert_eq!(stored.status, LapStatus::Approved);
}

#[tokio::test]
async fn should_accept_resent_status_and_text_edits_after_evaluation() {
    let laps = MockLapRepo::default();
    let id = submitted_lap(&laps).await;
    let uc = UpdateLapUseCase { laps: laps.clone() };
    uc.execute(
        id,
        LapPatch {
            status: Some(LapStatus::Rejected),
            ..LapPatch::default()
        },
    )
    .await
    .unwrap();

    let lap = uc
        .execute(
            id,
            LapPatch {
                status: Some(LapStatus::Rejected),
                goal: Some("Revised goal".to_owned()),
                ..LapPatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(lap.status, LapStatus::Rejected);
    assert_eq!(lap.texts.goal, "Revised goal");
    assert_eq!(lap.texts.plan, "Pair on reviews");
}

// ── Progress ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_track_progress_independently_of_lap_status() {
    let laps = MockLapRepo::default();
    let lap_id = submitted_lap(&laps).await;
    let progress = MockProgressRepo::default();

    let create = CreateProgressUseCase {
        progress: progress.clone(),
        trainings: trainings(),
        users: users(),
        laps: laps.clone(),
    };
    let refs = ProgressRefs {
        employee_id: 1,
        training_id: 10,
        lap_id,
    };
    let row = create.execute(refs, None).await.unwrap();
    assert_eq!(row.status, ProgressStatus::ToEvaluate);

    let update = UpdateProgressUseCase {
        progress: progress.clone(),
        trainings: trainings(),
        users: users(),
        laps: laps.clone(),
    };
    let row = update
        .execute(
            row.id,
            ProgressPatch {
                status: Some(ProgressStatus::LapApproved),
                ..ProgressPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(row.status, ProgressStatus::LapApproved);
    assert_eq!(laps.laps.lock().unwrap()[0].status, LapStatus::ToEvaluate);
}

#[tokio::test]
async fn should_reject_progress_with_unknown_lap() {
    let create = CreateProgressUseCase {
        progress: MockProgressRepo::default(),
        trainings: trainings(),
        users: users(),
        laps: MockLapRepo::default(),
    };
    let refs = ProgressRefs {
        employee_id: 1,
        training_id: 10,
        lap_id: 77,
    };

    let result = create.execute(refs, Some(ProgressStatus::Successful)).await;
    let Err(TrainingServiceError::Validation(errors)) = result else {
        panic!("expected Validation, got {result:?}");
    };
    assert!(errors.get("lap_id").is_some());
    assert!(errors.get("employee_id").is_none());
}

#[tokio::test]
async fn should_list_progress_for_lap_or_report_none() {
    let laps = MockLapRepo::default();
    let lap_id = submitted_lap(&laps).await;
    let progress = MockProgressRepo::default();
    let by_lap = ProgressByLapUseCase {
        progress: progress.clone(),
    };

    let empty = by_lap.execute(lap_id).await;
    assert!(
        matches!(empty, Err(TrainingServiceError::ProgressNotFound)),
        "expected ProgressNotFound, got {empty:?}"
    );

    let create = CreateProgressUseCase {
        progress: progress.clone(),
        trainings: trainings(),
        users: users(),
        laps: laps.clone(),
    };
    let refs = ProgressRefs {
        employee_id: 1,
        training_id: 10,
        lap_id,
    };
    create.execute(refs, None).await.unwrap();
    create
        .execute(refs, Some(ProgressStatus::TrainingAttended))
        .await
        .unwrap();

    let rows = by_lap.execute(lap_id).await.unwrap();
    assert_eq!(rows.len(), 2);
}
