use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use dti_auth_types::identity::Identity;
use dti_domain::training::TrainingStatus;

use crate::error::TrainingServiceError;
use crate::handlers::assignment::{LedgerEntryResponse, entries_response};
use crate::handlers::{EntityId, FieldReader, Payload, created, deleted, success, unreadable};
use crate::state::AppState;
use crate::usecase::enrollment::CreateEnrollmentUseCase;
use crate::usecase::ledger::{
    DeleteLedgerEntryUseCase, GetLedgerEntryUseCase, LedgerKind, ListLedgerEntriesUseCase,
    UpdateLedgerEntryUseCase,
};

#[derive(Deserialize, Default)]
pub struct MyEnrollmentsQuery {
    pub status: Option<String>,
}

// ── POST /enrollments ────────────────────────────────────────────────────────

/// Enrolls the caller. Only `training_id` is read from the body.
pub async fn create_enrollment(
    identity: Identity,
    State(state): State<AppState>,
    Payload(body): Payload,
) -> Result<(StatusCode, Json<Value>), TrainingServiceError> {
    let mut r = FieldReader::new(&body);
    let training_id = r.id("training_id");
    r.finish()?;
    let Some(training_id) = training_id else {
        return Err(unreadable());
    };

    let uc = CreateEnrollmentUseCase {
        ledger: state.enrollment_repo(),
        trainings: state.training_repo(),
        users: state.user_repo(),
    };
    let entry = uc.execute(identity.user_id, training_id).await?;
    Ok(created("enrollment", LedgerEntryResponse::from(entry)))
}

// ── GET /enrollments ─────────────────────────────────────────────────────────

pub async fn list_enrollments(
    _identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = ListLedgerEntriesUseCase {
        ledger: state.enrollment_repo(),
        trainings: state.training_repo(),
        users: state.user_repo(),
    };
    let entries = uc.execute(None).await?;
    Ok(success("enrollments", entries_response(entries)))
}

// ── GET /enrollments/me ──────────────────────────────────────────────────────

/// The caller's enrollments, optionally only those whose training is currently
/// `status`.
pub async fn list_my_enrollments(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<MyEnrollmentsQuery>,
) -> Result<Json<Value>, TrainingServiceError> {
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse::<TrainingStatus>)
        .transpose()
        .map_err(|e| TrainingServiceError::field("status", e.to_string()))?;

    let uc = ListLedgerEntriesUseCase {
        ledger: state.enrollment_repo(),
        trainings: state.training_repo(),
        users: state.user_repo(),
    };
    let entries = match status {
        Some(status) => {
            uc.execute_with_status(identity.user_id, status, state.today())
                .await?
        }
        None => uc.execute(Some(identity.user_id)).await?,
    };
    Ok(success("enrollments", entries_response(entries)))
}

// ── GET /enrollments/{id} ────────────────────────────────────────────────────

pub async fn get_enrollment(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = GetLedgerEntryUseCase {
        kind: LedgerKind::Enrollment,
        ledger: state.enrollment_repo(),
        trainings: state.training_repo(),
        users: state.user_repo(),
    };
    let entry = uc.execute(id).await?;
    Ok(success("enrollment", LedgerEntryResponse::from(entry)))
}

// ── PUT /enrollments/{id} ────────────────────────────────────────────────────

pub async fn update_enrollment(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    Payload(body): Payload,
) -> Result<Json<Value>, TrainingServiceError> {
    let mut r = FieldReader::new(&body);
    let user_id = r.opt_id("user_id");
    let training_id = r.opt_id("training_id");
    r.finish()?;

    let uc = UpdateLedgerEntryUseCase {
        kind: LedgerKind::Enrollment,
        ledger: state.enrollment_repo(),
        trainings: state.training_repo(),
        users: state.user_repo(),
    };
    let entry = uc.execute(id, user_id, training_id, state.today()).await?;
    Ok(success("enrollment", LedgerEntryResponse::from(entry)))
}

// ── DELETE /enrollments/{id} ─────────────────────────────────────────────────

pub async fn delete_enrollment(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = DeleteLedgerEntryUseCase {
        kind: LedgerKind::Enrollment,
        ledger: state.enrollment_repo(),
    };
    uc.execute(id).await?;
    Ok(deleted("enrollment deleted"))
}
