use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use dti_auth_types::identity::Identity;

use crate::domain::types::LedgerEntryDetail;
use crate::error::TrainingServiceError;
use crate::handlers::training::TrainingResponse;
use crate::handlers::user::UserSummaryResponse;
use crate::handlers::{EntityId, FieldReader, Payload, created, deleted, success, unreadable};
use crate::state::AppState;
use crate::usecase::assignment::CreateAssignmentUseCase;
use crate::usecase::ledger::{
    DeleteLedgerEntryUseCase, GetLedgerEntryUseCase, LedgerKind, ListLedgerEntriesUseCase,
    UpdateLedgerEntryUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

/// Assignment or enrollment row with its user and training denormalised.
#[derive(Serialize)]
pub struct LedgerEntryResponse {
    pub id: i32,
    pub user_id: i32,
    pub training_id: i32,
    pub user: UserSummaryResponse,
    pub training: TrainingResponse,
    #[serde(serialize_with = "dti_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<LedgerEntryDetail> for LedgerEntryResponse {
    fn from(e: LedgerEntryDetail) -> Self {
        Self {
            id: e.id,
            user_id: e.user.id,
            training_id: e.training.id,
            user: e.user.into(),
            training: e.training.into(),
            created_at: e.created_at,
        }
    }
}

pub fn entries_response(entries: Vec<LedgerEntryDetail>) -> Vec<LedgerEntryResponse> {
    entries.into_iter().map(Into::into).collect()
}

// ── POST /assignments ────────────────────────────────────────────────────────

pub async fn create_assignment(
    _identity: Identity,
    State(state): State<AppState>,
    Payload(body): Payload,
) -> Result<(StatusCode, Json<Value>), TrainingServiceError> {
    let mut r = FieldReader::new(&body);
    let user_id = r.id("user_id");
    let training_id = r.id("training_id");
    r.finish()?;
    let (Some(user_id), Some(training_id)) = (user_id, training_id) else {
        return Err(unreadable());
    };

    let uc = CreateAssignmentUseCase {
        ledger: state.assignment_repo(),
        trainings: state.training_repo(),
        users: state.user_repo(),
    };
    let entry = uc.execute(user_id, training_id, state.today()).await?;
    Ok(created("assignment", LedgerEntryResponse::from(entry)))
}

// ── GET /assignments ─────────────────────────────────────────────────────────

pub async fn list_assignments(
    _identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = ListLedgerEntriesUseCase {
        ledger: state.assignment_repo(),
        trainings: state.training_repo(),
        users: state.user_repo(),
    };
    let entries = uc.execute(None).await?;
    Ok(success("assignments", entries_response(entries)))
}

// ── GET /assignments/me ──────────────────────────────────────────────────────

pub async fn list_my_assignments(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = ListLedgerEntriesUseCase {
        ledger: state.assignment_repo(),
        trainings: state.training_repo(),
        users: state.user_repo(),
    };
    let entries = uc.execute(Some(identity.user_id)).await?;
    Ok(success("assignments", entries_response(entries)))
}

// ── GET /assignments/{id} ────────────────────────────────────────────────────

pub async fn get_assignment(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = GetLedgerEntryUseCase {
        kind: LedgerKind::Assignment,
        ledger: state.assignment_repo(),
        trainings: state.training_repo(),
        users: state.user_repo(),
    };
    let entry = uc.execute(id).await?;
    Ok(success("assignment", LedgerEntryResponse::from(entry)))
}

// ── PUT /assignments/{id} ────────────────────────────────────────────────────

pub async fn update_assignment(
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
        kind: LedgerKind::Assignment,
        ledger: state.assignment_repo(),
        trainings: state.training_repo(),
        users: state.user_repo(),
    };
    let entry = uc.execute(id, user_id, training_id, state.today()).await?;
    Ok(success("assignment", LedgerEntryResponse::from(entry)))
}

// ── DELETE /assignments/{id} ─────────────────────────────────────────────────

pub async fn delete_assignment(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = DeleteLedgerEntryUseCase {
        kind: LedgerKind::Assignment,
        ledger: state.assignment_repo(),
    };
    uc.execute(id).await?;
    Ok(deleted("assignment deleted"))
}
