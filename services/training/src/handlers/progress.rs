use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use dti_auth_types::identity::Identity;
use dti_domain::progress::ProgressStatus;

use crate::domain::types::Progress;
use crate::error::TrainingServiceError;
use crate::handlers::{EntityId, FieldReader, Payload, created, deleted, success, unreadable};
use crate::state::AppState;
use crate::usecase::progress::{
    CreateProgressUseCase, DeleteProgressUseCase, GetProgressUseCase, ListProgressUseCase,
    ProgressPatch, ProgressRefs, UpdateProgressUseCase,
};

#[derive(Serialize)]
pub struct ProgressResponse {
    pub id: i32,
    pub employee_id: i32,
    pub training_id: i32,
    pub lap_id: i32,
    pub status: ProgressStatus,
    pub status_display: &'static str,
}

impl From<Progress> for ProgressResponse {
    fn from(p: Progress) -> Self {
        Self {
            id: p.id,
            employee_id: p.employee_id,
            training_id: p.training_id,
            lap_id: p.lap_id,
            status: p.status,
            status_display: p.status.label(),
        }
    }
}

fn progress_response(rows: Vec<Progress>) -> Vec<ProgressResponse> {
    rows.into_iter().map(Into::into).collect()
}

// ── POST /progress ───────────────────────────────────────────────────────────

pub async fn create_progress(
    _identity: Identity,
    State(state): State<AppState>,
    Payload(body): Payload,
) -> Result<(StatusCode, Json<Value>), TrainingServiceError> {
    let mut r = FieldReader::new(&body);
    let employee_id = r.id("employee_id");
    let training_id = r.id("training_id");
    let lap_id = r.id("lap_id");
    let status = r.opt_choice("status");
    r.finish()?;
    let (Some(employee_id), Some(training_id), Some(lap_id)) = (employee_id, training_id, lap_id)
    else {
        return Err(unreadable());
    };

    let uc = CreateProgressUseCase {
        progress: state.progress_repo(),
        trainings: state.training_repo(),
        users: state.user_repo(),
        laps: state.lap_repo(),
    };
    let refs = ProgressRefs {
        employee_id,
        training_id,
        lap_id,
    };
    let progress = uc.execute(refs, status).await?;
    Ok(created("progress", ProgressResponse::from(progress)))
}

// ── GET /progress ────────────────────────────────────────────────────────────

pub async fn list_progress(
    _identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = ListProgressUseCase {
        progress: state.progress_repo(),
    };
    Ok(success("progress", progress_response(uc.execute(None).await?)))
}

// ── GET /progress/me ─────────────────────────────────────────────────────────

pub async fn list_my_progress(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = ListProgressUseCase {
        progress: state.progress_repo(),
    };
    let rows = uc.execute(Some(identity.user_id)).await?;
    Ok(success("progress", progress_response(rows)))
}

// ── GET /progress/{id} ───────────────────────────────────────────────────────

pub async fn get_progress(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = GetProgressUseCase {
        progress: state.progress_repo(),
    };
    let progress = uc.execute(id).await?;
    Ok(success("progress", ProgressResponse::from(progress)))
}

// ── PUT /progress/{id} ───────────────────────────────────────────────────────

pub async fn update_progress(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    Payload(body): Payload,
) -> Result<Json<Value>, TrainingServiceError> {
    let mut r = FieldReader::new(&body);
    let patch = ProgressPatch {
        employee_id: r.opt_id("employee_id"),
        training_id: r.opt_id("training_id"),
        lap_id: r.opt_id("lap_id"),
        status: r.opt_choice("status"),
    };
    r.finish()?;

    let uc = UpdateProgressUseCase {
        progress: state.progress_repo(),
        trainings: state.training_repo(),
        users: state.user_repo(),
        laps: state.lap_repo(),
    };
    let progress = uc.execute(id, patch).await?;
    Ok(success("progress", ProgressResponse::from(progress)))
}

// ── DELETE /progress/{id} ────────────────────────────────────────────────────

pub async fn delete_progress(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = DeleteProgressUseCase {
        progress: state.progress_repo(),
    };
    uc.execute(id).await?;
    Ok(deleted("progress deleted"))
}
