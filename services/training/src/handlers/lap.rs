use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use dti_auth_types::identity::Identity;
use dti_domain::lap::LapStatus;

use crate::domain::types::{Lap, LapTexts};
use crate::error::TrainingServiceError;
use crate::handlers::progress::ProgressResponse;
use crate::handlers::{EntityId, FieldReader, Payload, created, deleted, success, unreadable};
use crate::state::AppState;
use crate::usecase::lap::{
    CreateLapUseCase, DeleteLapUseCase, GetLapUseCase, LapPatch, ListLapsUseCase,
    UpdateLapUseCase,
};
use crate::usecase::progress::ProgressByLapUseCase;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct LapResponse {
    pub id: i32,
    pub employee_id: i32,
    pub training_id: i32,
    pub submitted_on: NaiveDate,
    pub takeaways: String,
    pub goal: String,
    pub plan: String,
    pub timeframe: String,
    pub support: String,
    pub outcome: String,
    pub status: LapStatus,
    pub status_display: &'static str,
}

impl From<Lap> for LapResponse {
    fn from(l: Lap) -> Self {
        Self {
            id: l.id,
            employee_id: l.employee_id,
            training_id: l.training_id,
            submitted_on: l.submitted_on,
            takeaways: l.texts.takeaways,
            goal: l.texts.goal,
            plan: l.texts.plan,
            timeframe: l.texts.timeframe,
            support: l.texts.support,
            outcome: l.texts.outcome,
            status: l.status,
            status_display: l.status.label(),
        }
    }
}

fn laps_response(laps: Vec<Lap>) -> Vec<LapResponse> {
    laps.into_iter().map(Into::into).collect()
}

// ── POST /laps ───────────────────────────────────────────────────────────────

pub async fn create_lap(
    _identity: Identity,
    State(state): State<AppState>,
    Payload(body): Payload,
) -> Result<(StatusCode, Json<Value>), TrainingServiceError> {
    let mut r = FieldReader::new(&body);
    let employee_id = r.id("employee_id");
    let training_id = r.id("training_id");
    let takeaways = r.text("takeaways");
    let goal = r.text("goal");
    let plan = r.text("plan");
    let timeframe = r.text("timeframe");
    let support = r.text("support");
    let outcome = r.text("outcome");
    r.finish()?;
    let (
        Some(employee_id),
        Some(training_id),
        Some(takeaways),
        Some(goal),
        Some(plan),
        Some(timeframe),
        Some(support),
        Some(outcome),
    ) = (
        employee_id,
        training_id,
        takeaways,
        goal,
        plan,
        timeframe,
        support,
        outcome,
    )
    else {
        return Err(unreadable());
    };

    let uc = CreateLapUseCase {
        laps: state.lap_repo(),
        trainings: state.training_repo(),
        users: state.user_repo(),
    };
    let texts = LapTexts {
        takeaways,
        goal,
        plan,
        timeframe,
        support,
        outcome,
    };
    let lap = uc
        .execute(employee_id, training_id, texts, state.today())
        .await?;
    Ok(created("lap", LapResponse::from(lap)))
}

// ── GET /laps ────────────────────────────────────────────────────────────────

pub async fn list_laps(
    _identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = ListLapsUseCase {
        laps: state.lap_repo(),
    };
    Ok(success("laps", laps_response(uc.execute(None).await?)))
}

// ── GET /laps/me ─────────────────────────────────────────────────────────────

pub async fn list_my_laps(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = ListLapsUseCase {
        laps: state.lap_repo(),
    };
    let laps = uc.execute(Some(identity.user_id)).await?;
    Ok(success("laps", laps_response(laps)))
}

// ── GET /laps/{id} ───────────────────────────────────────────────────────────

pub async fn get_lap(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = GetLapUseCase {
        laps: state.lap_repo(),
    };
    let lap = uc.execute(id).await?;
    Ok(success("lap", LapResponse::from(lap)))
}

// ── PUT /laps/{id} ───────────────────────────────────────────────────────────

/// Evaluate and/or edit a plan. `submitted_on` cannot be changed.
pub async fn update_lap(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    Payload(body): Payload,
) -> Result<Json<Value>, TrainingServiceError> {
    let mut r = FieldReader::new(&body);
    let patch = LapPatch {
        status: r.opt_choice("status"),
        takeaways: r.opt_nonblank("takeaways"),
        goal: r.opt_nonblank("goal"),
        plan: r.opt_nonblank("plan"),
        timeframe: r.opt_nonblank("timeframe"),
        support: r.opt_nonblank("support"),
        outcome: r.opt_nonblank("outcome"),
    };
    r.finish()?;

    let uc = UpdateLapUseCase {
        laps: state.lap_repo(),
    };
    let lap = uc.execute(id, patch).await?;
    Ok(success("lap", LapResponse::from(lap)))
}

// ── DELETE /laps/{id} ────────────────────────────────────────────────────────

pub async fn delete_lap(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = DeleteLapUseCase {
        laps: state.lap_repo(),
    };
    uc.execute(id).await?;
    Ok(deleted("learning action plan deleted"))
}

// ── GET /laps/{id}/progress ──────────────────────────────────────────────────

pub async fn get_lap_progress(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = ProgressByLapUseCase {
        progress: state.progress_repo(),
    };
    let rows: Vec<ProgressResponse> = uc.execute(id).await?.into_iter().map(Into::into).collect();
    Ok(success("progress", rows))
}
