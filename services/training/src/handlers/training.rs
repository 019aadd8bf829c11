use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use dti_auth_types::identity::Identity;
use dti_core::serde::parse_date;
use dti_domain::training::{DateRange, TrainingCategory, TrainingStatus, TrainingType};

use crate::domain::types::Training;
use crate::error::TrainingServiceError;
use crate::handlers::user::UserSummaryResponse;
use crate::handlers::{EntityId, FieldReader, Payload, created, deleted, success, unreadable};
use crate::state::AppState;
use crate::usecase::ledger::TrainingMembersUseCase;
use crate::usecase::training::{
    CreateTrainingUseCase, DeleteTrainingUseCase, GetTrainingUseCase, ListTrainingsUseCase,
    TrainingInput, UpdateTrainingUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct TrainingResponse {
    pub id: i32,
    pub title: String,
    pub venue: String,
    pub date: NaiveDate,
    pub training_type: TrainingType,
    pub category: TrainingCategory,
    pub status: TrainingStatus,
}

impl From<Training> for TrainingResponse {
    fn from(t: Training) -> Self {
        Self {
            id: t.id,
            title: t.fields.title,
            venue: t.fields.venue,
            date: t.fields.date,
            training_type: t.fields.training_type,
            category: t.fields.category,
            status: t.fields.status,
        }
    }
}

// ── Request parsing ──────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct TrainingListQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl TrainingListQuery {
    /// Bounds that do not parse as dates are dropped.
    fn range(&self) -> DateRange {
        DateRange {
            start: self.start_date.as_deref().and_then(parse_date),
            end: self.end_date.as_deref().and_then(parse_date),
        }
    }
}

fn read_training(body: &serde_json::Map<String, Value>) -> Result<TrainingInput, TrainingServiceError> {
    let mut r = FieldReader::new(body);
    let title = r.text("title");
    let venue = r.text("venue");
    let date = r.date("date");
    let training_type = r.choice("training_type");
    let category = r.choice("category");
    let status = r.opt_choice("status");
    r.finish()?;

    let (Some(title), Some(venue), Some(date), Some(training_type), Some(category)) =
        (title, venue, date, training_type, category)
    else {
        return Err(unreadable());
    };
    Ok(TrainingInput {
        title,
        venue,
        date,
        training_type,
        category,
        status,
    })
}

// ── POST /trainings ──────────────────────────────────────────────────────────

pub async fn create_training(
    _identity: Identity,
    State(state): State<AppState>,
    Payload(body): Payload,
) -> Result<(StatusCode, Json<Value>), TrainingServiceError> {
    let input = read_training(&body)?;
    let uc = CreateTrainingUseCase {
        repo: state.training_repo(),
    };
    let training = uc.execute(input).await?;
    Ok(created("training", TrainingResponse::from(training)))
}

// ── GET /trainings ───────────────────────────────────────────────────────────

pub async fn list_trainings(
    _identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<TrainingListQuery>,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = ListTrainingsUseCase {
        repo: state.training_repo(),
    };
    let trainings = uc.execute(query.range(), state.today()).await?;
    let items: Vec<TrainingResponse> = trainings.into_iter().map(Into::into).collect();
    Ok(success("trainings", items))
}

// ── GET /trainings/{id} ──────────────────────────────────────────────────────

pub async fn get_training(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = GetTrainingUseCase {
        repo: state.training_repo(),
    };
    let training = uc.execute(id).await?;
    Ok(success("training", TrainingResponse::from(training)))
}

// ── PUT /trainings/{id} ──────────────────────────────────────────────────────

pub async fn update_training(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    Payload(body): Payload,
) -> Result<Json<Value>, TrainingServiceError> {
    let input = read_training(&body)?;
    let uc = UpdateTrainingUseCase {
        repo: state.training_repo(),
    };
    let training = uc.execute(id, input).await?;
    Ok(success("training", TrainingResponse::from(training)))
}

// ── DELETE /trainings/{id} ───────────────────────────────────────────────────

pub async fn delete_training(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = DeleteTrainingUseCase {
        repo: state.training_repo(),
    };
    uc.execute(id).await?;
    Ok(deleted("training deleted"))
}

// ── GET /trainings/{id}/assigned-users ───────────────────────────────────────

pub async fn get_assigned_users(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = TrainingMembersUseCase {
        ledger: state.assignment_repo(),
        trainings: state.training_repo(),
        users: state.user_repo(),
    };
    let users: Vec<UserSummaryResponse> =
        uc.execute(id).await?.into_iter().map(Into::into).collect();
    Ok(success("users", users))
}

// ── GET /trainings/{id}/enrolled-users ───────────────────────────────────────

pub async fn get_enrolled_users(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = TrainingMembersUseCase {
        ledger: state.enrollment_repo(),
        trainings: state.training_repo(),
        users: state.user_repo(),
    };
    let users: Vec<UserSummaryResponse> =
        uc.execute(id).await?.into_iter().map(Into::into).collect();
    Ok(success("users", users))
}
