use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use dti_auth_types::identity::Identity;
use dti_domain::competency::Rating;

use crate::domain::types::{Competency, Ratings};
use crate::error::TrainingServiceError;
use crate::handlers::{EntityId, FieldReader, Payload, created, deleted, success, unreadable};
use crate::state::AppState;
use crate::usecase::competency::{
    CreateCompetencyUseCase, DeleteCompetencyUseCase, GetCompetencyUseCase,
    ListCompetenciesUseCase, RatingsPatch, UpdateCompetencyUseCase,
};

const RATING_FIELDS: [&str; 7] = [
    "global",
    "solutions",
    "networking",
    "delivering",
    "collaboration",
    "agility",
    "professionalism",
];

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RatingLabels {
    pub global: &'static str,
    pub solutions: &'static str,
    pub networking: &'static str,
    pub delivering: &'static str,
    pub collaboration: &'static str,
    pub agility: &'static str,
    pub professionalism: &'static str,
}

#[derive(Serialize)]
pub struct CompetencyResponse {
    pub id: i32,
    pub employee_id: i32,
    pub global: Rating,
    pub solutions: Rating,
    pub networking: Rating,
    pub delivering: Rating,
    pub collaboration: Rating,
    pub agility: Rating,
    pub professionalism: Rating,
    pub labels: RatingLabels,
    #[serde(serialize_with = "dti_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Competency> for CompetencyResponse {
    fn from(c: Competency) -> Self {
        let r = c.ratings;
        Self {
            id: c.id,
            employee_id: c.employee_id,
            global: r.global,
            solutions: r.solutions,
            networking: r.networking,
            delivering: r.delivering,
            collaboration: r.collaboration,
            agility: r.agility,
            professionalism: r.professionalism,
            labels: RatingLabels {
                global: r.global.label(),
                solutions: r.solutions.label(),
                networking: r.networking.label(),
                delivering: r.delivering.label(),
                collaboration: r.collaboration.label(),
                agility: r.agility.label(),
                professionalism: r.professionalism.label(),
            },
            created_at: c.created_at,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct CompetencyListQuery {
    pub employee_id: Option<String>,
}

// ── Request parsing ──────────────────────────────────────────────────────────

/// The seven ratings. `employee_id` is left for the caller to read.
fn read_ratings(r: &mut FieldReader<'_>) -> RatingsPatch {
    let [global, solutions, networking, delivering, collaboration, agility, professionalism] =
        RATING_FIELDS.map(|name| r.opt_rating(name));
    RatingsPatch {
        employee_id: None,
        global,
        solutions,
        networking,
        delivering,
        collaboration,
        agility,
        professionalism,
    }
}

// ── POST /competencies ───────────────────────────────────────────────────────

/// Ratings left out default to Basic.
pub async fn create_competency(
    _identity: Identity,
    State(state): State<AppState>,
    Payload(body): Payload,
) -> Result<(StatusCode, Json<Value>), TrainingServiceError> {
    let mut r = FieldReader::new(&body);
    let employee_id = r.id("employee_id");
    let patch = read_ratings(&mut r);
    r.finish()?;
    let Some(employee_id) = employee_id else {
        return Err(unreadable());
    };
    let ratings = Ratings {
        global: patch.global.unwrap_or_default(),
        solutions: patch.solutions.unwrap_or_default(),
        networking: patch.networking.unwrap_or_default(),
        delivering: patch.delivering.unwrap_or_default(),
        collaboration: patch.collaboration.unwrap_or_default(),
        agility: patch.agility.unwrap_or_default(),
        professionalism: patch.professionalism.unwrap_or_default(),
    };

    let uc = CreateCompetencyUseCase {
        competencies: state.competency_repo(),
        users: state.user_repo(),
    };
    let competency = uc.execute(employee_id, ratings).await?;
    Ok(created("competency", CompetencyResponse::from(competency)))
}

// ── GET /competencies ────────────────────────────────────────────────────────

pub async fn list_competencies(
    _identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<CompetencyListQuery>,
) -> Result<Json<Value>, TrainingServiceError> {
    let employee_id = query
        .employee_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse::<i32>)
        .transpose()
        .map_err(|_| TrainingServiceError::field("employee_id", "A valid integer is required."))?;

    let uc = ListCompetenciesUseCase {
        competencies: state.competency_repo(),
    };
    let items: Vec<CompetencyResponse> = uc
        .execute(employee_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(success("competencies", items))
}

// ── GET /competencies/{id} ───────────────────────────────────────────────────

pub async fn get_competency(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = GetCompetencyUseCase {
        competencies: state.competency_repo(),
    };
    let competency = uc.execute(id).await?;
    Ok(success("competency", CompetencyResponse::from(competency)))
}

// ── PUT /competencies/{id} ───────────────────────────────────────────────────

pub async fn update_competency(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    Payload(body): Payload,
) -> Result<Json<Value>, TrainingServiceError> {
    let mut r = FieldReader::new(&body);
    let patch = RatingsPatch {
        employee_id: r.opt_id("employee_id"),
        ..read_ratings(&mut r)
    };
    r.finish()?;

    let uc = UpdateCompetencyUseCase {
        competencies: state.competency_repo(),
        users: state.user_repo(),
    };
    let competency = uc.execute(id, patch).await?;
    Ok(success("competency", CompetencyResponse::from(competency)))
}

// ── DELETE /competencies/{id} ────────────────────────────────────────────────

pub async fn delete_competency(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = DeleteCompetencyUseCase {
        competencies: state.competency_repo(),
    };
    uc.execute(id).await?;
    Ok(deleted("competency deleted"))
}
