use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use dti_auth_types::identity::Identity;

use crate::domain::types::SupervisionLink;
use crate::error::TrainingServiceError;
use crate::handlers::{EntityId, FieldReader, Payload, created, deleted, success, unreadable};
use crate::state::AppState;
use crate::usecase::supervision::{
    CreateSupervisionUseCase, DeleteSupervisionUseCase, GetSupervisionUseCase,
    ListSupervisionsUseCase, UpdateSupervisionUseCase,
};

#[derive(Serialize)]
pub struct SupervisionResponse {
    pub id: i32,
    pub supervisor_id: i32,
    pub employee_id: i32,
}

impl From<SupervisionLink> for SupervisionResponse {
    fn from(l: SupervisionLink) -> Self {
        Self {
            id: l.id,
            supervisor_id: l.supervisor_id,
            employee_id: l.employee_id,
        }
    }
}

// ── POST /supervisions ───────────────────────────────────────────────────────

pub async fn create_supervision(
    _identity: Identity,
    State(state): State<AppState>,
    Payload(body): Payload,
) -> Result<(StatusCode, Json<Value>), TrainingServiceError> {
    let mut r = FieldReader::new(&body);
    let supervisor_id = r.id("supervisor_id");
    let employee_id = r.id("employee_id");
    r.finish()?;
    let (Some(supervisor_id), Some(employee_id)) = (supervisor_id, employee_id) else {
        return Err(unreadable());
    };

    let uc = CreateSupervisionUseCase {
        links: state.supervision_repo(),
        users: state.user_repo(),
    };
    let link = uc.execute(supervisor_id, employee_id).await?;
    Ok(created("supervision", SupervisionResponse::from(link)))
}

// ── GET /supervisions ────────────────────────────────────────────────────────

pub async fn list_supervisions(
    _identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = ListSupervisionsUseCase {
        links: state.supervision_repo(),
    };
    let links: Vec<SupervisionResponse> = uc.execute().await?.into_iter().map(Into::into).collect();
    Ok(success("supervisions", links))
}

// ── GET /supervisions/{id} ───────────────────────────────────────────────────

pub async fn get_supervision(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = GetSupervisionUseCase {
        links: state.supervision_repo(),
    };
    let link = uc.execute(id).await?;
    Ok(success("supervision", SupervisionResponse::from(link)))
}

// ── PUT /supervisions/{id} ───────────────────────────────────────────────────

pub async fn update_supervision(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    Payload(body): Payload,
) -> Result<Json<Value>, TrainingServiceError> {
    let mut r = FieldReader::new(&body);
    let supervisor_id = r.opt_id("supervisor_id");
    let employee_id = r.opt_id("employee_id");
    r.finish()?;

    let uc = UpdateSupervisionUseCase {
        links: state.supervision_repo(),
        users: state.user_repo(),
    };
    let link = uc.execute(id, supervisor_id, employee_id).await?;
    Ok(success("supervision", SupervisionResponse::from(link)))
}

// ── DELETE /supervisions/{id} ────────────────────────────────────────────────

pub async fn delete_supervision(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = DeleteSupervisionUseCase {
        links: state.supervision_repo(),
    };
    uc.execute(id).await?;
    Ok(deleted("supervision deleted"))
}
