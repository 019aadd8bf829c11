use dti_core::error::FieldErrors;
use dti_domain::user::UserRole;

use crate::domain::repository::{SupervisionRepository, UserRepository};
use crate::domain::types::SupervisionLink;
use crate::error::TrainingServiceError;
use crate::usecase::check_user_role;

/// Both ends of a link must exist and carry the role their side requires.
async fn check_roles<U: UserRepository>(
    users: &U,
    supervisor_id: i32,
    employee_id: i32,
) -> Result<(), TrainingServiceError> {
    let mut errors = FieldErrors::new();
    check_user_role(users, &mut errors, "supervisor_id", supervisor_id, UserRole::Supervisor)
        .await?;
    check_user_role(users, &mut errors, "employee_id", employee_id, UserRole::Employee).await?;
    errors.into_result().map_err(Into::into)
}

// ── CreateSupervision ────────────────────────────────────────────────────────

pub struct CreateSupervisionUseCase<S: SupervisionRepository, U: UserRepository> {
    pub links: S,
    pub users: U,
}

impl<S: SupervisionRepository, U: UserRepository> CreateSupervisionUseCase<S, U> {
    pub async fn execute(
        &self,
        supervisor_id: i32,
        employee_id: i32,
    ) -> Result<SupervisionLink, TrainingServiceError> {
        check_roles(&self.users, supervisor_id, employee_id).await?;
        let link = self.links.create(supervisor_id, employee_id).await?;
        tracing::info!(link_id = link.id, supervisor_id, employee_id, "supervision linked");
        Ok(link)
    }
}

// ── ListSupervisions / GetSupervision ────────────────────────────────────────

pub struct ListSupervisionsUseCase<S: SupervisionRepository> {
    pub links: S,
}

impl<S: SupervisionRepository> ListSupervisionsUseCase<S> {
    pub async fn execute(&self) -> Result<Vec<SupervisionLink>, TrainingServiceError> {
        self.links.list().await
    }
}

pub struct GetSupervisionUseCase<S: SupervisionRepository> {
    pub links: S,
}

impl<S: SupervisionRepository> GetSupervisionUseCase<S> {
    pub async fn execute(&self, id: i32) -> Result<SupervisionLink, TrainingServiceError> {
        self.links
            .find_by_id(id)
            .await?
            .ok_or(TrainingServiceError::SupervisionNotFound)
    }
}

// ── UpdateSupervision ────────────────────────────────────────────────────────

pub struct UpdateSupervisionUseCase<S: SupervisionRepository, U: UserRepository> {
    pub links: S,
    pub users: U,
}

impl<S: SupervisionRepository, U: UserRepository> UpdateSupervisionUseCase<S, U> {
    pub async fn execute(
        &self,
        id: i32,
        supervisor_id: Option<i32>,
        employee_id: Option<i32>,
    ) -> Result<SupervisionLink, TrainingServiceError> {
        let mut link = self
            .links
            .find_by_id(id)
            .await?
            .ok_or(TrainingServiceError::SupervisionNotFound)?;
        link.supervisor_id = supervisor_id.unwrap_or(link.supervisor_id);
        link.employee_id = employee_id.unwrap_or(link.employee_id);
        check_roles(&self.users, link.supervisor_id, link.employee_id).await?;
        self.links.update(&link).await
    }
}

// ── DeleteSupervision ────────────────────────────────────────────────────────

pub struct DeleteSupervisionUseCase<S: SupervisionRepository> {
    pub links: S,
}

impl<S: SupervisionRepository> DeleteSupervisionUseCase<S> {
    pub async fn execute(&self, id: i32) -> Result<(), TrainingServiceError> {
        if !self.links.delete(id).await? {
            return Err(TrainingServiceError::SupervisionNotFound);
        }
        Ok(())
    }
}
