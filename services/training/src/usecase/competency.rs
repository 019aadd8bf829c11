use dti_core::error::FieldErrors;
use dti_domain::competency::Rating;
use dti_domain::user::UserRole;

use crate::domain::repository::{CompetencyRepository, UserRepository};
use crate::domain::types::{Competency, Ratings};
use crate::error::TrainingServiceError;
use crate::usecase::check_user_role;

async fn check_employee_ref<U: UserRepository>(
    users: &U,
    employee_id: i32,
) -> Result<(), TrainingServiceError> {
    let mut errors = FieldErrors::new();
    check_user_role(users, &mut errors, "employee_id", employee_id, UserRole::Employee).await?;
    errors.into_result().map_err(Into::into)
}

/// Records a new rating snapshot. Earlier snapshots for the employee are kept.
pub struct CreateCompetencyUseCase<C: CompetencyRepository, U: UserRepository> {
    pub competencies: C,
    pub users: U,
}

impl<C: CompetencyRepository, U: UserRepository> CreateCompetencyUseCase<C, U> {
    pub async fn execute(
        &self,
        employee_id: i32,
        ratings: Ratings,
    ) -> Result<Competency, TrainingServiceError> {
        check_employee_ref(&self.users, employee_id).await?;
        let competency = self.competencies.create(employee_id, ratings).await?;
        tracing::info!(competency_id = competency.id, employee_id, "competency recorded");
        Ok(competency)
    }
}

pub struct ListCompetenciesUseCase<C: CompetencyRepository> {
    pub competencies: C,
}

impl<C: CompetencyRepository> ListCompetenciesUseCase<C> {
    pub async fn execute(
        &self,
        employee_id: Option<i32>,
    ) -> Result<Vec<Competency>, TrainingServiceError> {
        self.competencies.list(employee_id).await
    }
}

pub struct GetCompetencyUseCase<C: CompetencyRepository> {
    pub competencies: C,
}

impl<C: CompetencyRepository> GetCompetencyUseCase<C> {
    pub async fn execute(&self, id: i32) -> Result<Competency, TrainingServiceError> {
        self.competencies
            .find_by_id(id)
            .await?
            .ok_or(TrainingServiceError::CompetencyNotFound)
    }
}

/// Ratings left out of the request keep their stored value.
#[derive(Debug, Default)]
pub struct RatingsPatch {
    pub employee_id: Option<i32>,
    pub global: Option<Rating>,
    pub solutions: Option<Rating>,
    pub networking: Option<Rating>,
    pub delivering: Option<Rating>,
    pub collaboration: Option<Rating>,
    pub agility: Option<Rating>,
    pub professionalism: Option<Rating>,
}

impl RatingsPatch {
    fn apply(self, ratings: &mut Ratings) {
        let pairs = [
            (&mut ratings.global, self.global),
            (&mut ratings.solutions, self.solutions),
            (&mut ratings.networking, self.networking),
            (&mut ratings.delivering, self.delivering),
            (&mut ratings.collaboration, self.collaboration),
            (&mut ratings.agility, self.agility),
            (&mut ratings.professionalism, self.professionalism),
        ];
        for (slot, value) in pairs {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

pub struct UpdateCompetencyUseCase<C: CompetencyRepository, U: UserRepository> {
    pub competencies: C,
    pub users: U,
}

impl<C: CompetencyRepository, U: UserRepository> UpdateCompetencyUseCase<C, U> {
    pub async fn execute(
        &self,
        id: i32,
        patch: RatingsPatch,
    ) -> Result<Competency, TrainingServiceError> {
        let mut competency = self
            .competencies
            .find_by_id(id)
            .await?
            .ok_or(TrainingServiceError::CompetencyNotFound)?;
        if let Some(employee_id) = patch.employee_id {
            check_employee_ref(&self.users, employee_id).await?;
            competency.employee_id = employee_id;
        }
        patch.apply(&mut competency.ratings);
        self.competencies.update(&competency).await
    }
}

pub struct DeleteCompetencyUseCase<C: CompetencyRepository> {
    pub competencies: C,
}

impl<C: CompetencyRepository> DeleteCompetencyUseCase<C> {
    pub async fn execute(&self, id: i32) -> Result<(), TrainingServiceError> {
        if !self.competencies.delete(id).await? {
            return Err(TrainingServiceError::CompetencyNotFound);
        }
        Ok(())
    }
}
