use chrono::NaiveDate;

use dti_core::error::FieldErrors;
use dti_domain::lap::LapStatus;
use dti_domain::user::UserRole;

use crate::domain::repository::{LapRepository, TrainingRepository, UserRepository};
use crate::domain::types::{Lap, LapTexts, NewLap};
use crate::error::TrainingServiceError;
use crate::usecase::{check_user_role, missing_reference};

// ── CreateLap ────────────────────────────────────────────────────────────────

/// Files a plan for evaluation. It starts at `to_evaluate` and is stamped with `today`.
pub struct CreateLapUseCase<L: LapRepository, T: TrainingRepository, U: UserRepository> {
    pub laps: L,
    pub trainings: T,
    pub users: U,
}

impl<L: LapRepository, T: TrainingRepository, U: UserRepository> CreateLapUseCase<L, T, U> {
    pub async fn execute(
        &self,
        employee_id: i32,
        training_id: i32,
        texts: LapTexts,
        today: NaiveDate,
    ) -> Result<Lap, TrainingServiceError> {
        let mut errors = FieldErrors::new();
        check_user_role(&self.users, &mut errors, "employee_id", employee_id, UserRole::Employee)
            .await?;
        if self.trainings.find_by_id(training_id).await?.is_none() {
            errors.add("training_id", missing_reference(training_id));
        }
        errors.into_result()?;

        let lap = self
            .laps
            .create(&NewLap {
                employee_id,
                training_id,
                submitted_on: today,
                texts,
            })
            .await?;
        tracing::info!(lap_id = lap.id, employee_id, training_id, "learning action plan submitted");
        Ok(lap)
    }
}

// ── ListLaps / GetLap ────────────────────────────────────────────────────────

pub struct ListLapsUseCase<L: LapRepository> {
    pub laps: L,
}

impl<L: LapRepository> ListLapsUseCase<L> {
    pub async fn execute(&self, employee_id: Option<i32>) -> Result<Vec<Lap>, TrainingServiceError> {
        self.laps.list(employee_id).await
    }
}

pub struct GetLapUseCase<L: LapRepository> {
    pub laps: L,
}

impl<L: LapRepository> GetLapUseCase<L> {
    pub async fn execute(&self, id: i32) -> Result<Lap, TrainingServiceError> {
        self.laps
            .find_by_id(id)
            .await?
            .ok_or(TrainingServiceError::LapNotFound)
    }
}

// ── UpdateLap ────────────────────────────────────────────────────────────────

/// Partial update. Text fields left as `None` keep their stored value.
#[derive(Debug, Default)]
pub struct LapPatch {
    pub status: Option<LapStatus>,
    pub takeaways: Option<String>,
    pub goal: Option<String>,
    pub plan: Option<String>,
    pub timeframe: Option<String>,
    pub support: Option<String>,
    pub outcome: Option<String>,
}

/// Edits a plan. The evaluation outcome is final once recorded.
pub struct UpdateLapUseCase<L: LapRepository> {
    pub laps: L,
}

impl<L: LapRepository> UpdateLapUseCase<L> {
    pub async fn execute(&self, id: i32, patch: LapPatch) -> Result<Lap, TrainingServiceError> {
        let mut lap = self
            .laps
            .find_by_id(id)
            .await?
            .ok_or(TrainingServiceError::LapNotFound)?;

        if let Some(status) = patch.status {
            let from = lap.status;
            lap.status = from.transition(status)?;
            if from != lap.status {
                tracing::info!(lap_id = id, %from, to = %lap.status, "learning action plan evaluated");
            }
        }

        let texts = &mut lap.texts;
        for (slot, value) in [
            (&mut texts.takeaways, patch.takeaways),
            (&mut texts.goal, patch.goal),
            (&mut texts.plan, patch.plan),
            (&mut texts.timeframe, patch.timeframe),
            (&mut texts.support, patch.support),
            (&mut texts.outcome, patch.outcome),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }

        self.laps.update(&lap).await
    }
}

// ── DeleteLap ────────────────────────────────────────────────────────────────

pub struct DeleteLapUseCase<L: LapRepository> {
    pub laps: L,
}

impl<L: LapRepository> DeleteLapUseCase<L> {
    pub async fn execute(&self, id: i32) -> Result<(), TrainingServiceError> {
        if !self.laps.delete(id).await? {
            return Err(TrainingServiceError::LapNotFound);
        }
        tracing::info!(lap_id = id, "learning action plan deleted with its progress");
        Ok(())
    }
}
