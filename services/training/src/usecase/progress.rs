use dti_core::error::FieldErrors;
use dti_domain::progress::ProgressStatus;
use dti_domain::user::UserRole;

use crate::domain::repository::{
    LapRepository, ProgressRepository, TrainingRepository, UserRepository,
};
use crate::domain::types::{NewProgress, Progress};
use crate::error::TrainingServiceError;
use crate::usecase::{check_user_role, missing_reference};

/// References carried by a progress row.
#[derive(Debug, Clone, Copy)]
pub struct ProgressRefs {
    pub employee_id: i32,
    pub training_id: i32,
    pub lap_id: i32,
}

/// Per-field errors for every reference that does not resolve.
async fn check_refs<T: TrainingRepository, U: UserRepository, L: LapRepository>(
    trainings: &T,
    users: &U,
    laps: &L,
    refs: ProgressRefs,
) -> Result<(), TrainingServiceError> {
    let mut errors = FieldErrors::new();
    check_user_role(users, &mut errors, "employee_id", refs.employee_id, UserRole::Employee)
        .await?;
    if trainings.find_by_id(refs.training_id).await?.is_none() {
        errors.add("training_id", missing_reference(refs.training_id));
    }
    if laps.find_by_id(refs.lap_id).await?.is_none() {
        errors.add("lap_id", missing_reference(refs.lap_id));
    }
    errors.into_result().map_err(Into::into)
}

// ── CreateProgress ───────────────────────────────────────────────────────────

pub struct CreateProgressUseCase<
    P: ProgressRepository,
    T: TrainingRepository,
    U: UserRepository,
    L: LapRepository,
> {
    pub progress: P,
    pub trainings: T,
    pub users: U,
    pub laps: L,
}

impl<P: ProgressRepository, T: TrainingRepository, U: UserRepository, L: LapRepository>
    CreateProgressUseCase<P, T, U, L>
{
    pub async fn execute(
        &self,
        refs: ProgressRefs,
        status: Option<ProgressStatus>,
    ) -> Result<Progress, TrainingServiceError> {
        check_refs(&self.trainings, &self.users, &self.laps, refs).await?;
        let progress = self
            .progress
            .create(&NewProgress {
                employee_id: refs.employee_id,
                training_id: refs.training_id,
                lap_id: refs.lap_id,
                status: status.unwrap_or_default(),
            })
            .await?;
        tracing::info!(progress_id = progress.id, lap_id = refs.lap_id, "progress recorded");
        Ok(progress)
    }
}

// ── ListProgress / GetProgress / ProgressByLap ───────────────────────────────

pub struct ListProgressUseCase<P: ProgressRepository> {
    pub progress: P,
}

impl<P: ProgressRepository> ListProgressUseCase<P> {
    pub async fn execute(
        &self,
        employee_id: Option<i32>,
    ) -> Result<Vec<Progress>, TrainingServiceError> {
        self.progress.list(employee_id).await
    }
}

pub struct GetProgressUseCase<P: ProgressRepository> {
    pub progress: P,
}

impl<P: ProgressRepository> GetProgressUseCase<P> {
    pub async fn execute(&self, id: i32) -> Result<Progress, TrainingServiceError> {
        self.progress
            .find_by_id(id)
            .await?
            .ok_or(TrainingServiceError::ProgressNotFound)
    }
}

/// Every progress row attached to one plan. An empty result is `ProgressNotFound`.
pub struct ProgressByLapUseCase<P: ProgressRepository> {
    pub progress: P,
}

impl<P: ProgressRepository> ProgressByLapUseCase<P> {
    pub async fn execute(&self, lap_id: i32) -> Result<Vec<Progress>, TrainingServiceError> {
        let rows = self.progress.list_by_lap(lap_id).await?;
        if rows.is_empty() {
            return Err(TrainingServiceError::ProgressNotFound);
        }
        Ok(rows)
    }
}

// ── UpdateProgress ───────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ProgressPatch {
    pub employee_id: Option<i32>,
    pub training_id: Option<i32>,
    pub lap_id: Option<i32>,
    pub status: Option<ProgressStatus>,
}

/// Any status may be set. It is not checked against the plan's own status.
pub struct UpdateProgressUseCase<
    P: ProgressRepository,
    T: TrainingRepository,
    U: UserRepository,
    L: LapRepository,
> {
    pub progress: P,
    pub trainings: T,
    pub users: U,
    pub laps: L,
}

impl<P: ProgressRepository, T: TrainingRepository, U: UserRepository, L: LapRepository>
    UpdateProgressUseCase<P, T, U, L>
{
    pub async fn execute(
        &self,
        id: i32,
        patch: ProgressPatch,
    ) -> Result<Progress, TrainingServiceError> {
        let mut progress = self
            .progress
            .find_by_id(id)
            .await?
            .ok_or(TrainingServiceError::ProgressNotFound)?;

        let refs_changed =
            patch.employee_id.is_some() || patch.training_id.is_some() || patch.lap_id.is_some();
        progress.employee_id = patch.employee_id.unwrap_or(progress.employee_id);
        progress.training_id = patch.training_id.unwrap_or(progress.training_id);
        progress.lap_id = patch.lap_id.unwrap_or(progress.lap_id);
        if refs_changed {
            let refs = ProgressRefs {
                employee_id: progress.employee_id,
                training_id: progress.training_id,
                lap_id: progress.lap_id,
            };
            check_refs(&self.trainings, &self.users, &self.laps, refs).await?;
        }
        if let Some(status) = patch.status {
            progress.status = status;
        }
        self.progress.update(&progress).await
    }
}

// ── DeleteProgress ───────────────────────────────────────────────────────────

pub struct DeleteProgressUseCase<P: ProgressRepository> {
    pub progress: P,
}

impl<P: ProgressRepository> DeleteProgressUseCase<P> {
    pub async fn execute(&self, id: i32) -> Result<(), TrainingServiceError> {
        if !self.progress.delete(id).await? {
            return Err(TrainingServiceError::ProgressNotFound);
        }
        Ok(())
    }
}
