use chrono::NaiveDate;

use dti_domain::training::{DateRange, TrainingCategory, TrainingStatus, TrainingType};

use crate::domain::repository::TrainingRepository;
use crate::domain::types::{Training, TrainingFields};
use crate::error::TrainingServiceError;

/// Editable training fields. A missing `status` means "scheduled" on create and
/// "unchanged" on update.
#[derive(Debug, Clone)]
pub struct TrainingInput {
    pub title: String,
    pub venue: String,
    pub date: NaiveDate,
    pub training_type: TrainingType,
    pub category: TrainingCategory,
    pub status: Option<TrainingStatus>,
}

impl TrainingInput {
    fn into_fields(self, fallback: TrainingStatus) -> TrainingFields {
        TrainingFields {
            title: self.title,
            venue: self.venue,
            date: self.date,
            training_type: self.training_type,
            category: self.category,
            status: self.status.unwrap_or(fallback),
        }
    }
}

// ── CreateTraining ───────────────────────────────────────────────────────────

pub struct CreateTrainingUseCase<R: TrainingRepository> {
    pub repo: R,
}

impl<R: TrainingRepository> CreateTrainingUseCase<R> {
    pub async fn execute(&self, input: TrainingInput) -> Result<Training, TrainingServiceError> {
        let training = self
            .repo
            .create(&input.into_fields(TrainingStatus::default()))
            .await?;
        tracing::info!(training_id = training.id, date = %training.fields.date, "training created");
        Ok(training)
    }
}

// ── ListTrainings ────────────────────────────────────────────────────────────

/// Catalog listing. Every stored status is brought in line with `today` before the
/// range is read, so the listing never shows a stale lifecycle state.
pub struct ListTrainingsUseCase<R: TrainingRepository> {
    pub repo: R,
}

impl<R: TrainingRepository> ListTrainingsUseCase<R> {
    pub async fn execute(
        &self,
        range: DateRange,
        today: NaiveDate,
    ) -> Result<Vec<Training>, TrainingServiceError> {
        let changed = self.repo.reconcile_statuses(today).await?;
        if changed > 0 {
            tracing::info!(changed, %today, "training statuses reconciled");
        }
        self.repo.list(range).await
    }
}

// ── GetTraining ──────────────────────────────────────────────────────────────

pub struct GetTrainingUseCase<R: TrainingRepository> {
    pub repo: R,
}

impl<R: TrainingRepository> GetTrainingUseCase<R> {
    pub async fn execute(&self, training_id: i32) -> Result<Training, TrainingServiceError> {
        self.repo
            .find_by_id(training_id)
            .await?
            .ok_or(TrainingServiceError::TrainingNotFound)
    }
}

// ── UpdateTraining ───────────────────────────────────────────────────────────

/// Full overwrite of the editable fields.
pub struct UpdateTrainingUseCase<R: TrainingRepository> {
    pub repo: R,
}

impl<R: TrainingRepository> UpdateTrainingUseCase<R> {
    pub async fn execute(
        &self,
        training_id: i32,
        input: TrainingInput,
    ) -> Result<Training, TrainingServiceError> {
        let current = self
            .repo
            .find_by_id(training_id)
            .await?
            .ok_or(TrainingServiceError::TrainingNotFound)?;
        let training = Training {
            id: current.id,
            fields: input.into_fields(current.fields.status),
        };
        self.repo.update(&training).await
    }
}

// ── DeleteTraining ───────────────────────────────────────────────────────────

pub struct DeleteTrainingUseCase<R: TrainingRepository> {
    pub repo: R,
}

impl<R: TrainingRepository> DeleteTrainingUseCase<R> {
    pub async fn execute(&self, training_id: i32) -> Result<(), TrainingServiceError> {
        if !self.repo.delete(training_id).await? {
            return Err(TrainingServiceError::TrainingNotFound);
        }
        tracing::info!(training_id, "training deleted with its dependents");
        Ok(())
    }
}
