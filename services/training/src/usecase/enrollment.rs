use crate::domain::repository::{LedgerRepository, TrainingRepository, UserRepository};
use crate::domain::types::LedgerEntryDetail;
use crate::error::TrainingServiceError;
use crate::usecase::ensure_employee;
use crate::usecase::ledger::hydrate;

/// The acting employee enrolls in a training. Any lifecycle state is accepted.
pub struct CreateEnrollmentUseCase<L: LedgerRepository, T: TrainingRepository, U: UserRepository> {
    pub ledger: L,
    pub trainings: T,
    pub users: U,
}

impl<L: LedgerRepository, T: TrainingRepository, U: UserRepository>
    CreateEnrollmentUseCase<L, T, U>
{
    pub async fn execute(
        &self,
        user_id: i32,
        training_id: i32,
    ) -> Result<LedgerEntryDetail, TrainingServiceError> {
        if self.trainings.find_by_id(training_id).await?.is_none() {
            return Err(TrainingServiceError::TrainingNotFound);
        }
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(TrainingServiceError::UserNotFound)?;
        ensure_employee(&user, "user_id")?;
        if self.ledger.find_pair(user_id, training_id).await?.is_some() {
            return Err(TrainingServiceError::AlreadyEnrolled);
        }

        let entry = self.ledger.create(user_id, training_id).await?;
        tracing::info!(enrollment_id = entry.id, user_id, training_id, "user enrolled");

        hydrate(&self.trainings, &self.users, vec![entry])
            .await?
            .pop()
            .ok_or_else(|| anyhow::anyhow!("enrollment vanished after insert").into())
    }
}
