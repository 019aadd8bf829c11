use chrono::NaiveDate;

use crate::domain::repository::{LedgerRepository, TrainingRepository, UserRepository};
use crate::domain::types::LedgerEntryDetail;
use crate::error::TrainingServiceError;
use crate::usecase::ensure_employee;
use crate::usecase::ledger::{ensure_open, hydrate};

/// Admin assigns an employee to a training that has not started yet.
pub struct CreateAssignmentUseCase<L: LedgerRepository, T: TrainingRepository, U: UserRepository> {
    pub ledger: L,
    pub trainings: T,
    pub users: U,
}

impl<L: LedgerRepository, T: TrainingRepository, U: UserRepository>
    CreateAssignmentUseCase<L, T, U>
{
    pub async fn execute(
        &self,
        user_id: i32,
        training_id: i32,
        today: NaiveDate,
    ) -> Result<LedgerEntryDetail, TrainingServiceError> {
        let training = self
            .trainings
            .find_by_id(training_id)
            .await?
            .ok_or(TrainingServiceError::TrainingNotFound)?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(TrainingServiceError::UserNotFound)?;
        ensure_employee(&user, "user_id")?;
        ensure_open(&training, today)?;
        if self.ledger.find_pair(user_id, training_id).await?.is_some() {
            return Err(TrainingServiceError::AlreadyAssigned);
        }

        // A racing insert of the same pair still lands on the unique index.
        let entry = self.ledger.create(user_id, training_id).await?;
        tracing::info!(assignment_id = entry.id, user_id, training_id, "user assigned");

        hydrate(&self.trainings, &self.users, vec![entry])
            .await?
            .pop()
            .ok_or_else(|| anyhow::anyhow!("assignment vanished after insert").into())
    }
}
