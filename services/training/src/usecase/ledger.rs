//! Read, re-point and delete operations shared by assignments and enrollments.
//!
//! The two tables have the same shape and the same uniqueness rule. They differ in
//! their error variants and in whether a closed training may be targeted, which
//! [`LedgerKind`] carries.

use std::collections::HashMap;

use anyhow::anyhow;
use chrono::NaiveDate;

use dti_domain::training::TrainingStatus;

use crate::domain::repository::{LedgerRepository, TrainingRepository, UserRepository};
use crate::domain::types::{LedgerEntry, LedgerEntryDetail, Training, UserSummary};
use crate::error::TrainingServiceError;
use crate::usecase::ensure_employee;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerKind {
    Assignment,
    Enrollment,
}

impl LedgerKind {
    pub fn not_found(self) -> TrainingServiceError {
        match self {
            Self::Assignment => TrainingServiceError::AssignmentNotFound,
            Self::Enrollment => TrainingServiceError::EnrollmentNotFound,
        }
    }

    pub fn conflict(self) -> TrainingServiceError {
        match self {
            Self::Assignment => TrainingServiceError::AlreadyAssigned,
            Self::Enrollment => TrainingServiceError::AlreadyEnrolled,
        }
    }

    /// Only assignments refuse trainings that are under way or over.
    fn gates_closed_trainings(self) -> bool {
        matches!(self, Self::Assignment)
    }
}

/// Refuse a training that is ongoing or completed, by its stored status or by the
/// status its date implies on `today`.
pub fn ensure_open(training: &Training, today: NaiveDate) -> Result<(), TrainingServiceError> {
    let stored = training.fields.status;
    if stored.is_closed() {
        return Err(TrainingServiceError::TrainingClosed(stored));
    }
    let current = TrainingStatus::for_date(training.fields.date, today);
    if current.is_closed() {
        return Err(TrainingServiceError::TrainingClosed(current));
    }
    Ok(())
}

/// Attach user and training summaries to raw rows, preserving order.
pub async fn hydrate<T: TrainingRepository, U: UserRepository>(
    trainings: &T,
    users: &U,
    entries: Vec<LedgerEntry>,
) -> Result<Vec<LedgerEntryDetail>, TrainingServiceError> {
    if entries.is_empty() {
        return Ok(vec![]);
    }
    let user_ids: Vec<i32> = entries.iter().map(|e| e.user_id).collect();
    let training_ids: Vec<i32> = entries.iter().map(|e| e.training_id).collect();

    let users: HashMap<i32, UserSummary> = users
        .find_summaries(&user_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();
    let trainings: HashMap<i32, Training> = trainings
        .find_many(&training_ids)
        .await?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();

    entries
        .into_iter()
        .map(|entry| -> Result<LedgerEntryDetail, TrainingServiceError> {
            let user = users.get(&entry.user_id).cloned().ok_or_else(|| {
                anyhow!("entry {} references missing user {}", entry.id, entry.user_id)
            })?;
            let training = trainings.get(&entry.training_id).cloned().ok_or_else(|| {
                anyhow!(
                    "entry {} references missing training {}",
                    entry.id,
                    entry.training_id
                )
            })?;
            Ok(LedgerEntryDetail {
                id: entry.id,
                user,
                training,
                created_at: entry.created_at,
            })
        })
        .collect()
}

async fn hydrate_one<T: TrainingRepository, U: UserRepository>(
    trainings: &T,
    users: &U,
    entry: LedgerEntry,
) -> Result<LedgerEntryDetail, TrainingServiceError> {
    let id = entry.id;
    hydrate(trainings, users, vec![entry])
        .await?
        .pop()
        .ok_or_else(|| anyhow!("entry {id} vanished while loading").into())
}

// ── ListLedgerEntries ────────────────────────────────────────────────────────

pub struct ListLedgerEntriesUseCase<L: LedgerRepository, T: TrainingRepository, U: UserRepository> {
    pub ledger: L,
    pub trainings: T,
    pub users: U,
}

impl<L: LedgerRepository, T: TrainingRepository, U: UserRepository>
    ListLedgerEntriesUseCase<L, T, U>
{
    /// All rows, or only `user_id`'s when given.
    pub async fn execute(
        &self,
        user_id: Option<i32>,
    ) -> Result<Vec<LedgerEntryDetail>, TrainingServiceError> {
        let entries = self.ledger.list(user_id).await?;
        hydrate(&self.trainings, &self.users, entries).await
    }

    /// `user_id`'s rows whose training is currently in `status`, judged by date.
    pub async fn execute_with_status(
        &self,
        user_id: i32,
        status: TrainingStatus,
        today: NaiveDate,
    ) -> Result<Vec<LedgerEntryDetail>, TrainingServiceError> {
        let mut entries = self.execute(Some(user_id)).await?;
        entries.retain(|e| TrainingStatus::for_date(e.training.fields.date, today) == status);
        Ok(entries)
    }
}

// ── GetLedgerEntry ───────────────────────────────────────────────────────────

pub struct GetLedgerEntryUseCase<L: LedgerRepository, T: TrainingRepository, U: UserRepository> {
    pub kind: LedgerKind,
    pub ledger: L,
    pub trainings: T,
    pub users: U,
}

impl<L: LedgerRepository, T: TrainingRepository, U: UserRepository>
    GetLedgerEntryUseCase<L, T, U>
{
    pub async fn execute(&self, id: i32) -> Result<LedgerEntryDetail, TrainingServiceError> {
        let entry = self
            .ledger
            .find_by_id(id)
            .await?
            .ok_or_else(|| self.kind.not_found())?;
        hydrate_one(&self.trainings, &self.users, entry).await
    }
}

// ── UpdateLedgerEntry ────────────────────────────────────────────────────────

/// Re-point a row at another user and/or training. The pair stays unique, and an
/// assignment cannot be moved onto a closed training.
pub struct UpdateLedgerEntryUseCase<L: LedgerRepository, T: TrainingRepository, U: UserRepository>
{
    pub kind: LedgerKind,
    pub ledger: L,
    pub trainings: T,
    pub users: U,
}

impl<L: LedgerRepository, T: TrainingRepository, U: UserRepository>
    UpdateLedgerEntryUseCase<L, T, U>
{
    pub async fn execute(
        &self,
        id: i32,
        user_id: Option<i32>,
        training_id: Option<i32>,
        today: NaiveDate,
    ) -> Result<LedgerEntryDetail, TrainingServiceError> {
        let mut entry = self
            .ledger
            .find_by_id(id)
            .await?
            .ok_or_else(|| self.kind.not_found())?;

        if let Some(training_id) = training_id.filter(|t| *t != entry.training_id) {
            let training = self
                .trainings
                .find_by_id(training_id)
                .await?
                .ok_or(TrainingServiceError::TrainingNotFound)?;
            if self.kind.gates_closed_trainings() {
                ensure_open(&training, today)?;
            }
            entry.training_id = training_id;
        }
        if let Some(user_id) = user_id.filter(|u| *u != entry.user_id) {
            let user = self
                .users
                .find_by_id(user_id)
                .await?
                .ok_or(TrainingServiceError::UserNotFound)?;
            ensure_employee(&user, "user_id")?;
            entry.user_id = user_id;
        }

        if let Some(existing) = self
            .ledger
            .find_pair(entry.user_id, entry.training_id)
            .await?
        {
            if existing.id != entry.id {
                return Err(self.kind.conflict());
            }
        }

        let entry = self.ledger.update(&entry).await?;
        hydrate_one(&self.trainings, &self.users, entry).await
    }
}

// ── DeleteLedgerEntry ────────────────────────────────────────────────────────

pub struct DeleteLedgerEntryUseCase<L: LedgerRepository> {
    pub kind: LedgerKind,
    pub ledger: L,
}

impl<L: LedgerRepository> DeleteLedgerEntryUseCase<L> {
    pub async fn execute(&self, id: i32) -> Result<(), TrainingServiceError> {
        if !self.ledger.delete(id).await? {
            return Err(self.kind.not_found());
        }
        tracing::info!(id, kind = ?self.kind, "ledger entry deleted");
        Ok(())
    }
}

// ── TrainingMembers ──────────────────────────────────────────────────────────

/// Users assigned to, or enrolled in, one training.
pub struct TrainingMembersUseCase<L: LedgerRepository, T: TrainingRepository, U: UserRepository> {
    pub ledger: L,
    pub trainings: T,
    pub users: U,
}

impl<L: LedgerRepository, T: TrainingRepository, U: UserRepository>
    TrainingMembersUseCase<L, T, U>
{
    pub async fn execute(&self, training_id: i32) -> Result<Vec<UserSummary>, TrainingServiceError> {
        if self.trainings.find_by_id(training_id).await?.is_none() {
            return Err(TrainingServiceError::TrainingNotFound);
        }
        let user_ids: Vec<i32> = self
            .ledger
            .list_for_training(training_id)
            .await?
            .into_iter()
            .map(|e| e.user_id)
            .collect();
        if user_ids.is_empty() {
            return Ok(vec![]);
        }
        self.users.find_summaries(&user_ids).await
    }
}
