#![allow(async_fn_in_trait)]

use chrono::NaiveDate;

use dti_domain::training::DateRange;
use dti_domain::user::UserRole;

use crate::domain::types::{
    Competency, Lap, LedgerEntry, NewLap, NewProgress, NewUser, Progress, Ratings,
    SupervisionLink, Training, TrainingFields, User, UserSummary,
};
use crate::error::TrainingServiceError;

/// Repository for accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, TrainingServiceError>;
    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, TrainingServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, TrainingServiceError>;
    async fn find_summaries(&self, ids: &[i32]) -> Result<Vec<UserSummary>, TrainingServiceError>;
    /// All users ordered by id, optionally only those with `role`.
    async fn list(&self, role: Option<UserRole>) -> Result<Vec<User>, TrainingServiceError>;
    /// Insert. A username or email collision surfaces as `UsernameTaken` / `EmailTaken`.
    async fn create(&self, user: &NewUser) -> Result<User, TrainingServiceError>;
    /// Persist username, email and profile in one write. The stored password hash is
    /// replaced only when `password_hash` is given.
    async fn update_profile(
        &self,
        user: &User,
        password_hash: Option<&str>,
    ) -> Result<User, TrainingServiceError>;
    /// Delete the user and every row referencing it. Returns `false` if absent.
    async fn delete(&self, id: i32) -> Result<bool, TrainingServiceError>;
}

/// Repository for the training catalog.
pub trait TrainingRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Training>, TrainingServiceError>;
    async fn find_many(&self, ids: &[i32]) -> Result<Vec<Training>, TrainingServiceError>;
    /// Trainings whose date falls in `range`, ordered by id.
    async fn list(&self, range: DateRange) -> Result<Vec<Training>, TrainingServiceError>;
    async fn create(&self, fields: &TrainingFields) -> Result<Training, TrainingServiceError>;
    async fn update(&self, training: &Training) -> Result<Training, TrainingServiceError>;
    /// Delete the training with its assignments, enrollments, plans and progress.
    async fn delete(&self, id: i32) -> Result<bool, TrainingServiceError>;
    /// Rewrite every stored status to the one its date implies on `today`.
    /// Returns the number of rows changed.
    async fn reconcile_statuses(&self, today: NaiveDate) -> Result<u64, TrainingServiceError>;
}

/// Repository shared by the assignment and the enrollment tables.
pub trait LedgerRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<LedgerEntry>, TrainingServiceError>;
    async fn find_pair(
        &self,
        user_id: i32,
        training_id: i32,
    ) -> Result<Option<LedgerEntry>, TrainingServiceError>;
    async fn list(&self, user_id: Option<i32>) -> Result<Vec<LedgerEntry>, TrainingServiceError>;
    async fn list_for_training(
        &self,
        training_id: i32,
    ) -> Result<Vec<LedgerEntry>, TrainingServiceError>;
    /// Insert. A duplicate pair surfaces as the table's conflict error.
    async fn create(
        &self,
        user_id: i32,
        training_id: i32,
    ) -> Result<LedgerEntry, TrainingServiceError>;
    async fn update(&self, entry: &LedgerEntry) -> Result<LedgerEntry, TrainingServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, TrainingServiceError>;
}

/// Repository for supervisor/employee links.
pub trait SupervisionRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<SupervisionLink>, TrainingServiceError>;
    async fn list(&self) -> Result<Vec<SupervisionLink>, TrainingServiceError>;
    async fn create(
        &self,
        supervisor_id: i32,
        employee_id: i32,
    ) -> Result<SupervisionLink, TrainingServiceError>;
    async fn update(
        &self,
        link: &SupervisionLink,
    ) -> Result<SupervisionLink, TrainingServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, TrainingServiceError>;
}

/// Repository for competency rating snapshots.
pub trait CompetencyRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Competency>, TrainingServiceError>;
    /// Without a filter, ordered by id. For one employee, newest first.
    async fn list(
        &self,
        employee_id: Option<i32>,
    ) -> Result<Vec<Competency>, TrainingServiceError>;
    async fn create(
        &self,
        employee_id: i32,
        ratings: Ratings,
    ) -> Result<Competency, TrainingServiceError>;
    async fn update(&self, competency: &Competency) -> Result<Competency, TrainingServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, TrainingServiceError>;
}

/// Repository for learning action plans.
pub trait LapRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Lap>, TrainingServiceError>;
    async fn list(&self, employee_id: Option<i32>) -> Result<Vec<Lap>, TrainingServiceError>;
    async fn create(&self, lap: &NewLap) -> Result<Lap, TrainingServiceError>;
    /// Persist texts and status. `submitted_on` is never rewritten.
    async fn update(&self, lap: &Lap) -> Result<Lap, TrainingServiceError>;
    /// Delete the plan and its progress rows.
    async fn delete(&self, id: i32) -> Result<bool, TrainingServiceError>;
}

/// Repository for progress records.
pub trait ProgressRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Progress>, TrainingServiceError>;
    async fn list(&self, employee_id: Option<i32>) -> Result<Vec<Progress>, TrainingServiceError>;
    async fn list_by_lap(&self, lap_id: i32) -> Result<Vec<Progress>, TrainingServiceError>;
    /// Insert. A storage constraint failure surfaces as `Integrity`.
    async fn create(&self, progress: &NewProgress) -> Result<Progress, TrainingServiceError>;
    async fn update(&self, progress: &Progress) -> Result<Progress, TrainingServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, TrainingServiceError>;
}

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, TrainingServiceError>;
    fn verify(&self, password: &str, hash: &str) -> Result<bool, TrainingServiceError>;
}
