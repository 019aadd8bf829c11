use chrono::{DateTime, NaiveDate, Utc};

use dti_domain::competency::Rating;
use dti_domain::lap::LapStatus;
use dti_domain::progress::ProgressStatus;
use dti_domain::training::{TrainingCategory, TrainingStatus, TrainingType};
use dti_domain::user::{Department, Specialization, UserRole, UserStatus};

// ── Users ────────────────────────────────────────────────────────────────────

/// Stored account. `password_hash` never leaves the service.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable account fields other than username, email and password.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserProfile {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub contact: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    pub department: Department,
    pub specialization: Specialization,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub profile: UserProfile,
}

/// Compact user projection embedded in ledger responses.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.profile.first_name.clone(),
            last_name: user.profile.last_name.clone(),
            role: user.profile.role,
        }
    }
}

// ── Trainings ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Training {
    pub id: i32,
    pub fields: TrainingFields,
}

/// Every editable training column. Updates overwrite all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingFields {
    pub title: String,
    pub venue: String,
    pub date: NaiveDate,
    pub training_type: TrainingType,
    pub category: TrainingCategory,
    pub status: TrainingStatus,
}

// ── Assignment & enrollment ledger ──────────────────────────────────────────

/// Row of either the assignment or the enrollment table.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub id: i32,
    pub user_id: i32,
    pub training_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Ledger row joined with its user and training.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntryDetail {
    pub id: i32,
    pub user: UserSummary,
    pub training: Training,
    pub created_at: DateTime<Utc>,
}

// ── Supervision ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct SupervisionLink {
    pub id: i32,
    pub supervisor_id: i32,
    pub employee_id: i32,
}

// ── Competency ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ratings {
    pub global: Rating,
    pub solutions: Rating,
    pub networking: Rating,
    pub delivering: Rating,
    pub collaboration: Rating,
    pub agility: Rating,
    pub professionalism: Rating,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Competency {
    pub id: i32,
    pub employee_id: i32,
    pub ratings: Ratings,
    pub created_at: DateTime<Utc>,
}

// ── Learning action plans ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LapTexts {
    pub takeaways: String,
    pub goal: String,
    pub plan: String,
    pub timeframe: String,
    pub support: String,
    pub outcome: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lap {
    pub id: i32,
    pub employee_id: i32,
    pub training_id: i32,
    pub submitted_on: NaiveDate,
    pub texts: LapTexts,
    pub status: LapStatus,
}

#[derive(Debug, Clone)]
pub struct NewLap {
    pub employee_id: i32,
    pub training_id: i32,
    pub submitted_on: NaiveDate,
    pub texts: LapTexts,
}

// ── Progress ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub id: i32,
    pub employee_id: i32,
    pub training_id: i32,
    pub lap_id: i32,
    pub status: ProgressStatus,
}

#[derive(Debug, Clone)]
pub struct NewProgress {
    pub employee_id: i32,
    pub training_id: i32,
    pub lap_id: i32,
    pub status: ProgressStatus,
}
