use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};

use dti_auth_types::token::JwtSecret;
use dti_domain::lap::LapStatus;
use dti_domain::training::{DateRange, TrainingCategory, TrainingStatus, TrainingType};
use dti_domain::user::{UserRole, UserStatus};
use dti_testing::auth::test_secret;
use dti_training::domain::repository::{
    LapRepository, LedgerRepository, PasswordHasher, ProgressRepository, TrainingRepository,
    UserRepository,
};
use dti_training::domain::types::{
    Lap, LapTexts, LedgerEntry, NewLap, NewProgress, NewUser, Progress, Training, TrainingFields,
    User, UserProfile, UserSummary,
};
use dti_training::error::TrainingServiceError;
use dti_training::state::TokenTtl;
use dti_training::usecase::ledger::LedgerKind;

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn jwt_secret() -> JwtSecret {
    test_secret()
}

pub fn token_ttl() -> TokenTtl {
    TokenTtl {
        access_secs: 300,
        refresh_secs: 3600,
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user(id: i32, username: &str, role: UserRole) -> User {
    User {
        id,
        username: username.to_owned(),
        email: format!("{username}@dti.example"),
        password_hash: "plain:password".to_owned(),
        profile: UserProfile {
            first_name: username.to_owned(),
            last_name: "Tester".to_owned(),
            role,
            ..UserProfile::default()
        },
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn inactive_user(id: i32, username: &str) -> User {
    let mut user = test_user(id, username, UserRole::Employee);
    user.profile.status = UserStatus::Deactivated;
    user
}

pub fn test_training(id: i32, date: NaiveDate, status: TrainingStatus) -> Training {
    Training {
        id,
        fields: TrainingFields {
            title: format!("Training {id}"),
            venue: "Main hall".to_owned(),
            date,
            training_type: TrainingType::Technical,
            category: TrainingCategory::Mandatory,
            status,
        },
    }
}

pub fn lap_texts() -> LapTexts {
    LapTexts {
        takeaways: "Rust ownership".to_owned(),
        goal: "Ship the service".to_owned(),
        plan: "Pair on reviews".to_owned(),
        timeframe: "Q3".to_owned(),
        support: "Mentoring".to_owned(),
        outcome: "Fewer regressions".to_owned(),
    }
}

// ── PlainHasher ──────────────────────────────────────────────────────────────

/// Stores `plain:<password>` so tests can seed hashes by hand.
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, TrainingServiceError> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, TrainingServiceError> {
        Ok(hash.strip_prefix("plain:") == Some(password))
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, TrainingServiceError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, TrainingServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, TrainingServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_summaries(&self, ids: &[i32]) -> Result<Vec<UserSummary>, TrainingServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| ids.contains(&u.id))
            .map(UserSummary::from)
            .collect())
    }

    async fn list(&self, role: Option<UserRole>) -> Result<Vec<User>, TrainingServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| role.is_none_or(|r| u.profile.role == r))
            .cloned()
            .collect())
    }

    async fn create(&self, user: &NewUser) -> Result<User, TrainingServiceError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            return Err(TrainingServiceError::UsernameTaken);
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(TrainingServiceError::EmailTaken);
        }
        let created = User {
            id: users.iter().map(|u| u.id).max().unwrap_or(0) + 1,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            profile: user.profile.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn update_profile(
        &self,
        user: &User,
        password_hash: Option<&str>,
    ) -> Result<User, TrainingServiceError> {
        let mut users = self.users.lock().unwrap();
        let stored = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(TrainingServiceError::UserNotFound)?;
        let password_hash =
            password_hash.map_or_else(|| stored.password_hash.clone(), str::to_owned);
        *stored = User {
            password_hash,
            ..user.clone()
        };
        Ok(stored.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, TrainingServiceError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

// ── MockTrainingRepo ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockTrainingRepo {
    pub trainings: Arc<Mutex<Vec<Training>>>,
}

impl MockTrainingRepo {
    pub fn new(trainings: Vec<Training>) -> Self {
        Self {
            trainings: Arc::new(Mutex::new(trainings)),
        }
    }
}

impl TrainingRepository for MockTrainingRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<Training>, TrainingServiceError> {
        Ok(self
            .trainings
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn find_many(&self, ids: &[i32]) -> Result<Vec<Training>, TrainingServiceError> {
        Ok(self
            .trainings
            .lock()
            .unwrap()
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn list(&self, range: DateRange) -> Result<Vec<Training>, TrainingServiceError> {
        Ok(self
            .trainings
            .lock()
            .unwrap()
            .iter()
            .filter(|t| range.contains(t.fields.date))
            .cloned()
            .collect())
    }

    async fn create(&self, fields: &TrainingFields) -> Result<Training, TrainingServiceError> {
        let mut trainings = self.trainings.lock().unwrap();
        let training = Training {
            id: trainings.iter().map(|t| t.id).max().unwrap_or(0) + 1,
            fields: fields.clone(),
        };
        trainings.push(training.clone());
        Ok(training)
    }

    async fn update(&self, training: &Training) -> Result<Training, TrainingServiceError> {
        let mut trainings = self.trainings.lock().unwrap();
        let stored = trainings
            .iter_mut()
            .find(|t| t.id == training.id)
            .ok_or(TrainingServiceError::TrainingNotFound)?;
        *stored = training.clone();
        Ok(training.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, TrainingServiceError> {
        let mut trainings = self.trainings.lock().unwrap();
        let before = trainings.len();
        trainings.retain(|t| t.id != id);
        Ok(trainings.len() < before)
    }

    async fn reconcile_statuses(&self, today: NaiveDate) -> Result<u64, TrainingServiceError> {
        let mut changed = 0;
        for t in self.trainings.lock().unwrap().iter_mut() {
            let status = TrainingStatus::for_date(t.fields.date, today);
            if t.fields.status != status {
                t.fields.status = status;
                changed += 1;
            }
        }
        Ok(changed)
    }
}

// ── MockLedgerRepo ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockLedgerRepo {
    pub kind: LedgerKind,
    pub entries: Arc<Mutex<Vec<LedgerEntry>>>,
}

impl MockLedgerRepo {
    pub fn new(kind: LedgerKind) -> Self {
        Self {
            kind,
            entries: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

impl LedgerRepository for MockLedgerRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<LedgerEntry>, TrainingServiceError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn find_pair(
        &self,
        user_id: i32,
        training_id: i32,
    ) -> Result<Option<LedgerEntry>, TrainingServiceError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.user_id == user_id && e.training_id == training_id)
            .cloned())
    }

    async fn list(&self, user_id: Option<i32>) -> Result<Vec<LedgerEntry>, TrainingServiceError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| user_id.is_none_or(|id| e.user_id == id))
            .cloned()
            .collect())
    }

    async fn list_for_training(
        &self,
        training_id: i32,
    ) -> Result<Vec<LedgerEntry>, TrainingServiceError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.training_id == training_id)
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        user_id: i32,
        training_id: i32,
    ) -> Result<LedgerEntry, TrainingServiceError> {
        let mut entries = self.entries.lock().unwrap();
        if entries
            .iter()
            .any(|e| e.user_id == user_id && e.training_id == training_id)
        {
            return Err(self.kind.conflict());
        }
        let entry = LedgerEntry {
            id: entries.iter().map(|e| e.id).max().unwrap_or(0) + 1,
            user_id,
            training_id,
            created_at: Utc::now(),
        };
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn update(&self, entry: &LedgerEntry) -> Result<LedgerEntry, TrainingServiceError> {
        let mut entries = self.entries.lock().unwrap();
        let stored = entries
            .iter_mut()
            .find(|e| e.id == entry.id)
            .ok_or_else(|| self.kind.not_found())?;
        stored.user_id = entry.user_id;
        stored.training_id = entry.training_id;
        Ok(stored.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, TrainingServiceError> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        Ok(entries.len() < before)
    }
}

// ── MockLapRepo ──────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockLapRepo {
    pub laps: Arc<Mutex<Vec<Lap>>>,
}

impl LapRepository for MockLapRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<Lap>, TrainingServiceError> {
        Ok(self.laps.lock().unwrap().iter().find(|l| l.id == id).cloned())
    }

    async fn list(&self, employee_id: Option<i32>) -> Result<Vec<Lap>, TrainingServiceError> {
        Ok(self
            .laps
            .lock()
            .unwrap()
            .iter()
            .filter(|l| employee_id.is_none_or(|id| l.employee_id == id))
            .cloned()
            .collect())
    }

    async fn create(&self, lap: &NewLap) -> Result<Lap, TrainingServiceError> {
        let mut laps = self.laps.lock().unwrap();
        let created = Lap {
            id: laps.iter().map(|l| l.id).max().unwrap_or(0) + 1,
            employee_id: lap.employee_id,
            training_id: lap.training_id,
            submitted_on: lap.submitted_on,
            texts: lap.texts.clone(),
            status: LapStatus::default(),
        };
        laps.push(created.clone());
        Ok(created)
    }

    async fn update(&self, lap: &Lap) -> Result<Lap, TrainingServiceError> {
        let mut laps = self.laps.lock().unwrap();
        let stored = laps
            .iter_mut()
            .find(|l| l.id == lap.id)
            .ok_or(TrainingServiceError::LapNotFound)?;
        stored.texts = lap.texts.clone();
        stored.status = lap.status;
        Ok(stored.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, TrainingServiceError> {
        let mut laps = self.laps.lock().unwrap();
        let before = laps.len();
        laps.retain(|l| l.id != id);
        Ok(laps.len() < before)
    }
}

// ── MockProgressRepo ─────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockProgressRepo {
    pub rows: Arc<Mutex<Vec<Progress>>>,
}

impl ProgressRepository for MockProgressRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<Progress>, TrainingServiceError> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, employee_id: Option<i32>) -> Result<Vec<Progress>, TrainingServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| employee_id.is_none_or(|id| p.employee_id == id))
            .cloned()
            .collect())
    }

    async fn list_by_lap(&self, lap_id: i32) -> Result<Vec<Progress>, TrainingServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.lap_id == lap_id)
            .cloned()
            .collect())
    }

    async fn create(&self, new: &NewProgress) -> Result<Progress, TrainingServiceError> {
        let mut rows = self.rows.lock().unwrap();
        let created = Progress {
            id: rows.iter().map(|p| p.id).max().unwrap_or(0) + 1,
            employee_id: new.employee_id,
            training_id: new.training_id,
            lap_id: new.lap_id,
            status: new.status,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn update(&self, item: &Progress) -> Result<Progress, TrainingServiceError> {
        let mut rows = self.rows.lock().unwrap();
        let stored = rows
            .iter_mut()
            .find(|p| p.id == item.id)
            .ok_or(TrainingServiceError::ProgressNotFound)?;
        *stored = item.clone();
        Ok(item.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, TrainingServiceError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok(rows.len() < before)
    }
}
