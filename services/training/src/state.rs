use std::sync::Arc;

use axum::extract::FromRef;
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use dti_auth_types::token::JwtSecret;
use dti_core::clock::Clock;

use crate::infra::db::{
    DbAssignmentRepository, DbCompetencyRepository, DbEnrollmentRepository, DbLapRepository,
    DbProgressRepository, DbSupervisionRepository, DbTrainingRepository, DbUserRepository,
};
use crate::infra::password::Argon2PasswordHasher;

/// Lifetimes of issued tokens, in seconds.
#[derive(Debug, Clone, Copy)]
pub struct TokenTtl {
    pub access_secs: u64,
    pub refresh_secs: u64,
}

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: JwtSecret,
    pub token_ttl: TokenTtl,
    pub clock: Arc<dyn Clock>,
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_secret.clone()
    }
}

impl AppState {
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn training_repo(&self) -> DbTrainingRepository {
        DbTrainingRepository {
            db: self.db.clone(),
        }
    }

    pub fn assignment_repo(&self) -> DbAssignmentRepository {
        DbAssignmentRepository {
            db: self.db.clone(),
        }
    }

    pub fn enrollment_repo(&self) -> DbEnrollmentRepository {
        DbEnrollmentRepository {
            db: self.db.clone(),
        }
    }

    pub fn supervision_repo(&self) -> DbSupervisionRepository {
        DbSupervisionRepository {
            db: self.db.clone(),
        }
    }

    pub fn competency_repo(&self) -> DbCompetencyRepository {
        DbCompetencyRepository {
            db: self.db.clone(),
        }
    }

    pub fn lap_repo(&self) -> DbLapRepository {
        DbLapRepository {
            db: self.db.clone(),
        }
    }

    pub fn progress_repo(&self) -> DbProgressRepository {
        DbProgressRepository {
            db: self.db.clone(),
        }
    }

    pub fn password_hasher(&self) -> Argon2PasswordHasher {
        Argon2PasswordHasher
    }
}
