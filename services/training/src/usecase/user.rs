use dti_domain::user::{Department, Specialization, UserRole, UserStatus};

use crate::domain::repository::{PasswordHasher, UserRepository};
use crate::domain::types::{NewUser, User, UserProfile};
use crate::error::TrainingServiceError;

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub profile: UserProfile,
}

/// Admin-side account creation and public self-registration.
pub struct CreateUserUseCase<R: UserRepository, H: PasswordHasher> {
    pub repo: R,
    pub hasher: H,
}

impl<R: UserRepository, H: PasswordHasher> CreateUserUseCase<R, H> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, TrainingServiceError> {
        if self.repo.find_by_username(&input.username).await?.is_some() {
            return Err(TrainingServiceError::UsernameTaken);
        }
        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(TrainingServiceError::EmailTaken);
        }
        let password_hash = self.hasher.hash(&input.password)?;
        let user = self
            .repo
            .create(&NewUser {
                username: input.username,
                email: input.email,
                password_hash,
                profile: input.profile,
            })
            .await?;
        tracing::info!(user_id = user.id, role = %user.profile.role, "user created");
        Ok(user)
    }
}

// ── GetUser / ListUsers ──────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: i32) -> Result<User, TrainingServiceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(TrainingServiceError::UserNotFound)
    }
}

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    /// `role = Some(Employee)` backs the `/employees` listing.
    pub async fn execute(&self, role: Option<UserRole>) -> Result<Vec<User>, TrainingServiceError> {
        self.repo.list(role).await
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

/// Partial update. `None` leaves a field as it is; an empty `middle_name` or
/// `contact` clears it.
#[derive(Default)]
pub struct UpdateUserInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub contact: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub department: Option<Department>,
    pub specialization: Option<Specialization>,
}

pub struct UpdateUserUseCase<R: UserRepository, H: PasswordHasher> {
    pub repo: R,
    pub hasher: H,
}

impl<R: UserRepository, H: PasswordHasher> UpdateUserUseCase<R, H> {
    pub async fn execute(
        &self,
        user_id: i32,
        input: UpdateUserInput,
    ) -> Result<User, TrainingServiceError> {
        let mut user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(TrainingServiceError::UserNotFound)?;

        if let Some(username) = input.username {
            if username != user.username {
                if self.repo.find_by_username(&username).await?.is_some() {
                    return Err(TrainingServiceError::UsernameTaken);
                }
                user.username = username;
            }
        }
        if let Some(email) = input.email {
            if email != user.email {
                if self.repo.find_by_email(&email).await?.is_some() {
                    return Err(TrainingServiceError::EmailTaken);
                }
                user.email = email;
            }
        }

        let p = &mut user.profile;
        if let Some(v) = input.first_name {
            p.first_name = v;
        }
        if let Some(v) = input.last_name {
            p.last_name = v;
        }
        if let Some(v) = input.middle_name {
            p.middle_name = Some(v).filter(|s| !s.is_empty());
        }
        if let Some(v) = input.contact {
            p.contact = Some(v).filter(|s| !s.is_empty());
        }
        if let Some(v) = input.role {
            p.role = v;
        }
        if let Some(v) = input.status {
            p.status = v;
        }
        if let Some(v) = input.department {
            p.department = v;
        }
        if let Some(v) = input.specialization {
            p.specialization = v;
        }

        // No write happens until the new password is hashed.
        let password_hash = input
            .password
            .map(|password| self.hasher.hash(&password))
            .transpose()?;
        let updated = self
            .repo
            .update_profile(&user, password_hash.as_deref())
            .await?;
        if password_hash.is_some() {
            tracing::info!(user_id, "password changed");
        }
        Ok(updated)
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    pub async fn execute(&self, user_id: i32) -> Result<(), TrainingServiceError> {
        if !self.repo.delete(user_id).await? {
            return Err(TrainingServiceError::UserNotFound);
        }
        tracing::info!(user_id, "user deleted");
        Ok(())
    }
}
