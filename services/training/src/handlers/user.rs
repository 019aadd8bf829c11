use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use dti_auth_types::identity::Identity;
use dti_domain::user::{Department, Specialization, UserRole, UserStatus};

use crate::domain::types::{User, UserProfile, UserSummary};
use crate::error::TrainingServiceError;
use crate::handlers::{EntityId, FieldReader, Payload, created, deleted, success, unreadable};
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase,
    UpdateUserInput, UpdateUserUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

/// Public profile. The password hash is never part of it.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub contact: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    pub department: Department,
    pub specialization: Specialization,
    #[serde(serialize_with = "dti_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "dti_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            first_name: u.profile.first_name,
            middle_name: u.profile.middle_name,
            last_name: u.profile.last_name,
            contact: u.profile.contact,
            role: u.profile.role,
            status: u.profile.status,
            department: u.profile.department,
            specialization: u.profile.specialization,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Short form embedded in assignment, enrollment and member listings.
#[derive(Serialize)]
pub struct UserSummaryResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

impl From<UserSummary> for UserSummaryResponse {
    fn from(u: UserSummary) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            role: u.role,
        }
    }
}

fn users_response(users: Vec<User>) -> Vec<UserResponse> {
    users.into_iter().map(UserResponse::from).collect()
}

// ── Request parsing ──────────────────────────────────────────────────────────

fn read_new_user(r: &mut FieldReader<'_>) -> Result<CreateUserInput, TrainingServiceError> {
    let username = r.text("username");
    let email = r.email("email");
    let password = r.text("password");
    let first_name = r.opt_text("first_name").unwrap_or_default();
    let middle_name = r.opt_text("middle_name").filter(|s| !s.is_empty());
    let last_name = r.opt_text("last_name").unwrap_or_default();
    let contact = r.opt_text("contact").filter(|s| !s.is_empty());
    let role: UserRole = r.opt_choice("role").unwrap_or_default();
    let status: UserStatus = r.opt_choice("status").unwrap_or_default();
    let department: Department = r.opt_choice("department").unwrap_or_default();
    let specialization: Specialization = r.opt_choice("specialization").unwrap_or_default();

    let (Some(username), Some(email), Some(password)) = (username, email, password) else {
        return Err(unreadable());
    };
    Ok(CreateUserInput {
        username,
        email,
        password,
        profile: UserProfile {
            first_name,
            middle_name,
            last_name,
            contact,
            role,
            status,
            department,
            specialization,
        },
    })
}

// ── POST /auth/register ──────────────────────────────────────────────────────

/// Public self-registration. Only the credentials are taken from the body; the
/// profile starts from its defaults.
pub async fn register(
    State(state): State<AppState>,
    Payload(body): Payload,
) -> Result<(StatusCode, Json<Value>), TrainingServiceError> {
    let mut r = FieldReader::new(&body);
    let username = r.text("username");
    let email = r.email("email");
    let password = r.text("password");
    r.finish()?;
    let (Some(username), Some(email), Some(password)) = (username, email, password) else {
        return Err(unreadable());
    };

    let uc = CreateUserUseCase {
        repo: state.user_repo(),
        hasher: state.password_hasher(),
    };
    let user = uc
        .execute(CreateUserInput {
            username,
            email,
            password,
            profile: UserProfile::default(),
        })
        .await?;
    Ok(created("user", UserResponse::from(user)))
}

// ── POST /users ──────────────────────────────────────────────────────────────

pub async fn create_user(
    _identity: Identity,
    State(state): State<AppState>,
    Payload(body): Payload,
) -> Result<(StatusCode, Json<Value>), TrainingServiceError> {
    let mut r = FieldReader::new(&body);
    let input = read_new_user(&mut r);
    r.finish()?;

    let uc = CreateUserUseCase {
        repo: state.user_repo(),
        hasher: state.password_hasher(),
    };
    let user = uc.execute(input?).await?;
    Ok(created("user", UserResponse::from(user)))
}

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_users(
    _identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = uc.execute(None).await?;
    Ok(success("users", users_response(users)))
}

// ── GET /employees ───────────────────────────────────────────────────────────

pub async fn list_employees(
    _identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = uc.execute(Some(UserRole::Employee)).await?;
    Ok(success("employees", users_response(users)))
}

// ── GET /users/me ────────────────────────────────────────────────────────────

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = uc.execute(identity.user_id).await?;
    Ok(success("user", UserResponse::from(user)))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = uc.execute(id).await?;
    Ok(success("user", UserResponse::from(user)))
}

// ── PUT /users/{id} ──────────────────────────────────────────────────────────

/// Partial update. A `password` in the body is re-hashed and stored on its own.
pub async fn update_user(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    Payload(body): Payload,
) -> Result<Json<Value>, TrainingServiceError> {
    let mut r = FieldReader::new(&body);
    let input = UpdateUserInput {
        username: r.opt_nonblank("username"),
        email: r.opt_email("email"),
        password: r.opt_nonblank("password"),
        first_name: r.opt_text("first_name"),
        middle_name: r.opt_text("middle_name"),
        last_name: r.opt_text("last_name"),
        contact: r.opt_text("contact"),
        role: r.opt_choice("role"),
        status: r.opt_choice("status"),
        department: r.opt_choice("department"),
        specialization: r.opt_choice("specialization"),
    };
    r.finish()?;

    let uc = UpdateUserUseCase {
        repo: state.user_repo(),
        hasher: state.password_hasher(),
    };
    let user = uc.execute(id, input).await?;
    Ok(success("user", UserResponse::from(user)))
}

// ── DELETE /users/{id} ───────────────────────────────────────────────────────

pub async fn delete_user(
    _identity: Identity,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = DeleteUserUseCase {
        repo: state.user_repo(),
    };
    uc.execute(id).await?;
    Ok(deleted("user deleted"))
}
