use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use dti_core::error::{FailureBody, FieldErrors, failure_response};
use dti_domain::lap::LapTransitionError;

/// Training service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum TrainingServiceError {
    #[error("invalid fields: {0}")]
    Validation(FieldErrors),
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error("no resource matches id \"{0}\"")]
    UnknownId(String),
    #[error("user not found")]
    UserNotFound,
    #[error("training not found")]
    TrainingNotFound,
    #[error("assignment not found")]
    AssignmentNotFound,
    #[error("enrollment not found")]
    EnrollmentNotFound,
    #[error("supervision link not found")]
    SupervisionNotFound,
    #[error("competency not found")]
    CompetencyNotFound,
    #[error("learning action plan not found")]
    LapNotFound,
    #[error("progress not found")]
    ProgressNotFound,
    #[error("a user with that username already exists")]
    UsernameTaken,
    #[error("a user with that email already exists")]
    EmailTaken,
    #[error("user already assigned to this training")]
    AlreadyAssigned,
    #[error("user already enrolled in this training")]
    AlreadyEnrolled,
    #[error("training is {0} and no longer accepts assignments")]
    TrainingClosed(dti_domain::training::TrainingStatus),
    #[error(transparent)]
    LapFinalized(#[from] LapTransitionError),
    #[error("integrity error: {0}")]
    Integrity(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("account is not active")]
    InactiveAccount,
    #[error("invalid token")]
    InvalidToken,
    #[error("refresh token not found or invalid")]
    InvalidRefreshToken,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl TrainingServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::MalformedBody(_) => "MALFORMED_BODY",
            Self::UnknownId(_) => "NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::TrainingNotFound => "TRAINING_NOT_FOUND",
            Self::AssignmentNotFound => "ASSIGNMENT_NOT_FOUND",
            Self::EnrollmentNotFound => "ENROLLMENT_NOT_FOUND",
            Self::SupervisionNotFound => "SUPERVISION_NOT_FOUND",
            Self::CompetencyNotFound => "COMPETENCY_NOT_FOUND",
            Self::LapNotFound => "LAP_NOT_FOUND",
            Self::ProgressNotFound => "PROGRESS_NOT_FOUND",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::AlreadyAssigned => "ALREADY_ASSIGNED",
            Self::AlreadyEnrolled => "ALREADY_ENROLLED",
            Self::TrainingClosed(_) => "TRAINING_CLOSED",
            Self::LapFinalized(_) => "LAP_FINALIZED",
            Self::Integrity(_) => "INTEGRITY",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InactiveAccount => "INACTIVE_ACCOUNT",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnknownId(_)
            | Self::UserNotFound
            | Self::TrainingNotFound
            | Self::AssignmentNotFound
            | Self::EnrollmentNotFound
            | Self::SupervisionNotFound
            | Self::CompetencyNotFound
            | Self::LapNotFound
            | Self::ProgressNotFound => StatusCode::NOT_FOUND,
            Self::InvalidCredentials
            | Self::InactiveAccount
            | Self::InvalidToken
            | Self::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_)
            | Self::MalformedBody(_)
            | Self::UsernameTaken
            | Self::EmailTaken
            | Self::AlreadyAssigned
            | Self::AlreadyEnrolled
            | Self::TrainingClosed(_)
            | Self::LapFinalized(_)
            | Self::Integrity(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Single-field validation failure.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        Self::Validation(FieldErrors::single(field, message))
    }
}

impl From<FieldErrors> for TrainingServiceError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl IntoResponse for TrainingServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();
        match &self {
            Self::Internal(e) => tracing::error!(error = ?e, kind, "internal error"),
            _ => tracing::warn!(error = %self, kind, "request rejected"),
        }
        let body = match &self {
            Self::Validation(errors) => FailureBody::Fields(errors),
            _ => FailureBody::Message(self.to_string()),
        };
        failure_response(status, kind, body)
    }
}
