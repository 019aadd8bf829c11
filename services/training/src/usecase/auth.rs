use dti_auth_types::token::{JwtSecret, TokenKind, issue_token, validate_refresh_token};

use crate::domain::repository::{PasswordHasher, UserRepository};
use crate::domain::types::User;
use crate::error::TrainingServiceError;
use crate::state::TokenTtl;

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginOutput {
    pub user: User,
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

/// Password login. `identifier` is matched against the username first, then the email.
pub struct LoginUseCase<R: UserRepository, H: PasswordHasher> {
    pub users: R,
    pub hasher: H,
    pub jwt_secret: JwtSecret,
    pub ttl: TokenTtl,
}

impl<R: UserRepository, H: PasswordHasher> LoginUseCase<R, H> {
    pub async fn execute(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<LoginOutput, TrainingServiceError> {
        let user = match self.users.find_by_username(identifier).await? {
            Some(user) => Some(user),
            None => self.users.find_by_email(identifier).await?,
        };
        let user = user.ok_or(TrainingServiceError::InvalidCredentials)?;

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(TrainingServiceError::InvalidCredentials);
        }
        if !user.profile.status.is_active() {
            return Err(TrainingServiceError::InactiveAccount);
        }

        let (access_token, access_token_exp) = issue(&user, TokenKind::Access, self)?;
        let (refresh_token, _) = issue(&user, TokenKind::Refresh, self)?;
        tracing::info!(user_id = user.id, "login succeeded");
        Ok(LoginOutput {
            user,
            access_token,
            access_token_exp,
            refresh_token,
        })
    }
}

fn issue<R: UserRepository, H: PasswordHasher>(
    user: &User,
    kind: TokenKind,
    usecase: &LoginUseCase<R, H>,
) -> Result<(String, u64), TrainingServiceError> {
    let ttl = match kind {
        TokenKind::Access => usecase.ttl.access_secs,
        TokenKind::Refresh => usecase.ttl.refresh_secs,
    };
    issue_token(user.id, user.profile.role, kind, ttl, &usecase.jwt_secret)
        .map_err(|e| anyhow::Error::new(e).context("sign token").into())
}

// ── Refresh ──────────────────────────────────────────────────────────────────

pub struct RefreshOutput {
    pub access_token: String,
    pub access_token_exp: u64,
}

/// Trade a refresh token for a new access token. The account must still exist and be
/// active.
pub struct RefreshTokenUseCase<R: UserRepository> {
    pub users: R,
    pub jwt_secret: JwtSecret,
    pub ttl: TokenTtl,
}

impl<R: UserRepository> RefreshTokenUseCase<R> {
    pub async fn execute(&self, refresh_token: &str) -> Result<RefreshOutput, TrainingServiceError> {
        let info = validate_refresh_token(refresh_token, &self.jwt_secret).map_err(|e| {
            tracing::warn!(error = %e, "refresh token rejected");
            TrainingServiceError::InvalidRefreshToken
        })?;
        let user = self
            .users
            .find_by_id(info.user_id)
            .await?
            .filter(|u| u.profile.status.is_active())
            .ok_or(TrainingServiceError::InvalidRefreshToken)?;

        let (access_token, access_token_exp) = issue_token(
            user.id,
            user.profile.role,
            TokenKind::Access,
            self.ttl.access_secs,
            &self.jwt_secret,
        )
        .map_err(|e| anyhow::Error::new(e).context("sign access token"))?;
        Ok(RefreshOutput {
            access_token,
            access_token_exp,
        })
    }
}
