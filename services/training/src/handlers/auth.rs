use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use serde_json::{Value, json};

use dti_auth_types::cookie::{
    REFRESH_TOKEN_COOKIE, clear_cookies, set_access_token_cookie, set_refresh_token_cookie,
};
use dti_auth_types::identity::Identity;

use crate::error::TrainingServiceError;
use crate::handlers::{FieldReader, Payload, unreadable};
use crate::state::AppState;
use crate::usecase::auth::{LoginUseCase, RefreshTokenUseCase};
use crate::usecase::user::GetUserUseCase;

const X_ACCESS_TOKEN_EXPIRES: HeaderName = HeaderName::from_static("x-access-token-expires");

fn token_expires_header(exp: u64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(X_ACCESS_TOKEN_EXPIRES, HeaderValue::from(exp));
    headers
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

/// `identifier` is a username or an email address.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Payload(body): Payload,
) -> Result<impl IntoResponse, TrainingServiceError> {
    let mut r = FieldReader::new(&body);
    let identifier = r.text("identifier");
    let password = r.text("password");
    r.finish()?;
    let (Some(identifier), Some(password)) = (identifier, password) else {
        return Err(unreadable());
    };

    let usecase = LoginUseCase {
        users: state.user_repo(),
        hasher: state.password_hasher(),
        jwt_secret: state.jwt_secret.clone(),
        ttl: state.token_ttl,
    };
    let out = usecase.execute(identifier.trim(), &password).await?;

    let jar = set_access_token_cookie(jar, out.access_token.clone(), state.token_ttl.access_secs);
    let jar = set_refresh_token_cookie(
        jar,
        out.refresh_token.clone(),
        state.token_ttl.refresh_secs,
    );
    let body = json!({
        "success": true,
        "access_token": out.access_token,
        "refresh_token": out.refresh_token,
    });
    Ok((jar, token_expires_header(out.access_token_exp), Json(body)))
}

// ── POST /auth/refresh ───────────────────────────────────────────────────────

/// Reissues the access cookie. Failures answer `{"refreshed": false, "error": ...}`.
pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> Response {
    let Some(refresh_token) = jar.get(REFRESH_TOKEN_COOKIE).map(|c| c.value().to_owned()) else {
        tracing::warn!("refresh attempted without a refresh cookie");
        return refresh_failed("refresh token not provided");
    };

    let usecase = RefreshTokenUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
        ttl: state.token_ttl,
    };
    match usecase.execute(&refresh_token).await {
        Ok(out) => {
            let jar = set_access_token_cookie(jar, out.access_token, state.token_ttl.access_secs);
            (
                jar,
                token_expires_header(out.access_token_exp),
                Json(json!({ "refreshed": true })),
            )
                .into_response()
        }
        Err(e @ TrainingServiceError::InvalidRefreshToken) => refresh_failed(&e.to_string()),
        Err(e) => e.into_response(),
    }
}

fn refresh_failed(error: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "refreshed": false, "error": error })),
    )
        .into_response()
}

// ── POST /auth/logout ────────────────────────────────────────────────────────

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (
        clear_cookies(jar),
        Json(json!({ "success": true, "message": "logged out" })),
    )
}

// ── GET /auth/me ─────────────────────────────────────────────────────────────

pub async fn me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Value>, TrainingServiceError> {
    let uc = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = uc
        .execute(identity.user_id)
        .await
        .map_err(|e| match e {
            TrainingServiceError::UserNotFound => TrainingServiceError::InvalidToken,
            other => other,
        })?;
    Ok(Json(json!({ "authenticated": true, "user": user.username })))
}
