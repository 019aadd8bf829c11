//! Cookie-authenticated identity extractor.

use axum::Json;
use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use http::StatusCode;
use http::request::Parts;

use dti_domain::user::UserRole;

use crate::cookie::ACCESS_TOKEN_COOKIE;
use crate::token::{AuthError, JwtSecret, validate_access_token};

/// Authenticated caller, taken from a valid `access_token` cookie.
///
/// Any handler that takes an `Identity` argument is protected; a missing or invalid
/// token is rejected with 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i32,
    pub role: UserRole,
}

/// Why a request was not authenticated.
#[derive(Debug, thiserror::Error)]
pub enum IdentityRejection {
    #[error("authentication credentials were not provided")]
    MissingToken,
    #[error("access token rejected: {0}")]
    InvalidToken(#[from] AuthError),
}

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        tracing::warn!(reason = %self, "unauthenticated request");
        let body = serde_json::json!({
            "success": false,
            "kind": "UNAUTHORIZED",
            "error": self.to_string(),
        });
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for Identity
where
    JwtSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    // Values are pulled out synchronously so the returned future is 'static.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let token = CookieJar::from_headers(&parts.headers)
            .get(ACCESS_TOKEN_COOKIE)
            .map(|c| c.value().to_owned());

        async move {
            let token = token.ok_or(IdentityRejection::MissingToken)?;
            let info = validate_access_token(&token, &secret)?;
            Ok(Self {
                user_id: info.user_id,
                role: info.role,
            })
        }
    }
}
