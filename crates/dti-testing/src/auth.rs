//! Mock auth helpers for integration tests.
//!
//! Protected routes read the caller from the `access_token` cookie. `MockAuth` signs a
//! real access token with the test secret so requests pass the `Identity` extractor
//! without going through `/auth/login`.

use axum::http::{HeaderMap, HeaderValue, header};
use dti_auth_types::cookie::ACCESS_TOKEN_COOKIE;
use dti_auth_types::token::{JwtSecret, TokenKind, issue_token};
use dti_domain::user::UserRole;

/// Secret shared by test app states and `MockAuth`.
pub const TEST_JWT_SECRET: &str = "dti-test-secret";

pub fn test_secret() -> JwtSecret {
    JwtSecret::new(TEST_JWT_SECRET)
}

/// Identity injected into test requests.
pub struct MockAuth {
    pub user_id: i32,
    pub role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: i32, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn admin(user_id: i32) -> Self {
        Self::new(user_id, UserRole::Admin)
    }

    pub fn employee(user_id: i32) -> Self {
        Self::new(user_id, UserRole::Employee)
    }

    /// `access_token=<jwt>` signed with [`TEST_JWT_SECRET`].
    pub fn cookie(&self) -> String {
        let (token, _) = issue_token(
            self.user_id,
            self.role,
            TokenKind::Access,
            300,
            &test_secret(),
        )
        .expect("sign test token");
        format!("{ACCESS_TOKEN_COOKIE}={token}")
    }

    /// Headers carrying the cookie, as a browser would send them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            header::COOKIE,
            HeaderValue::from_str(&self.cookie()).expect("cookie header"),
        );
        map
    }
}
