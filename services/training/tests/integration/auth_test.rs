use dti_auth_types::token::{TokenKind, issue_token, validate_access_token};
use dti_domain::user::UserRole;
use dti_training::domain::types::User;
use dti_training::error::TrainingServiceError;
use dti_training::usecase::auth::{LoginUseCase, RefreshTokenUseCase};

use crate::helpers::{
    MockUserRepo, PlainHasher, inactive_user, jwt_secret, test_user, token_ttl,
};

fn login(users: Vec<User>) -> LoginUseCase<MockUserRepo, PlainHasher> {
    LoginUseCase {
        users: MockUserRepo::new(users),
        hasher: PlainHasher,
        jwt_secret: jwt_secret(),
        ttl: token_ttl(),
    }
}

// ── LoginUseCase ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_login_with_username_or_email() {
    let uc = login(vec![test_user(1, "ana", UserRole::Supervisor)]);

    let by_name = uc.execute("ana", "password").await.unwrap();
    assert_eq!(by_name.user.id, 1);
    let info = validate_access_token(&by_name.access_token, &jwt_secret()).unwrap();
    assert_eq!(info.user_id, 1);
    assert_eq!(info.role, UserRole::Supervisor);
    assert!(!by_name.refresh_token.is_empty());

    let by_email = uc.execute("ana@dti.example", "password").await.unwrap();
    assert_eq!(by_email.user.id, 1);
}

#[tokio::test]
async fn should_reject_wrong_password_and_unknown_user_alike() {
    let uc = login(vec![test_user(1, "ana", UserRole::Employee)]);

    let wrong = uc.execute("ana", "nope").await;
    assert!(
        matches!(wrong, Err(TrainingServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {:?}",
        wrong.err()
    );

    let unknown = uc.execute("ghost", "password").await;
    assert!(matches!(
        unknown,
        Err(TrainingServiceError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn should_refuse_login_to_deactivated_account() {
    let uc = login(vec![inactive_user(2, "gone")]);

    let result = uc.execute("gone", "password").await;
    assert!(
        matches!(result, Err(TrainingServiceError::InactiveAccount)),
        "expected InactiveAccount, got {:?}",
        result.err()
    );
}

// ── RefreshTokenUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_access_token_from_refresh_token() {
    let user = test_user(1, "ana", UserRole::Employee);
    let (refresh, _) = issue_token(
        user.id,
        user.profile.role,
        TokenKind::Refresh,
        3600,
        &jwt_secret(),
    )
    .unwrap();
    let uc = RefreshTokenUseCase {
        users: MockUserRepo::new(vec![user]),
        jwt_secret: jwt_secret(),
        ttl: token_ttl(),
    };

    let out = uc.execute(&refresh).await.unwrap();

    let info = validate_access_token(&out.access_token, &jwt_secret()).unwrap();
    assert_eq!(info.user_id, 1);
    assert!(out.access_token_exp > 0);
}

#[tokio::test]
async fn should_reject_access_token_presented_as_refresh_token() {
    let user = test_user(1, "ana", UserRole::Employee);
    let (access, _) = issue_token(
        user.id,
        user.profile.role,
        TokenKind::Access,
        300,
        &jwt_secret(),
    )
    .unwrap();
    let uc = RefreshTokenUseCase {
        users: MockUserRepo::new(vec![user]),
        jwt_secret: jwt_secret(),
        ttl: token_ttl(),
    };

    let result = uc.execute(&access).await;
    assert!(matches!(
        result,
        Err(TrainingServiceError::InvalidRefreshToken)
    ));
}

#[tokio::test]
async fn should_reject_refresh_for_deleted_or_deactivated_user() {
    let (refresh, _) = issue_token(2, UserRole::Employee, TokenKind::Refresh, 3600, &jwt_secret())
        .unwrap();

    let deleted = RefreshTokenUseCase {
        users: MockUserRepo::new(vec![]),
        jwt_secret: jwt_secret(),
        ttl: token_ttl(),
    };
    assert!(matches!(
        deleted.execute(&refresh).await,
        Err(TrainingServiceError::InvalidRefreshToken)
    ));

    let deactivated = RefreshTokenUseCase {
        users: MockUserRepo::new(vec![inactive_user(2, "gone")]),
        jwt_secret: jwt_secret(),
        ttl: token_ttl(),
    };
    assert!(matches!(
        deactivated.execute(&refresh).await,
        Err(TrainingServiceError::InvalidRefreshToken)
    ));
}
