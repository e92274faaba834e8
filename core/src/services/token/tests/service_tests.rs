//! Unit tests for the token service

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use uuid::Uuid;

use gk_shared::contracts::{AuthRequest, AuthResponse, UserDto};

use crate::domain::entities::token::{Claims, RefreshToken};
use crate::errors::{AuthError, DomainError, MessagingError, TokenError};
use crate::messaging::RequestClient;
use crate::repositories::refresh_token::{MockRefreshTokenRepository, RefreshTokenRepository};
use crate::services::token::{TokenService, TokenServiceConfig};

/// Scripted credential authority behaviors for driving the login protocol
enum OracleBehavior {
    Grant(UserDto),
    Deny(String),
    Timeout,
    BrokerDown,
}

struct StubCredentialClient {
    behavior: OracleBehavior,
}

#[async_trait]
impl RequestClient<AuthRequest, AuthResponse> for StubCredentialClient {
    async fn request(&self, _request: AuthRequest) -> Result<AuthResponse, MessagingError> {
        match &self.behavior {
            OracleBehavior::Grant(user) => Ok(AuthResponse::granted(user.clone())),
            OracleBehavior::Deny(message) => Ok(AuthResponse::denied(message.clone())),
            OracleBehavior::Timeout => Err(MessagingError::Timeout { timeout_secs: 30 }),
            OracleBehavior::BrokerDown => Err(MessagingError::BrokerUnavailable {
                message: "request queue closed".to_string(),
            }),
        }
    }
}

/// Repository that fails every write, for storage-failure propagation tests
struct FailingRepository;

#[async_trait]
impl RefreshTokenRepository for FailingRepository {
    async fn create(&self, _token: RefreshToken) -> Result<RefreshToken, DomainError> {
        Err(DomainError::Storage {
            message: "connection lost".to_string(),
        })
    }

    async fn find_by_token(&self, _token: &str) -> Result<Option<RefreshToken>, DomainError> {
        Err(DomainError::Storage {
            message: "connection lost".to_string(),
        })
    }

    async fn revoke(&self, _token: &str) -> Result<bool, DomainError> {
        Err(DomainError::Storage {
            message: "connection lost".to_string(),
        })
    }

    async fn find_by_user_id(&self, _user_id: i64) -> Result<Vec<RefreshToken>, DomainError> {
        Err(DomainError::Storage {
            message: "connection lost".to_string(),
        })
    }

    async fn delete(&self, _id: Uuid) -> Result<bool, DomainError> {
        Err(DomainError::Storage {
            message: "connection lost".to_string(),
        })
    }
}

fn alice() -> UserDto {
    UserDto {
        id: 7,
        username: "alice".to_string(),
        email: "a@x.com".to_string(),
        roles: vec!["User".to_string()],
        groups: vec![],
    }
}

fn create_service(
    behavior: OracleBehavior,
) -> (
    TokenService<MockRefreshTokenRepository, StubCredentialClient>,
    MockRefreshTokenRepository,
) {
    let repository = MockRefreshTokenRepository::new();
    let service = TokenService::new(
        repository.clone(),
        StubCredentialClient { behavior },
        TokenServiceConfig::default(),
    );
    (service, repository)
}

#[tokio::test]
async fn test_login_success_returns_tokens_and_profile() {
    let (service, repository) = create_service(OracleBehavior::Grant(alice()));

    let response = service.login("alice", "correct").await.unwrap();

    assert_eq!(response.user, alice());
    assert!(!response.access_token.is_empty());
    assert!(!response.refresh_token.is_empty());

    // The access token round-trips through validation with the user's claims
    let claims = service.validate_access_token(&response.access_token).unwrap();
    assert_eq!(claims.sub, "7");
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.roles, vec!["User".to_string()]);
    assert!(claims.groups.is_empty());

    // Exactly one refresh token row, owned by user 7, fresh and unrevoked
    assert_eq!(repository.len().await, 1);
    let stored = repository
        .find_by_token(&response.refresh_token)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.user_id, 7);
    assert!(!stored.is_revoked);
    let remaining = stored.expires_at - Utc::now();
    assert!(remaining > Duration::days(29));
    assert!(remaining <= Duration::days(30));
}

#[tokio::test]
async fn test_login_failure_propagates_authority_message() {
    let (service, repository) =
        create_service(OracleBehavior::Deny("Invalid username or password".to_string()));

    let err = service.login("alice", "wrong").await.unwrap_err();

    match err {
        DomainError::Auth(AuthError::InvalidCredentials { message }) => {
            assert_eq!(message, "Invalid username or password");
        }
        other => panic!("expected InvalidCredentials, got {:?}", other),
    }

    // No refresh token row is created on failure
    assert!(repository.is_empty().await);
}

#[tokio::test]
async fn test_login_timeout_is_not_unauthorized() {
    let (service, repository) = create_service(OracleBehavior::Timeout);

    let err = service.login("alice", "correct").await.unwrap_err();

    assert!(matches!(
        err,
        DomainError::Messaging(MessagingError::Timeout { .. })
    ));
    assert!(err.is_retryable());
    assert!(!err.is_unauthorized());
    assert!(repository.is_empty().await);
}

#[tokio::test]
async fn test_login_broker_outage_aborts_without_side_effects() {
    let (service, repository) = create_service(OracleBehavior::BrokerDown);

    let err = service.login("alice", "correct").await.unwrap_err();

    assert!(matches!(
        err,
        DomainError::Messaging(MessagingError::BrokerUnavailable { .. })
    ));
    assert!(repository.is_empty().await);
}

#[tokio::test]
async fn test_login_success_without_profile_is_invalid_state() {
    // A malformed authority response must not mint anything.
    struct NoProfileClient;

    #[async_trait]
    impl RequestClient<AuthRequest, AuthResponse> for NoProfileClient {
        async fn request(&self, _request: AuthRequest) -> Result<AuthResponse, MessagingError> {
            Ok(AuthResponse {
                success: true,
                error: None,
                user: None,
            })
        }
    }

    let repository = MockRefreshTokenRepository::new();
    let service = TokenService::new(
        repository.clone(),
        NoProfileClient,
        TokenServiceConfig::default(),
    );

    let err = service.login("alice", "correct").await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidState { .. }));
    assert!(repository.is_empty().await);
}

#[tokio::test]
async fn test_access_token_round_trip() {
    let (service, _) = create_service(OracleBehavior::Grant(alice()));
    let user = UserDto {
        id: 42,
        username: "bob".to_string(),
        email: "bob@x.com".to_string(),
        roles: vec!["Admin".to_string(), "User".to_string()],
        groups: vec!["Editors".to_string()],
    };

    let token = service.generate_access_token(&user).unwrap();
    let claims = service.validate_access_token(&token).unwrap();

    assert_eq!(claims.user_id().unwrap(), 42);
    assert_eq!(claims.username, user.username);
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.roles, user.roles);
    assert_eq!(claims.groups, user.groups);
    assert_eq!(claims.iss, "gatekeeper");
    assert_eq!(claims.aud, "gatekeeper-api");
    assert_eq!(claims.exp - claims.iat, 30 * 60);
}

#[tokio::test]
async fn test_expired_access_token_fails_with_expired() {
    let (service, _) = create_service(OracleBehavior::Grant(alice()));
    let config = TokenServiceConfig::default();

    // Structurally valid token whose expiry has already passed
    let mut claims = Claims::new_access_token(&alice(), &config.issuer, &config.audience, 30);
    claims.exp = Utc::now().timestamp() - 60;
    claims.iat = claims.exp - 30 * 60;
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .unwrap();

    let err = service.validate_access_token(&token).unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::TokenExpired)));
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_garbled_access_token_is_invalid() {
    let (service, _) = create_service(OracleBehavior::Grant(alice()));

    let err = service.validate_access_token("not-a-jwt").unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::InvalidToken(_))
    ));
}

#[tokio::test]
async fn test_access_token_from_wrong_issuer_is_invalid() {
    let (service, _) = create_service(OracleBehavior::Grant(alice()));
    let config = TokenServiceConfig::default();

    let claims = Claims::new_access_token(&alice(), "someone-else", &config.audience, 30);
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .unwrap();

    let err = service.validate_access_token(&token).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::InvalidToken(_))
    ));
}

#[tokio::test]
async fn test_access_token_signed_with_other_secret_is_invalid() {
    let (service, _) = create_service(OracleBehavior::Grant(alice()));

    let forger = TokenService::new(
        MockRefreshTokenRepository::new(),
        StubCredentialClient {
            behavior: OracleBehavior::Grant(alice()),
        },
        TokenServiceConfig {
            jwt_secret: "a-different-secret-entirely".to_string(),
            ..TokenServiceConfig::default()
        },
    );

    let forged = forger.generate_access_token(&alice()).unwrap();
    let err = service.validate_access_token(&forged).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::InvalidToken(_))
    ));
}

#[tokio::test]
async fn test_generated_refresh_tokens_are_distinct() {
    let (service, _) = create_service(OracleBehavior::Grant(alice()));

    let first = service.generate_refresh_token(7).await.unwrap();
    let second = service.generate_refresh_token(7).await.unwrap();

    assert_ne!(first, second);
}

#[tokio::test]
async fn test_validate_refresh_token_accepts_fresh_token() {
    let (service, _) = create_service(OracleBehavior::Grant(alice()));

    let token = service.generate_refresh_token(7).await.unwrap();
    assert!(service.validate_refresh_token(&token).await.unwrap());
}

#[tokio::test]
async fn test_validate_refresh_token_rejects_unknown_token() {
    let (service, _) = create_service(OracleBehavior::Grant(alice()));

    // Unknown or garbled values are a plain false, not an error
    assert!(!service.validate_refresh_token("no-such-token").await.unwrap());
    assert!(!service.validate_refresh_token("").await.unwrap());
}

#[tokio::test]
async fn test_validate_refresh_token_rejects_revoked_token() {
    let (service, _) = create_service(OracleBehavior::Grant(alice()));

    let token = service.generate_refresh_token(7).await.unwrap();
    service.revoke_refresh_token(&token).await.unwrap();

    assert!(!service.validate_refresh_token(&token).await.unwrap());
}

#[tokio::test]
async fn test_validate_refresh_token_rejects_expired_token() {
    let (service, repository) = create_service(OracleBehavior::Grant(alice()));

    let mut expired = RefreshToken::new(7);
    expired.expires_at = Utc::now() - Duration::days(1);
    repository.create(expired.clone()).await.unwrap();

    assert!(!service.validate_refresh_token(&expired.token).await.unwrap());
}

#[tokio::test]
async fn test_validate_refresh_token_does_not_mutate_state() {
    let (service, repository) = create_service(OracleBehavior::Grant(alice()));

    let token = service.generate_refresh_token(7).await.unwrap();
    let before = repository.find_by_token(&token).await.unwrap().unwrap();

    service.validate_refresh_token(&token).await.unwrap();
    service.validate_refresh_token("unknown").await.unwrap();

    let after = repository.find_by_token(&token).await.unwrap().unwrap();
    assert_eq!(before, after);
    assert_eq!(repository.len().await, 1);
}

#[tokio::test]
async fn test_revoke_refresh_token_is_idempotent() {
    let (service, repository) = create_service(OracleBehavior::Grant(alice()));

    let token = service.generate_refresh_token(7).await.unwrap();

    service.revoke_refresh_token(&token).await.unwrap();
    // Second revocation is a no-op, not an error
    service.revoke_refresh_token(&token).await.unwrap();

    let stored = repository.find_by_token(&token).await.unwrap().unwrap();
    assert!(stored.is_revoked);
}

#[tokio::test]
async fn test_revoke_nonexistent_token_is_a_no_op() {
    let (service, repository) = create_service(OracleBehavior::Grant(alice()));
    let token = service.generate_refresh_token(7).await.unwrap();

    service.revoke_refresh_token("nonexistent-token").await.unwrap();

    // Existing rows are untouched
    let stored = repository.find_by_token(&token).await.unwrap().unwrap();
    assert!(!stored.is_revoked);
    assert_eq!(repository.len().await, 1);
}

#[tokio::test]
async fn test_storage_failure_aborts_login() {
    let service = TokenService::new(
        FailingRepository,
        StubCredentialClient {
            behavior: OracleBehavior::Grant(alice()),
        },
        TokenServiceConfig::default(),
    );

    let err = service.login("alice", "correct").await.unwrap_err();
    assert!(matches!(err, DomainError::Storage { .. }));
}

#[tokio::test]
async fn test_find_and_delete_user_tokens() {
    let (service, _) = create_service(OracleBehavior::Grant(alice()));

    service.generate_refresh_token(7).await.unwrap();
    service.generate_refresh_token(7).await.unwrap();

    let tokens = service.find_user_tokens(7).await.unwrap();
    assert_eq!(tokens.len(), 2);

    assert!(service.delete_refresh_token(tokens[0].id).await.unwrap());
    assert!(!service.delete_refresh_token(tokens[0].id).await.unwrap());
    assert_eq!(service.find_user_tokens(7).await.unwrap().len(), 1);
}
