//! Tests for the mock refresh token repository

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;
use crate::repositories::refresh_token::{MockRefreshTokenRepository, RefreshTokenRepository};

#[tokio::test]
async fn test_create_and_find_round_trip() {
    let repo = MockRefreshTokenRepository::new();
    let token = RefreshToken::new(7);

    let stored = repo.create(token.clone()).await.unwrap();
    assert_eq!(stored, token);

    let found = repo.find_by_token(&token.token).await.unwrap().unwrap();
    assert_eq!(found.user_id, 7);
    assert!(!found.is_revoked);
}

#[tokio::test]
async fn test_create_rejects_duplicate_token_value() {
    let repo = MockRefreshTokenRepository::new();
    let token = RefreshToken::new(7);

    repo.create(token.clone()).await.unwrap();
    let result = repo.create(token).await;

    assert!(matches!(result, Err(DomainError::Storage { .. })));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_revoke_transitions_once() {
    let repo = MockRefreshTokenRepository::new();
    let token = RefreshToken::new(7);
    repo.create(token.clone()).await.unwrap();

    assert!(repo.revoke(&token.token).await.unwrap());
    // Second revoke finds the row already revoked
    assert!(!repo.revoke(&token.token).await.unwrap());

    let found = repo.find_by_token(&token.token).await.unwrap().unwrap();
    assert!(found.is_revoked);
}

#[tokio::test]
async fn test_revoke_missing_token_reports_false() {
    let repo = MockRefreshTokenRepository::new();
    assert!(!repo.revoke("nonexistent-token").await.unwrap());
}

#[tokio::test]
async fn test_revoked_rows_remain_findable() {
    // Soft delete: a revoked token is still distinguishable from one that
    // never existed.
    let repo = MockRefreshTokenRepository::new();
    let token = RefreshToken::new(7);
    repo.create(token.clone()).await.unwrap();
    repo.revoke(&token.token).await.unwrap();

    assert!(repo.find_by_token(&token.token).await.unwrap().is_some());
    assert!(repo.find_by_token("never-existed").await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_removes_row() {
    let repo = MockRefreshTokenRepository::new();
    let token = RefreshToken::new(7);
    repo.create(token.clone()).await.unwrap();

    assert!(repo.delete(token.id).await.unwrap());
    assert!(!repo.delete(token.id).await.unwrap());
    assert!(repo.find_by_token(&token.token).await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_by_user_id_filters_owner() {
    let repo = MockRefreshTokenRepository::new();
    repo.create(RefreshToken::new(1)).await.unwrap();
    repo.create(RefreshToken::new(1)).await.unwrap();
    repo.create(RefreshToken::new(2)).await.unwrap();

    let tokens = repo.find_by_user_id(1).await.unwrap();
    assert_eq!(tokens.len(), 2);
    assert!(tokens.iter().all(|t| t.user_id == 1));
}
