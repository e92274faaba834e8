//! MySQL implementation of the RefreshTokenRepository trait.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE refresh_tokens (
//!     id         CHAR(36)    NOT NULL PRIMARY KEY,
//!     token      VARCHAR(64) NOT NULL UNIQUE,
//!     user_id    BIGINT      NOT NULL,
//!     created_at DATETIME(6) NOT NULL,
//!     expires_at DATETIME(6) NOT NULL,
//!     is_revoked BOOLEAN     NOT NULL DEFAULT FALSE
//! );
//! ```
//!
//! The unique index on `token` is what turns a value collision into a
//! storage integrity error rather than silent reuse.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use gk_core::domain::entities::token::RefreshToken;
use gk_core::errors::DomainError;
use gk_core::repositories::RefreshTokenRepository;

/// MySQL implementation of RefreshTokenRepository
pub struct MySqlRefreshTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRefreshTokenRepository {
    /// Create a new MySQL refresh token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a RefreshToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Storage {
            message: format!("Failed to get id: {}", e),
        })?;

        Ok(RefreshToken {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Storage {
                message: format!("Invalid token UUID: {}", e),
            })?,
            token: row.try_get("token").map_err(|e| DomainError::Storage {
                message: format!("Failed to get token: {}", e),
            })?,
            user_id: row.try_get("user_id").map_err(|e| DomainError::Storage {
                message: format!("Failed to get user_id: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Storage {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Storage {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
            is_revoked: row.try_get("is_revoked").map_err(|e| DomainError::Storage {
                message: format!("Failed to get is_revoked: {}", e),
            })?,
        })
    }
}

#[async_trait]
impl RefreshTokenRepository for MySqlRefreshTokenRepository {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (
                id, token, user_id, created_at, expires_at, is_revoked
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.id.to_string())
            .bind(&token.token)
            .bind(token.user_id)
            .bind(token.created_at)
            .bind(token.expires_at)
            .bind(token.is_revoked)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(user_id = token.user_id, error = %e, "Failed to save refresh token");
                DomainError::Storage {
                    message: format!("Failed to save refresh token: {}", e),
                }
            })?;

        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, DomainError> {
        let query = r#"
            SELECT id, token, user_id, created_at, expires_at, is_revoked
            FROM refresh_tokens
            WHERE token = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Storage {
                message: format!("Failed to find refresh token: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn revoke(&self, token: &str) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE
            WHERE token = ? AND is_revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to revoke refresh token");
                DomainError::Storage {
                    message: format!("Failed to revoke refresh token: {}", e),
                }
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<RefreshToken>, DomainError> {
        let query = r#"
            SELECT id, token, user_id, created_at, expires_at, is_revoked
            FROM refresh_tokens
            WHERE user_id = ?
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Storage {
                message: format!("Failed to find user tokens: {}", e),
            })?;

        let mut tokens = Vec::new();
        for row in rows {
            tokens.push(Self::row_to_token(&row)?);
        }

        Ok(tokens)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let query = "DELETE FROM refresh_tokens WHERE id = ?";

        let result = sqlx::query(query)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Storage {
                message: format!("Failed to delete refresh token: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
