//! MySQL implementation of the UserRepository trait.
//!
//! Reads the credential authority's user store:
//!
//! ```sql
//! CREATE TABLE users (
//!     user_id       BIGINT       NOT NULL PRIMARY KEY AUTO_INCREMENT,
//!     username      VARCHAR(100) NOT NULL UNIQUE,
//!     email         VARCHAR(255) NOT NULL UNIQUE,
//!     password_hash VARCHAR(255) NOT NULL
//! );
//! -- roles(role_id, role_name), user_roles(user_id, role_id)
//! -- groups(group_id, group_name), user_groups(user_id, group_id)
//! ```

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use gk_core::domain::entities::user::UserAccount;
use gk_core::errors::DomainError;
use gk_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, DomainError> {
        let query = r#"
            SELECT user_id, username, email, password_hash
            FROM users
            WHERE username = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Storage {
                message: format!("Failed to find user: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(UserAccount {
                id: row.try_get("user_id").map_err(|e| DomainError::Storage {
                    message: format!("Failed to get user_id: {}", e),
                })?,
                username: row.try_get("username").map_err(|e| DomainError::Storage {
                    message: format!("Failed to get username: {}", e),
                })?,
                email: row.try_get("email").map_err(|e| DomainError::Storage {
                    message: format!("Failed to get email: {}", e),
                })?,
                password_hash: row.try_get("password_hash").map_err(|e| {
                    DomainError::Storage {
                        message: format!("Failed to get password_hash: {}", e),
                    }
                })?,
            })),
            None => Ok(None),
        }
    }

    async fn find_role_names(&self, user_id: i64) -> Result<Vec<String>, DomainError> {
        let query = r#"
            SELECT r.role_name
            FROM roles r
            INNER JOIN user_roles ur ON ur.role_id = r.role_id
            WHERE ur.user_id = ?
            ORDER BY r.role_name
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Storage {
                message: format!("Failed to load roles: {}", e),
            })?;

        rows.iter()
            .map(|row| {
                row.try_get("role_name").map_err(|e| DomainError::Storage {
                    message: format!("Failed to get role_name: {}", e),
                })
            })
            .collect()
    }

    async fn find_group_names(&self, user_id: i64) -> Result<Vec<String>, DomainError> {
        // `groups` is a reserved word in MySQL 8, hence the backticks
        let query = r#"
            SELECT g.group_name
            FROM `groups` g
            INNER JOIN user_groups ug ON ug.group_id = g.group_id
            WHERE ug.user_id = ?
            ORDER BY g.group_name
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Storage {
                message: format!("Failed to load groups: {}", e),
            })?;

        rows.iter()
            .map(|row| {
                row.try_get("group_name").map_err(|e| DomainError::Storage {
                    message: format!("Failed to get group_name: {}", e),
                })
            })
            .collect()
    }
}
