//! User repository

use sqlx::SqliteConnection;

use crate::error::{Error, Result};
use crate::models::{NewUser, User};

/// Repository for team member records
pub struct UserRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> UserRepository<'c> {
    /// Create a new user repository
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Insert a new user
    pub async fn create(&mut self, user: &NewUser) -> Result<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (user_id, username, team_name, is_active)
             VALUES (?, ?, ?, ?)
             RETURNING user_id, username, team_name, is_active",
        )
        .bind(&user.user_id)
        .bind(&user.username)
        .bind(&user.team_name)
        .bind(user.is_active)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(Into::into)
    }

    /// Get a user by ID
    pub async fn get(&mut self, user_id: &str) -> Result<User> {
        sqlx::query_as::<_, User>(
            "SELECT user_id, username, team_name, is_active FROM users WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| Error::NotFound(format!("user {}", user_id)))
    }

    /// Set the active flag of a user and return the updated record
    pub async fn set_active(&mut self, user_id: &str, is_active: bool) -> Result<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET is_active = ? WHERE user_id = ?
             RETURNING user_id, username, team_name, is_active",
        )
        .bind(is_active)
        .bind(user_id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| Error::NotFound(format!("user {}", user_id)))
    }

    /// List active members of a team
    pub async fn active_team_members(&mut self, team_name: &str) -> Result<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT user_id, username, team_name, is_active
             FROM users
             WHERE team_name = ? AND is_active = 1
             ORDER BY user_id",
        )
        .bind(team_name)
        .fetch_all(&mut *self.conn)
        .await
        .map_err(Into::into)
    }

    /// Count active users across all teams
    pub async fn count_active(&mut self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE is_active = 1")
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }
}
