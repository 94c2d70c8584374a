//! Team repository

use chrono::Utc;
use sqlx::SqliteConnection;

use crate::error::Result;
use crate::models::User;

/// Repository for team records
pub struct TeamRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> TeamRepository<'c> {
    /// Create a new team repository
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Check whether a team with this name exists
    pub async fn exists(&mut self, team_name: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM teams WHERE team_name = ?)")
                .bind(team_name)
                .fetch_one(&mut *self.conn)
                .await?;
        Ok(exists)
    }

    /// Insert a new team
    ///
    /// Fails with [`Error::UniqueViolation`](crate::Error::UniqueViolation)
    /// if the name is taken.
    pub async fn create(&mut self, team_name: &str) -> Result<()> {
        sqlx::query("INSERT INTO teams (team_name, created_at) VALUES (?, ?)")
            .bind(team_name)
            .bind(Utc::now())
            .execute(&mut *self.conn)
            .await?;
        Ok(())
    }

    /// List every member of a team, active or not
    pub async fn members(&mut self, team_name: &str) -> Result<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT user_id, username, team_name, is_active
             FROM users WHERE team_name = ? ORDER BY user_id",
        )
        .bind(team_name)
        .fetch_all(&mut *self.conn)
        .await
        .map_err(Into::into)
    }
}
