//! Pull request repository

use chrono::Utc;
use sqlx::SqliteConnection;

use crate::error::{Error, Result};
use crate::models::{NewPullRequest, PullRequestRow, StatusCount};

const COLUMNS: &str =
    "pull_request_id, pull_request_name, author_id, status, created_at, merged_at";

/// Repository for pull request records
pub struct PullRequestRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> PullRequestRepository<'c> {
    /// Create a new pull request repository
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Check whether a pull request with this ID exists
    pub async fn exists(&mut self, pull_request_id: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM pull_requests WHERE pull_request_id = ?)",
        )
        .bind(pull_request_id)
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(exists)
    }

    /// Insert a new pull request in OPEN status
    pub async fn create(&mut self, pr: &NewPullRequest) -> Result<PullRequestRow> {
        sqlx::query_as::<_, PullRequestRow>(&format!(
            "INSERT INTO pull_requests (pull_request_id, pull_request_name, author_id, status, created_at)
             VALUES (?, ?, ?, 'OPEN', ?)
             RETURNING {COLUMNS}"
        ))
        .bind(&pr.pull_request_id)
        .bind(&pr.pull_request_name)
        .bind(&pr.author_id)
        .bind(Utc::now())
        .fetch_one(&mut *self.conn)
        .await
        .map_err(Into::into)
    }

    /// Get a pull request by ID
    pub async fn get(&mut self, pull_request_id: &str) -> Result<PullRequestRow> {
        sqlx::query_as::<_, PullRequestRow>(&format!(
            "SELECT {COLUMNS} FROM pull_requests WHERE pull_request_id = ?"
        ))
        .bind(pull_request_id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| Error::NotFound(format!("pull request {}", pull_request_id)))
    }

    /// Mark a pull request as merged
    ///
    /// Already merged pull requests are left untouched, so `merged_at` keeps
    /// its first value. Returns whether a row was written.
    pub async fn mark_merged(&mut self, pull_request_id: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE pull_requests
             SET status = 'MERGED', merged_at = COALESCE(merged_at, ?)
             WHERE pull_request_id = ? AND (status IS NULL OR status <> 'MERGED')",
        )
        .bind(Utc::now())
        .bind(pull_request_id)
        .execute(&mut *self.conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List pull requests on which the user is a current reviewer
    pub async fn list_by_reviewer(&mut self, reviewer_id: &str) -> Result<Vec<PullRequestRow>> {
        sqlx::query_as::<_, PullRequestRow>(
            "SELECT p.pull_request_id, p.pull_request_name, p.author_id, p.status,
                    p.created_at, p.merged_at
             FROM pull_requests p
             INNER JOIN pr_reviewers r ON r.pull_request_id = p.pull_request_id
             WHERE r.reviewer_id = ? AND r.replaced_by IS NULL
             ORDER BY p.created_at, p.pull_request_id",
        )
        .bind(reviewer_id)
        .fetch_all(&mut *self.conn)
        .await
        .map_err(Into::into)
    }

    /// Count pull requests grouped by raw status value
    pub async fn count_by_status(&mut self) -> Result<Vec<StatusCount>> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM pull_requests GROUP BY status ORDER BY status",
        )
        .fetch_all(&mut *self.conn)
        .await
        .map_err(Into::into)
    }
}
