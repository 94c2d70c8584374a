//! Reviewer assignment repository
//!
//! Edges are append-only except for two writes: marking an edge as replaced,
//! and removing a current edge when a deactivated reviewer has no successor.

use chrono::Utc;
use sqlx::SqliteConnection;

use crate::error::{Error, Result};
use crate::models::{ReviewerAssignmentRow, ReviewerCount};

/// Repository for reviewer assignment edges
pub struct AssignmentRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> AssignmentRepository<'c> {
    /// Create a new assignment repository
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Insert a current assignment edge
    ///
    /// The partial unique index rejects a second current edge for the same
    /// reviewer on the same pull request.
    pub async fn assign(&mut self, pull_request_id: &str, reviewer_id: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO pr_reviewers (pull_request_id, reviewer_id, assigned_at)
             VALUES (?, ?, ?)",
        )
        .bind(pull_request_id)
        .bind(reviewer_id)
        .bind(Utc::now())
        .execute(&mut *self.conn)
        .await?;
        Ok(())
    }

    /// All edges of a pull request, current and historical, oldest first
    pub async fn edges(&mut self, pull_request_id: &str) -> Result<Vec<ReviewerAssignmentRow>> {
        sqlx::query_as::<_, ReviewerAssignmentRow>(
            "SELECT id, pull_request_id, reviewer_id, replaced_by, assigned_at
             FROM pr_reviewers
             WHERE pull_request_id = ?
             ORDER BY id",
        )
        .bind(pull_request_id)
        .fetch_all(&mut *self.conn)
        .await
        .map_err(Into::into)
    }

    /// Record that the current edge of `reviewer_id` was replaced by `replaced_by`
    pub async fn mark_replaced(
        &mut self,
        pull_request_id: &str,
        reviewer_id: &str,
        replaced_by: &str,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE pr_reviewers SET replaced_by = ?
             WHERE pull_request_id = ? AND reviewer_id = ? AND replaced_by IS NULL",
        )
        .bind(replaced_by)
        .bind(pull_request_id)
        .bind(reviewer_id)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!(
                "current reviewer {} on pull request {}",
                reviewer_id, pull_request_id
            )));
        }
        Ok(())
    }

    /// Delete the current edge of `reviewer_id` outright
    pub async fn remove_current(&mut self, pull_request_id: &str, reviewer_id: &str) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM pr_reviewers
             WHERE pull_request_id = ? AND reviewer_id = ? AND replaced_by IS NULL",
        )
        .bind(pull_request_id)
        .bind(reviewer_id)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!(
                "current reviewer {} on pull request {}",
                reviewer_id, pull_request_id
            )));
        }
        Ok(())
    }

    /// Reviewers with the most assignment edges, current and historical
    pub async fn top_reviewers(&mut self, limit: i64) -> Result<Vec<ReviewerCount>> {
        sqlx::query_as::<_, ReviewerCount>(
            "SELECT reviewer_id, COUNT(*) AS assignment_count
             FROM pr_reviewers
             GROUP BY reviewer_id
             ORDER BY assignment_count DESC, reviewer_id ASC
             LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&mut *self.conn)
        .await
        .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::test_support::{seed_pull_request, seed_team, setup_test_db};

    #[tokio::test]
    async fn test_assign_and_replace() {
        let (db, _temp) = setup_test_db().await;
        seed_team(&db, "backend", &["a", "b", "c"]).await;
        seed_pull_request(&db, "pr-1", "a").await;

        let mut uow = db.begin().await.unwrap();
        uow.assignments().assign("pr-1", "b").await.unwrap();
        uow.assignments().mark_replaced("pr-1", "b", "c").await.unwrap();
        uow.assignments().assign("pr-1", "c").await.unwrap();

        let edges = uow.assignments().edges("pr-1").await.unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].reviewer_id, "b");
        assert_eq!(edges[0].replaced_by.as_deref(), Some("c"));
        assert_eq!(edges[1].reviewer_id, "c");
        assert!(edges[1].replaced_by.is_none());
        uow.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_current_edge_rejected() {
        let (db, _temp) = setup_test_db().await;
        seed_team(&db, "backend", &["a", "b"]).await;
        seed_pull_request(&db, "pr-1", "a").await;

        let mut uow = db.begin().await.unwrap();
        uow.assignments().assign("pr-1", "b").await.unwrap();
        let err = uow.assignments().assign("pr-1", "b").await.unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_replace_or_remove_requires_current_edge() {
        let (db, _temp) = setup_test_db().await;
        seed_team(&db, "backend", &["a", "b", "c"]).await;
        seed_pull_request(&db, "pr-1", "a").await;

        let mut uow = db.begin().await.unwrap();
        let err = uow
            .assignments()
            .mark_replaced("pr-1", "b", "c")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        uow.assignments().assign("pr-1", "b").await.unwrap();
        uow.assignments().remove_current("pr-1", "b").await.unwrap();
        assert!(uow.assignments().edges("pr-1").await.unwrap().is_empty());

        let err = uow
            .assignments()
            .remove_current("pr-1", "b")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_top_reviewers_counts_history() {
        let (db, _temp) = setup_test_db().await;
        seed_team(&db, "backend", &["a", "b", "c"]).await;
        seed_pull_request(&db, "pr-1", "a").await;
        seed_pull_request(&db, "pr-2", "a").await;

        let mut uow = db.begin().await.unwrap();
        uow.assignments().assign("pr-1", "b").await.unwrap();
        uow.assignments().mark_replaced("pr-1", "b", "c").await.unwrap();
        uow.assignments().assign("pr-1", "c").await.unwrap();
        uow.assignments().assign("pr-2", "b").await.unwrap();

        let top = uow.assignments().top_reviewers(10).await.unwrap();
        assert_eq!(
            top,
            vec![
                ReviewerCount {
                    reviewer_id: "b".to_string(),
                    assignment_count: 2
                },
                ReviewerCount {
                    reviewer_id: "c".to_string(),
                    assignment_count: 1
                },
            ]
        );
    }
}
