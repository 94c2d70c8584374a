//! Read-only assignment statistics

use roster_db::{AssignmentRepository, Database, PullRequestRepository, ReviewerCount, UserRepository};
use serde::Serialize;

use crate::model::ReviewStatus;
use crate::Result;

/// How many reviewers the top list holds
pub const TOP_REVIEWERS_LIMIT: i64 = 10;

/// Label used for pull requests whose stored status is missing or unrecognised
pub const UNKNOWN_STATUS: &str = "UNKNOWN";

/// Pull request count for one status label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusTally {
    pub status: String,
    pub count: i64,
}

/// Point-in-time statistics snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Reviewers by assignments ever received, most first
    pub top_reviewers: Vec<ReviewerCount>,
    pub status_counts: Vec<StatusTally>,
    pub active_users: i64,
}

#[derive(Clone)]
pub struct StatsService {
    db: Database,
}

impl StatsService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Collect a snapshot from a single pooled connection
    pub async fn snapshot(&self) -> Result<Stats> {
        let mut conn = self.db.acquire().await?;

        let top_reviewers = AssignmentRepository::new(&mut conn)
            .top_reviewers(TOP_REVIEWERS_LIMIT)
            .await?;
        let raw_counts = PullRequestRepository::new(&mut conn)
            .count_by_status()
            .await?;
        let active_users = UserRepository::new(&mut conn).count_active().await?;

        let mut status_counts: Vec<StatusTally> = Vec::new();
        for raw in raw_counts {
            let label = ReviewStatus::parse(raw.status.as_deref())
                .map(|status| status.as_str())
                .unwrap_or(UNKNOWN_STATUS);
            match status_counts.iter_mut().find(|tally| tally.status == label) {
                Some(tally) => tally.count += raw.count,
                None => status_counts.push(StatusTally {
                    status: label.to_string(),
                    count: raw.count,
                }),
            }
        }

        tracing::debug!(
            reviewers = top_reviewers.len(),
            active_users,
            "Stats snapshot collected"
        );

        Ok(Stats {
            top_reviewers,
            status_counts,
            active_users,
        })
    }
}
