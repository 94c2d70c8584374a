//! Domain model: pull request status, assignment edges, and result views

use std::fmt;

use chrono::{DateTime, Utc};
use roster_db::{PullRequestRow, ReviewerAssignmentRow};

pub use roster_db::User;

/// Lifecycle status of a pull request
///
/// `Open` is the initial state and `Merged` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewStatus {
    Open,
    Merged,
}

impl ReviewStatus {
    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Open => "OPEN",
            ReviewStatus::Merged => "MERGED",
        }
    }

    /// Parse a stored status value; `None` for absent or unrecognized values
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw {
            Some("OPEN") => Some(ReviewStatus::Open),
            Some("MERGED") => Some(ReviewStatus::Merged),
            _ => None,
        }
    }

    /// Stored status as seen by pull request responses: unknown reads as OPEN
    pub fn from_stored(raw: Option<&str>) -> Self {
        Self::parse(raw).unwrap_or(ReviewStatus::Open)
    }

    /// Whether reviewers may no longer change
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReviewStatus::Merged)
    }

    /// Check if a transition to the given status is valid
    pub fn can_transition_to(&self, next: ReviewStatus) -> bool {
        matches!((self, next), (ReviewStatus::Open, ReviewStatus::Merged))
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pull request under review
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewUnit {
    pub id: String,
    pub name: String,
    pub author_id: String,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
}

impl From<PullRequestRow> for ReviewUnit {
    fn from(row: PullRequestRow) -> Self {
        Self {
            status: ReviewStatus::from_stored(row.status.as_deref()),
            id: row.pull_request_id,
            name: row.pull_request_name,
            author_id: row.author_id,
            created_at: row.created_at,
            merged_at: row.merged_at,
        }
    }
}

/// State of a single assignment edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeState {
    /// The reviewer currently holds the review
    Active,
    /// Historical edge; the review moved to `by`
    Replaced { by: String },
}

/// One reviewer assignment on a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentEdge {
    pub reviewer_id: String,
    pub state: EdgeState,
}

impl AssignmentEdge {
    pub fn is_active(&self) -> bool {
        self.state == EdgeState::Active
    }
}

impl From<ReviewerAssignmentRow> for AssignmentEdge {
    fn from(row: ReviewerAssignmentRow) -> Self {
        let state = match row.replaced_by {
            Some(by) => EdgeState::Replaced { by },
            None => EdgeState::Active,
        };
        Self {
            reviewer_id: row.reviewer_id,
            state,
        }
    }
}

/// The assignment lineage of one pull request
#[derive(Debug, Clone, Default)]
pub struct ReviewerSet {
    edges: Vec<AssignmentEdge>,
}

impl ReviewerSet {
    /// Build from stored edges, oldest first
    pub fn from_rows(rows: Vec<ReviewerAssignmentRow>) -> Self {
        Self {
            edges: rows.into_iter().map(AssignmentEdge::from).collect(),
        }
    }

    /// Current reviewer IDs in assignment order
    pub fn current(&self) -> Vec<String> {
        self.edges
            .iter()
            .filter(|edge| edge.is_active())
            .map(|edge| edge.reviewer_id.clone())
            .collect()
    }

    /// Whether `user_id` currently holds the review
    pub fn is_current(&self, user_id: &str) -> bool {
        self.edges
            .iter()
            .any(|edge| edge.is_active() && edge.reviewer_id == user_id)
    }

    /// Every edge, current and historical
    pub fn edges(&self) -> &[AssignmentEdge] {
        &self.edges
    }
}

/// A pull request together with its current reviewers
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewUnitView {
    pub unit: ReviewUnit,
    pub reviewers: Vec<String>,
}

/// Outcome of replacing one reviewer
#[derive(Debug, Clone, PartialEq)]
pub struct Reassignment {
    pub view: ReviewUnitView,
    pub replaced_by: String,
}

/// A team and its members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    pub members: Vec<User>,
}

/// Member description supplied when creating a team
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}
