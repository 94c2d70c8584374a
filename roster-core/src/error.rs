//! Error types for review-roster

use std::fmt;

use thiserror::Error;

/// Result type alias for review-roster operations
pub type Result<T> = std::result::Result<T, Error>;

/// Kind of entity a uniqueness conflict refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Team,
    User,
    PullRequest,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Team => write!(f, "team"),
            Resource::User => write!(f, "user"),
            Resource::PullRequest => write!(f, "pull request"),
        }
    }
}

/// Business-rule conflicts
///
/// The caller has to change the request; retrying it unchanged fails again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// An entity with the same identifier already exists
    AlreadyExists(Resource),
    /// The pull request is merged and can no longer change reviewers
    AlreadyMerged,
    /// The named user is not a current reviewer of the pull request
    NotAssigned,
    /// No eligible replacement reviewer is available
    NoCandidate,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictKind::AlreadyExists(resource) => write!(f, "{} already exists", resource),
            ConflictKind::AlreadyMerged => write!(f, "already merged"),
            ConflictKind::NotAssigned => write!(f, "reviewer not assigned"),
            ConflictKind::NoCandidate => write!(f, "no candidate"),
        }
    }
}

/// Error type for review-roster operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or missing required input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Referenced entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Business-rule violation
    #[error("Conflict ({kind}): {message}")]
    Conflict { kind: ConflictKind, message: String },

    /// Storage or transaction failure; nothing was committed
    #[error("Database error: {0}")]
    Database(roster_db::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }

    pub(crate) fn conflict(kind: ConflictKind, message: impl Into<String>) -> Self {
        Error::Conflict {
            kind,
            message: message.into(),
        }
    }

    /// Conflict kind, if this is a business-rule conflict
    pub fn conflict_kind(&self) -> Option<ConflictKind> {
        match self {
            Error::Conflict { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Whether an identical retry could succeed
    ///
    /// Only infrastructure failures qualify. Every multi-step write runs in a
    /// single transaction, so a failed attempt leaves no partial state behind.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Database(_))
    }
}

impl From<roster_db::Error> for Error {
    fn from(err: roster_db::Error) -> Self {
        match err {
            roster_db::Error::NotFound(what) => Error::NotFound(what),
            other => Error::Database(other),
        }
    }
}
