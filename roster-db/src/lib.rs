//! Database layer for review-roster
//!
//! Provides SQLite persistence for teams, users, pull requests, and the
//! reviewer assignment edges that link them.

pub mod db;
pub mod error;
pub mod models;
pub mod repos;
pub mod unit_of_work;

pub use db::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use models::{
    NewPullRequest, NewUser, PullRequestRow, ReviewerAssignmentRow, ReviewerCount, StatusCount,
    User,
};
pub use repos::{AssignmentRepository, PullRequestRepository, TeamRepository, UserRepository};
pub use unit_of_work::UnitOfWork;
