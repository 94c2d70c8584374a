//! Review Roster Core - reviewer assignment for team pull requests
//!
//! This crate decides who reviews what: it picks reviewers when a pull
//! request is opened, replaces a single reviewer on request, and hands
//! reviews off when users are deactivated in bulk. Each of those runs as
//! one database transaction so a failure never leaves partial state.

pub mod assignment;
pub mod config;
pub mod error;
pub mod model;
pub mod roster;
pub mod selection;
pub mod stats;

pub use assignment::{AssignmentEngine, REVIEWERS_PER_PULL_REQUEST};
pub use config::{CliOverrides, Config, ServerConfig};
pub use error::{ConflictKind, Error, Resource, Result};
pub use model::{
    AssignmentEdge, EdgeState, NewMember, Reassignment, ReviewStatus, ReviewUnit,
    ReviewUnitView, ReviewerSet, Team, User,
};
pub use roster::RosterService;
pub use stats::{Stats, StatsService, StatusTally};
