//! Route handlers, grouped by resource

pub mod pull_requests;
pub mod stats;
pub mod teams;
pub mod users;
