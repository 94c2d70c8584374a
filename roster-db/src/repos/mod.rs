//! Repository modules for database operations
//!
//! Repositories borrow a single SQLite connection, which is either the
//! connection inside a [`UnitOfWork`](crate::UnitOfWork) transaction or a
//! pooled connection for read-only queries.

pub mod assignments;
pub mod pull_requests;
pub mod teams;
pub mod users;

pub use assignments::AssignmentRepository;
pub use pull_requests::PullRequestRepository;
pub use teams::TeamRepository;
pub use users::UserRepository;
