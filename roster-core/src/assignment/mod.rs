//! Reviewer assignment engine
//!
//! Every operation here runs inside one [`UnitOfWork`](roster_db::UnitOfWork):
//! reads that decide who reviews and the writes that record the decision
//! commit together, or the whole unit is rolled back.

mod create;
mod deactivate;
mod lifecycle;
mod reassign;

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::SeedableRng;
use roster_db::{Database, UnitOfWork};

use crate::model::{ReviewUnit, ReviewUnitView, ReviewerSet};
use crate::selection::select_candidates;
use crate::{Error, Result};

/// Number of reviewers requested for a new pull request
pub const REVIEWERS_PER_PULL_REQUEST: usize = 2;

/// Orchestrates reviewer assignment and reassignment
pub struct AssignmentEngine {
    db: Database,
    rng: Mutex<StdRng>,
}

impl AssignmentEngine {
    /// Create an engine seeded from the operating system
    pub fn new(db: Database) -> Self {
        Self::with_rng(db, StdRng::from_entropy())
    }

    /// Create an engine with an explicit random source
    pub fn with_rng(db: Database, rng: StdRng) -> Self {
        Self {
            db,
            rng: Mutex::new(rng),
        }
    }

    /// Draw up to `count` reviewers from an already filtered pool
    fn pick(&self, pool: &[String], count: usize) -> Vec<String> {
        // Selection cannot leave the generator half-updated, so a poisoned
        // lock is still usable
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        select_candidates(pool, count, &mut *rng)
    }
}

/// Reject empty identifiers before any storage access
fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_input(format!("{} is required", field)));
    }
    Ok(())
}

/// Load the assignment lineage of a pull request
async fn reviewer_set(uow: &mut UnitOfWork, pull_request_id: &str) -> Result<ReviewerSet> {
    let rows = uow.assignments().edges(pull_request_id).await?;
    Ok(ReviewerSet::from_rows(rows))
}

/// Load a pull request with its current reviewers
async fn load_view(uow: &mut UnitOfWork, pull_request_id: &str) -> Result<ReviewUnitView> {
    let unit = ReviewUnit::from(uow.pull_requests().get(pull_request_id).await?);
    let reviewers = reviewer_set(uow, pull_request_id).await?.current();
    Ok(ReviewUnitView { unit, reviewers })
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::model::NewMember;
    use crate::roster::RosterService;
    use roster_db::DatabaseConfig;
    use std::sync::Arc;
    use tempfile::TempDir;

    pub struct Fixture {
        pub db: Database,
        pub engine: Arc<AssignmentEngine>,
        pub roster: RosterService,
        _temp: TempDir,
    }

    pub async fn fixture(seed: u64) -> Fixture {
        let temp = TempDir::new().unwrap();
        let db = Database::connect(DatabaseConfig::new(temp.path().join("test.db")))
            .await
            .unwrap();
        db.migrate().await.unwrap();
        Fixture {
            engine: Arc::new(AssignmentEngine::with_rng(
                db.clone(),
                StdRng::seed_from_u64(seed),
            )),
            roster: RosterService::new(db.clone()),
            db,
            _temp: temp,
        }
    }

    impl Fixture {
        /// Create a team; members prefixed with `!` start inactive
        pub async fn team(&self, name: &str, members: &[&str]) {
            let members = members
                .iter()
                .map(|m| {
                    let (id, is_active) = match m.strip_prefix('!') {
                        Some(id) => (id, false),
                        None => (*m, true),
                    };
                    NewMember {
                        user_id: id.to_string(),
                        username: id.to_uppercase(),
                        is_active,
                    }
                })
                .collect();
            self.roster.create_team(name, members).await.unwrap();
        }

        /// Overwrite the current reviewers of a pull request
        pub async fn force_reviewers(&self, pull_request_id: &str, reviewers: &[&str]) {
            let mut uow = self.db.begin().await.unwrap();
            for current in reviewer_set(&mut uow, pull_request_id)
                .await
                .unwrap()
                .current()
            {
                uow.assignments()
                    .remove_current(pull_request_id, &current)
                    .await
                    .unwrap();
            }
            for reviewer in reviewers {
                uow.assignments()
                    .assign(pull_request_id, reviewer)
                    .await
                    .unwrap();
            }
            uow.commit().await.unwrap();
        }

        pub async fn view(&self, pull_request_id: &str) -> ReviewUnitView {
            let mut uow = self.db.begin().await.unwrap();
            load_view(&mut uow, pull_request_id).await.unwrap()
        }
    }

    pub fn sorted(mut ids: Vec<String>) -> Vec<String> {
        ids.sort();
        ids
    }
}
