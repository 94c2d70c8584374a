//! Transaction-scoped access to the repositories
//!
//! A [`UnitOfWork`] owns one database transaction. Every repository handed
//! out by it reads and writes inside that transaction, so a sequence of calls
//! either commits together or not at all.

use sqlx::{Sqlite, Transaction};

use crate::error::Result;
use crate::repos::{
    AssignmentRepository, PullRequestRepository, TeamRepository, UserRepository,
};

/// One atomic group of reads and writes
///
/// Dropping a unit of work without calling [`UnitOfWork::commit`] rolls the
/// transaction back. That covers early returns on business-rule failures,
/// database errors, and futures dropped by cancellation or timeouts.
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl UnitOfWork {
    pub(crate) fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Self { tx }
    }

    /// Team repository bound to this transaction
    pub fn teams(&mut self) -> TeamRepository<'_> {
        TeamRepository::new(&mut *self.tx)
    }

    /// User repository bound to this transaction
    pub fn users(&mut self) -> UserRepository<'_> {
        UserRepository::new(&mut *self.tx)
    }

    /// Pull request repository bound to this transaction
    pub fn pull_requests(&mut self) -> PullRequestRepository<'_> {
        PullRequestRepository::new(&mut *self.tx)
    }

    /// Reviewer assignment repository bound to this transaction
    pub fn assignments(&mut self) -> AssignmentRepository<'_> {
        AssignmentRepository::new(&mut *self.tx)
    }

    /// Make every write in this unit durable
    pub async fn commit(self) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }

    /// Discard every write in this unit
    pub async fn rollback(self) -> Result<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
