//! Replacing a single reviewer on an open pull request

use super::{load_view, require, reviewer_set, AssignmentEngine};
use crate::error::ConflictKind;
use crate::model::{Reassignment, ReviewUnit};
use crate::selection::EligiblePool;
use crate::{Error, Result};

impl AssignmentEngine {
    /// Replace `old_reviewer_id` with a randomly chosen teammate
    ///
    /// The replacement comes from the active members of the old reviewer's
    /// team, excluding the author and everyone currently reviewing. Calling
    /// this again with the same old reviewer after it succeeded fails with
    /// [`ConflictKind::NotAssigned`], which callers should read as "already done".
    pub async fn reassign_reviewer(
        &self,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<Reassignment> {
        require("pull_request_id", pull_request_id)?;
        require("old_user_id", old_reviewer_id)?;

        let mut uow = self.db.begin().await?;

        let unit = ReviewUnit::from(uow.pull_requests().get(pull_request_id).await?);
        if unit.status.is_terminal() {
            return Err(Error::conflict(
                ConflictKind::AlreadyMerged,
                format!("cannot reassign on merged pull request {}", pull_request_id),
            ));
        }

        let reviewers = reviewer_set(&mut uow, pull_request_id).await?;
        if !reviewers.is_current(old_reviewer_id) {
            return Err(Error::conflict(
                ConflictKind::NotAssigned,
                format!(
                    "{} is not a reviewer of pull request {}",
                    old_reviewer_id, pull_request_id
                ),
            ));
        }

        let old_reviewer = uow.users().get(old_reviewer_id).await?;
        let members = uow
            .users()
            .active_team_members(&old_reviewer.team_name)
            .await?;
        let pool = EligiblePool::new()
            .exclude(unit.author_id.as_str())
            .exclude_all(reviewers.current())
            .filter(members);

        let Some(new_reviewer_id) = self.pick(&pool, 1).pop() else {
            return Err(Error::conflict(
                ConflictKind::NoCandidate,
                format!(
                    "no active replacement for {} in team {}",
                    old_reviewer_id, old_reviewer.team_name
                ),
            ));
        };

        uow.assignments()
            .mark_replaced(pull_request_id, old_reviewer_id, &new_reviewer_id)
            .await?;
        uow.assignments()
            .assign(pull_request_id, &new_reviewer_id)
            .await?;

        let view = load_view(&mut uow, pull_request_id).await?;
        uow.commit().await?;

        tracing::info!(
            pull_request_id,
            old_reviewer = old_reviewer_id,
            new_reviewer = %new_reviewer_id,
            "Reviewer reassigned"
        );

        Ok(Reassignment {
            view,
            replaced_by: new_reviewer_id,
        })
    }
}
