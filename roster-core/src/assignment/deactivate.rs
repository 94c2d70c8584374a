//! Bulk deactivation with reviewer hand-off

use std::collections::HashSet;

use super::{load_view, require, reviewer_set, AssignmentEngine};
use crate::model::{ReviewUnit, ReviewUnitView};
use crate::selection::EligiblePool;
use crate::Result;

impl AssignmentEngine {
    /// Deactivate a batch of users and move their open reviews to teammates
    ///
    /// Each review held by a deactivated user goes to a random active member
    /// of the author's team who is not the author, not already reviewing and
    /// not part of this batch. When nobody qualifies the assignment is
    /// dropped. Duplicate IDs are processed once. An unknown user aborts the
    /// whole batch with nothing changed.
    ///
    /// Returns every touched pull request once, in the order it was first
    /// touched, with its reviewers as of the end of the batch.
    pub async fn deactivate_users(&self, user_ids: &[String]) -> Result<Vec<ReviewUnitView>> {
        let mut seen = HashSet::new();
        let batch: Vec<&str> = user_ids
            .iter()
            .map(String::as_str)
            .filter(|id| seen.insert(*id))
            .collect();
        for user_id in &batch {
            require("user_id", user_id)?;
        }
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let mut uow = self.db.begin().await?;
        let mut touched: Vec<String> = Vec::new();
        let mut replaced = 0usize;
        let mut dropped = 0usize;

        for user_id in &batch {
            uow.users().set_active(user_id, false).await?;

            let units = uow.pull_requests().list_by_reviewer(user_id).await?;
            for unit in units.into_iter().map(ReviewUnit::from) {
                if !touched.contains(&unit.id) {
                    touched.push(unit.id.clone());
                }

                let author = uow.users().get(&unit.author_id).await?;
                let members = uow.users().active_team_members(&author.team_name).await?;
                let reviewers = reviewer_set(&mut uow, &unit.id).await?;
                let pool = EligiblePool::new()
                    .exclude(unit.author_id.as_str())
                    .exclude_all(reviewers.current())
                    .exclude_all(batch.iter().copied())
                    .filter(members);

                match self.pick(&pool, 1).pop() {
                    Some(replacement) => {
                        uow.assignments()
                            .mark_replaced(&unit.id, user_id, &replacement)
                            .await?;
                        uow.assignments().assign(&unit.id, &replacement).await?;
                        tracing::debug!(
                            pull_request_id = %unit.id,
                            old_reviewer = user_id,
                            new_reviewer = %replacement,
                            "Review handed off"
                        );
                        replaced += 1;
                    }
                    None => {
                        uow.assignments().remove_current(&unit.id, user_id).await?;
                        tracing::debug!(
                            pull_request_id = %unit.id,
                            old_reviewer = user_id,
                            "No replacement available, assignment dropped"
                        );
                        dropped += 1;
                    }
                }
            }
        }

        let mut views = Vec::with_capacity(touched.len());
        for pull_request_id in &touched {
            views.push(load_view(&mut uow, pull_request_id).await?);
        }
        uow.commit().await?;

        tracing::info!(
            users = batch.len(),
            pull_requests = views.len(),
            replaced,
            dropped,
            "Users deactivated"
        );

        Ok(views)
    }
}
