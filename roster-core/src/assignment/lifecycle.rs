//! Pull request status transitions and reviewer-facing queries

use roster_db::PullRequestRepository;

use super::{load_view, require, AssignmentEngine};
use crate::model::{ReviewStatus, ReviewUnit, ReviewUnitView};
use crate::Result;

impl AssignmentEngine {
    /// Merge a pull request
    ///
    /// Merging is idempotent: an already merged pull request is returned as
    /// stored, without a second write.
    pub async fn merge_pull_request(&self, pull_request_id: &str) -> Result<ReviewUnitView> {
        require("pull_request_id", pull_request_id)?;

        let mut uow = self.db.begin().await?;
        let current = ReviewUnit::from(uow.pull_requests().get(pull_request_id).await?);

        if current.status.can_transition_to(ReviewStatus::Merged) {
            uow.pull_requests().mark_merged(pull_request_id).await?;
            tracing::info!(pull_request_id, "Pull request merged");
        } else {
            tracing::debug!(pull_request_id, "Pull request already merged");
        }

        let view = load_view(&mut uow, pull_request_id).await?;
        uow.commit().await?;
        Ok(view)
    }

    /// Pull requests on which the user is a current reviewer
    ///
    /// An unknown user simply has no reviews.
    pub async fn reviews_for_user(&self, user_id: &str) -> Result<Vec<ReviewUnit>> {
        require("user_id", user_id)?;

        let mut conn = self.db.acquire().await?;
        let rows = PullRequestRepository::new(&mut conn)
            .list_by_reviewer(user_id)
            .await?;
        Ok(rows.into_iter().map(ReviewUnit::from).collect())
    }
}
