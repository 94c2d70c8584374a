//! Pull request creation with initial reviewer assignment

use roster_db::NewPullRequest;

use super::{require, AssignmentEngine, REVIEWERS_PER_PULL_REQUEST};
use crate::error::{ConflictKind, Resource};
use crate::model::{ReviewUnit, ReviewUnitView};
use crate::selection::EligiblePool;
use crate::{Error, Result};

impl AssignmentEngine {
    /// Create a pull request and assign up to two reviewers
    ///
    /// Reviewers are drawn from the active members of the author's team,
    /// never including the author. An empty pool is not an error: the pull
    /// request is created without reviewers.
    pub async fn create_pull_request(
        &self,
        pull_request_id: &str,
        name: &str,
        author_id: &str,
    ) -> Result<ReviewUnitView> {
        require("pull_request_id", pull_request_id)?;
        require("pull_request_name", name)?;
        require("author_id", author_id)?;

        let mut uow = self.db.begin().await?;

        if uow.pull_requests().exists(pull_request_id).await? {
            return Err(already_exists(pull_request_id));
        }

        let author = uow.users().get(author_id).await?;
        let members = uow.users().active_team_members(&author.team_name).await?;
        let pool = EligiblePool::new().exclude(author.user_id.as_str()).filter(members);

        let row = uow
            .pull_requests()
            .create(&NewPullRequest {
                pull_request_id: pull_request_id.to_string(),
                pull_request_name: name.to_string(),
                author_id: author.user_id.clone(),
            })
            .await
            .map_err(|e| {
                // A concurrent creator won the race on the primary key
                if e.is_unique_violation() {
                    already_exists(pull_request_id)
                } else {
                    e.into()
                }
            })?;

        let reviewers = self.pick(&pool, REVIEWERS_PER_PULL_REQUEST);
        for reviewer_id in &reviewers {
            uow.assignments()
                .assign(pull_request_id, reviewer_id)
                .await?;
        }

        uow.commit().await?;

        tracing::info!(
            pull_request_id,
            author_id,
            team = %author.team_name,
            reviewers = ?reviewers,
            pool_size = pool.len(),
            "Pull request created"
        );

        Ok(ReviewUnitView {
            unit: ReviewUnit::from(row),
            reviewers,
        })
    }
}

fn already_exists(pull_request_id: &str) -> Error {
    Error::conflict(
        ConflictKind::AlreadyExists(Resource::PullRequest),
        format!("pull request {} already exists", pull_request_id),
    )
}
