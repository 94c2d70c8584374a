//! Request and response bodies

use chrono::{DateTime, Utc};
use roster_core::{ReviewUnit, ReviewUnitView, Stats, Team, User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeamMemberBody {
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTeamRequest {
    pub team_name: String,
    pub members: Vec<TeamMemberBody>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeactivateUsersRequest {
    pub users: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetIsActiveRequest {
    pub user_id: String,
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePullRequestRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MergePullRequestRequest {
    pub pull_request_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReassignRequest {
    pub pull_request_id: String,
    pub old_user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct TeamQuery {
    pub team_name: String,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct TeamMemberResponse {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub team_name: String,
    pub members: Vec<TeamMemberResponse>,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            team_name: team.name,
            members: team
                .members
                .into_iter()
                .map(|user| TeamMemberResponse {
                    user_id: user.user_id,
                    username: user.username,
                    is_active: user.is_active,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateTeamResponse {
    pub team: TeamResponse,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

/// A pull request with its current reviewers
#[derive(Debug, Serialize)]
pub struct PullRequestResponse {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: String,
    pub assigned_reviewers: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "mergedAt", skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<DateTime<Utc>>,
}

impl From<ReviewUnitView> for PullRequestResponse {
    fn from(view: ReviewUnitView) -> Self {
        let unit = view.unit;
        Self {
            pull_request_id: unit.id,
            pull_request_name: unit.name,
            author_id: unit.author_id,
            status: unit.status.to_string(),
            assigned_reviewers: view.reviewers,
            created_at: unit.created_at,
            merged_at: unit.merged_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PullRequestEnvelope {
    pub pr: PullRequestResponse,
}

#[derive(Debug, Serialize)]
pub struct ReassignResponse {
    pub pr: PullRequestResponse,
    pub replaced_by: String,
}

#[derive(Debug, Serialize)]
pub struct DeactivateUsersResponse {
    pub updated_prs: Vec<PullRequestResponse>,
}

/// Pull request listing entry without reviewers
#[derive(Debug, Serialize)]
pub struct PullRequestShort {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: String,
}

impl From<ReviewUnit> for PullRequestShort {
    fn from(unit: ReviewUnit) -> Self {
        Self {
            pull_request_id: unit.id,
            pull_request_name: unit.name,
            author_id: unit.author_id,
            status: unit.status.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserReviewsResponse {
    pub user_id: String,
    pub pull_requests: Vec<PullRequestShort>,
}

#[derive(Debug, Serialize)]
pub struct ReviewerStat {
    pub reviewer_id: String,
    pub assignment_count: i64,
}

#[derive(Debug, Serialize)]
pub struct StatusStat {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub top_reviewers: Vec<ReviewerStat>,
    pub pr_status_distribution: Vec<StatusStat>,
    pub total_active_users: i64,
}

impl From<Stats> for StatsResponse {
    fn from(stats: Stats) -> Self {
        Self {
            top_reviewers: stats
                .top_reviewers
                .into_iter()
                .map(|r| ReviewerStat {
                    reviewer_id: r.reviewer_id,
                    assignment_count: r.assignment_count,
                })
                .collect(),
            pr_status_distribution: stats
                .status_counts
                .into_iter()
                .map(|t| StatusStat {
                    status: t.status,
                    count: t.count,
                })
                .collect(),
            total_active_users: stats.active_users,
        }
    }
}
