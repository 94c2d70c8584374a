use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::dto::{
    CreatePullRequestRequest, MergePullRequestRequest, PullRequestEnvelope, ReassignRequest,
    ReassignResponse,
};
use crate::error::ApiResult;
use crate::AppState;

/// POST /pullRequest/create
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreatePullRequestRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PullRequestEnvelope>)> {
    let Json(body) = payload?;
    let view = state
        .engine
        .create_pull_request(&body.pull_request_id, &body.pull_request_name, &body.author_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(PullRequestEnvelope { pr: view.into() }),
    ))
}

/// POST /pullRequest/merge
pub async fn merge(
    State(state): State<AppState>,
    payload: Result<Json<MergePullRequestRequest>, JsonRejection>,
) -> ApiResult<Json<PullRequestEnvelope>> {
    let Json(body) = payload?;
    let view = state.engine.merge_pull_request(&body.pull_request_id).await?;
    Ok(Json(PullRequestEnvelope { pr: view.into() }))
}

/// POST /pullRequest/reassign
pub async fn reassign(
    State(state): State<AppState>,
    payload: Result<Json<ReassignRequest>, JsonRejection>,
) -> ApiResult<Json<ReassignResponse>> {
    let Json(body) = payload?;
    let result = state
        .engine
        .reassign_reviewer(&body.pull_request_id, &body.old_user_id)
        .await?;
    Ok(Json(ReassignResponse {
        pr: result.view.into(),
        replaced_by: result.replaced_by,
    }))
}
