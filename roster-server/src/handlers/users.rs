use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;

use crate::dto::{SetIsActiveRequest, UserQuery, UserResponse, UserReviewsResponse};
use crate::error::ApiResult;
use crate::AppState;

/// POST /users/setIsActive
pub async fn set_is_active(
    State(state): State<AppState>,
    payload: Result<Json<SetIsActiveRequest>, JsonRejection>,
) -> ApiResult<Json<UserResponse>> {
    let Json(body) = payload?;
    let user = state
        .roster
        .set_user_active(&body.user_id, body.is_active)
        .await?;
    Ok(Json(UserResponse { user }))
}

/// GET /pullRequest/userReviews?user_id= (also /users/getReview)
pub async fn get_review(
    State(state): State<AppState>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> ApiResult<Json<UserReviewsResponse>> {
    let Query(query) = query?;
    let units = state.engine.reviews_for_user(&query.user_id).await?;
    Ok(Json(UserReviewsResponse {
        user_id: query.user_id,
        pull_requests: units.into_iter().map(Into::into).collect(),
    }))
}
