use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use roster_core::NewMember;

use crate::dto::{
    CreateTeamRequest, CreateTeamResponse, DeactivateUsersRequest, DeactivateUsersResponse,
    TeamQuery, TeamResponse,
};
use crate::error::ApiResult;
use crate::AppState;

/// POST /team/add
pub async fn add_team(
    State(state): State<AppState>,
    payload: Result<Json<CreateTeamRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreateTeamResponse>)> {
    let Json(body) = payload?;
    let members = body
        .members
        .into_iter()
        .map(|m| NewMember {
            user_id: m.user_id,
            username: m.username,
            is_active: m.is_active,
        })
        .collect();

    let team = state.roster.create_team(&body.team_name, members).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateTeamResponse { team: team.into() }),
    ))
}

/// GET /team/get?team_name=
pub async fn get_team(
    State(state): State<AppState>,
    query: Result<Query<TeamQuery>, QueryRejection>,
) -> ApiResult<Json<TeamResponse>> {
    let Query(query) = query?;
    let team = state.roster.get_team(&query.team_name).await?;
    Ok(Json(team.into()))
}

/// POST /team/deactivateUsers
pub async fn deactivate_users(
    State(state): State<AppState>,
    payload: Result<Json<DeactivateUsersRequest>, JsonRejection>,
) -> ApiResult<Json<DeactivateUsersResponse>> {
    let Json(body) = payload?;
    let views = state.engine.deactivate_users(&body.users).await?;
    Ok(Json(DeactivateUsersResponse {
        updated_prs: views.into_iter().map(Into::into).collect(),
    }))
}
