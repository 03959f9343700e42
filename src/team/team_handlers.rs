use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use super::{
    team_dto::{CreateTeamRequest, JoinTeamRequest, TeamResponse},
    team_models::{Team, TeamMemberInfo},
};
use crate::{
    error::{AppError, Result},
    middleware::auth::Session,
    state::AppState,
};

/// List the caller's teams with member counts
#[utoipa::path(
    get,
    path = "/api/teams",
    responses(
        (status = 200, description = "Teams the caller belongs to", body = [TeamResponse]),
        (status = 401, description = "Unauthorized")
    ),
    tag = "teams",
    security(("bearer_auth" = []))
)]
pub async fn get_teams(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<TeamResponse>>> {
    let teams = state.team_service.list_teams(session.user_id).await?;
    Ok(Json(teams))
}

/// Create a team; the caller becomes its owner
#[utoipa::path(
    post,
    path = "/api/teams",
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created", body = Team),
        (status = 400, description = "Validation error")
    ),
    tag = "teams",
    security(("bearer_auth" = []))
)]
pub async fn create_team(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(payload): Json<CreateTeamRequest>,
) -> Result<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let team = state
        .team_service
        .create_team(
            session.user_id,
            payload.name.trim(),
            payload.description.as_deref().unwrap_or("").trim(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(team)))
}

/// Join a team by invite code
#[utoipa::path(
    post,
    path = "/api/teams/join",
    request_body = JoinTeamRequest,
    responses(
        (status = 200, description = "Joined the team", body = Team),
        (status = 404, description = "Invalid invite code"),
        (status = 409, description = "Already a member")
    ),
    tag = "teams",
    security(("bearer_auth" = []))
)]
pub async fn join_team(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(payload): Json<JoinTeamRequest>,
) -> Result<Json<Team>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (team, _member) = state
        .team_service
        .join_team(session.user_id, &payload.invite_code)
        .await?;

    Ok(Json(team))
}

/// Roster of a team the caller belongs to
#[utoipa::path(
    get,
    path = "/api/teams/{id}/members",
    params(("id" = Uuid, Path, description = "Team id")),
    responses(
        (status = 200, description = "Team roster", body = [TeamMemberInfo]),
        (status = 404, description = "Not found or not a member")
    ),
    tag = "teams",
    security(("bearer_auth" = []))
)]
pub async fn get_team_members(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<Vec<TeamMemberInfo>>> {
    let roster = state.team_service.roster(session.user_id, team_id).await?;
    Ok(Json(roster))
}
