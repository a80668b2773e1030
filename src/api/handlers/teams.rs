use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::AppState;
use crate::domain::team::Team;

/// Request body for registering a team
#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub company: String,
    pub player_ids: [Uuid; 2],
}

/// Team as returned by the API
#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: Uuid,
    pub company: String,
    pub player_ids: [Uuid; 2],
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id(),
            company: team.company().to_string(),
            player_ids: team.players(),
        }
    }
}

/// Register a team
///
/// POST /api/teams
pub async fn create_team(
    State(service): State<AppState>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    let team = service.register_team(&req.company, req.player_ids).await?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(&team))))
}

/// List all teams
///
/// GET /api/teams
pub async fn list_teams(State(service): State<AppState>) -> Result<Json<Vec<TeamResponse>>, ApiError> {
    let teams = service.list_teams().await?;

    Ok(Json(teams.iter().map(TeamResponse::from).collect()))
}
