use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::AppState;
use crate::application::{MatchFilter, NewMatch};
use crate::domain::matches::{Match, MatchStatus, MatchUpdate, SlotEdit, StatusChange};
use crate::domain::score::{Score, Side};

/// Request body for editing a match
///
/// `score` is only accepted together with `status: "finished"`; `side` says
/// whose point of view it is written from and defaults to home.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMatchRequest {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub court_number: Option<u8>,
    pub status: Option<MatchStatus>,
    pub side: Option<Side>,
    pub score: Option<String>,
}

impl UpdateMatchRequest {
    fn into_update(self) -> Result<MatchUpdate, ApiError> {
        let side = self.side.unwrap_or(Side::Home);
        let status = match (self.status, self.score) {
            (Some(MatchStatus::Finished), score) => Some(StatusChange::Finish {
                side,
                raw_score: score.unwrap_or_default(),
            }),
            (_, Some(_)) => {
                return Err(ApiError::bad_request(
                    "A score can only be submitted with status finished",
                ))
            }
            (Some(MatchStatus::Scheduled), None) => Some(StatusChange::Schedule),
            (Some(MatchStatus::Cancelled), None) => Some(StatusChange::Cancel),
            (None, None) => None,
        };

        Ok(MatchUpdate {
            slot: SlotEdit {
                date: self.date,
                time: self.time,
                court: self.court_number,
            },
            status,
        })
    }
}

/// Request body for submitting a result
#[derive(Debug, Deserialize)]
pub struct SubmitResultRequest {
    pub side: Side,
    pub raw_score_text: String,
}

/// Match as returned by the API
#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub court_number: u8,
    pub status: MatchStatus,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub score_home: Option<Score>,
    pub score_away: Option<Score>,
    pub winner_team_id: Option<Uuid>,
}

impl From<&Match> for MatchResponse {
    fn from(game: &Match) -> Self {
        let slot = game.slot();
        Self {
            id: game.id(),
            date: slot.date,
            time: slot.time,
            court_number: slot.court,
            status: game.status(),
            home_team_id: game.home_team(),
            away_team_id: game.away_team(),
            score_home: game.score_for(Side::Home),
            score_away: game.score_for(Side::Away),
            winner_team_id: game.winner_team(),
        }
    }
}

/// Book a new match
///
/// POST /api/matches
pub async fn create_match(
    State(service): State<AppState>,
    Json(req): Json<NewMatch>,
) -> Result<(StatusCode, Json<MatchResponse>), ApiError> {
    let game = service.create_match(req).await?;

    Ok((StatusCode::CREATED, Json(MatchResponse::from(&game))))
}

/// List matches, optionally filtered by status, team and date range
///
/// GET /api/matches
pub async fn list_matches(
    State(service): State<AppState>,
    Query(filter): Query<MatchFilter>,
) -> Result<Json<Vec<MatchResponse>>, ApiError> {
    let matches = service.list_matches(&filter).await?;

    Ok(Json(matches.iter().map(MatchResponse::from).collect()))
}

/// Get a match by ID
///
/// GET /api/matches/:id
pub async fn get_match(
    State(service): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchResponse>, ApiError> {
    let game = service.get_match(id).await?;

    Ok(Json(MatchResponse::from(&game)))
}

/// Edit a match: logistics, status, or both
///
/// PUT /api/matches/:id
pub async fn update_match(
    State(service): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMatchRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    let update = req.into_update()?;
    let game = service.update_match(id, update).await?;

    Ok(Json(MatchResponse::from(&game)))
}

/// Submit the score of one side and finish the match
///
/// POST /api/matches/:id/result
pub async fn submit_result(
    State(service): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SubmitResultRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    let game = service
        .finish_match(id, req.side, &req.raw_score_text)
        .await?;

    Ok(Json(MatchResponse::from(&game)))
}

/// Delete a scheduled match
///
/// DELETE /api/matches/:id
pub async fn delete_match(
    State(service): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    service.delete_match(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
