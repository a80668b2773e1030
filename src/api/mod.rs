// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::application::MatchService;
use handlers::{health, matches, results, teams};

/// Shared handler state
pub type AppState = Arc<MatchService>;

/// Builds the HTTP router over a match service
pub fn router(service: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Team routes
        .route("/api/teams", post(teams::create_team).get(teams::list_teams))
        // Match routes
        .route(
            "/api/matches",
            post(matches::create_match).get(matches::list_matches),
        )
        .route(
            "/api/matches/:id",
            get(matches::get_match)
                .put(matches::update_match)
                .delete(matches::delete_match),
        )
        .route("/api/matches/:id/result", post(matches::submit_result))
        // Ranking
        .route("/api/results/ranking", get(results::get_ranking))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
