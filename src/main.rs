use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use padel_corpo_api::api;
use padel_corpo_api::application::MatchService;
use padel_corpo_api::config::Config;
use padel_corpo_api::domain::repositories::{MatchRepository, TeamRepository};
use padel_corpo_api::infrastructure::repositories::{
    InMemoryMatchRepository, InMemoryTeamRepository, PostgresMatchRepository,
    PostgresTeamRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!(
        max_courts = config.rules.max_courts,
        set_rules = ?config.rules.set_rules,
        points_win = config.points.win,
        points_loss = config.points.loss,
        "Configuration loaded"
    );

    let (matches, teams): (Arc<dyn MatchRepository>, Arc<dyn TeamRepository>) =
        match &config.database_url {
            Some(database_url) => {
                tracing::info!("Connecting to database...");
                let pool = PgPoolOptions::new()
                    .max_connections(5)
                    .connect(database_url)
                    .await?;
                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("Database connected successfully");

                (
                    Arc::new(PostgresMatchRepository::new(pool.clone())),
                    Arc::new(PostgresTeamRepository::new(pool)),
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set, keeping data in memory");
                (
                    Arc::new(InMemoryMatchRepository::new()),
                    Arc::new(InMemoryTeamRepository::new()),
                )
            }
        };

    let service = Arc::new(MatchService::new(
        matches,
        teams,
        config.rules,
        config.points,
    ));

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router(service).layer(cors);

    tracing::info!("Server listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
