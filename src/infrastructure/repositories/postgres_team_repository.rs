use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::repositories::TeamRepository;
use crate::domain::team::Team;

/// PostgreSQL implementation of TeamRepository
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Creates a new PostgresTeamRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn team_from_row(row: &PgRow) -> Result<Team, String> {
    let read_err = |e: sqlx::Error| format!("Failed to read team row: {}", e);

    Ok(Team::from_persistence(
        row.try_get("id").map_err(read_err)?,
        row.try_get("company").map_err(read_err)?,
        [
            row.try_get("player_one_id").map_err(read_err)?,
            row.try_get("player_two_id").map_err(read_err)?,
        ],
    ))
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn save(&self, team: &Team) -> Result<(), String> {
        let [player_one, player_two] = team.players();

        sqlx::query(
            r#"
            INSERT INTO teams (id, company, player_one_id, player_two_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                company = EXCLUDED.company,
                player_one_id = EXCLUDED.player_one_id,
                player_two_id = EXCLUDED.player_two_id
            "#,
        )
        .bind(team.id())
        .bind(team.company())
        .bind(player_one)
        .bind(player_two)
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to save team: {}", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, String> {
        let row = sqlx::query(
            "SELECT id, company, player_one_id, player_two_id FROM teams WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| format!("Failed to find team by id: {}", e))?;

        row.as_ref().map(team_from_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Team>, String> {
        let rows = sqlx::query(
            "SELECT id, company, player_one_id, player_two_id FROM teams ORDER BY company",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to list teams: {}", e))?;

        rows.iter().map(team_from_row).collect()
    }
}
