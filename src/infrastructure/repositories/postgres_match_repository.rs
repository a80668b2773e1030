use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::matches::{Match, MatchState, MatchStatus, Slot};
use crate::domain::repositories::{MatchRepository, SaveMatchError};
use crate::domain::score::Side;

const LIVE_SLOT_INDEX: &str = "matches_live_slot";
const UNIQUE_VIOLATION: &str = "23505";

const SELECT_MATCHES: &str = r#"
    SELECT
        id, home_team_id, away_team_id,
        match_date, start_time, court,
        status, score_home,
        created_at, updated_at
    FROM matches
"#;

/// PostgreSQL implementation of MatchRepository
///
/// Only the home score is stored; the away score is mirrored on read. A
/// partial unique index on (match_date, start_time, court) for live matches
/// backs the slot rule when two writers race.
pub struct PostgresMatchRepository {
    pool: PgPool,
}

impl PostgresMatchRepository {
    /// Creates a new PostgresMatchRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, sql: String, date: Option<NaiveDate>) -> Result<Vec<Match>, String> {
        let mut query = sqlx::query(&sql);
        if let Some(date) = date {
            query = query.bind(date);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| format!("Failed to load matches: {}", e))?;

        rows.iter().map(match_from_row).collect()
    }
}

fn save_error(err: sqlx::Error, slot: Slot) -> SaveMatchError {
    if let sqlx::Error::Database(db) = &err {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION)
            && db.constraint() == Some(LIVE_SLOT_INDEX)
        {
            return SaveMatchError::SlotTaken(slot);
        }
    }
    SaveMatchError::Storage(format!("Failed to save match: {}", err))
}

fn match_from_row(row: &PgRow) -> Result<Match, String> {
    let read_err = |e: sqlx::Error| format!("Failed to read match row: {}", e);

    let court: i16 = row.try_get("court").map_err(read_err)?;
    let court = u8::try_from(court).map_err(|_| format!("Stored court {} is out of range", court))?;
    let date: NaiveDate = row.try_get("match_date").map_err(read_err)?;
    let time: NaiveTime = row.try_get("start_time").map_err(read_err)?;

    let status: MatchStatus = row.try_get("status").map_err(read_err)?;
    let score_home: Option<String> = row.try_get("score_home").map_err(read_err)?;
    let state = MatchState::from_persistence(status, score_home.as_deref())?;

    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(read_err)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(read_err)?;

    Ok(Match::from_persistence(
        row.try_get("id").map_err(read_err)?,
        row.try_get("home_team_id").map_err(read_err)?,
        row.try_get("away_team_id").map_err(read_err)?,
        Slot::new(date, time, court),
        state,
        created_at,
        updated_at,
    ))
}

#[async_trait]
impl MatchRepository for PostgresMatchRepository {
    async fn save(&self, game: &Match) -> Result<(), SaveMatchError> {
        let slot = game.slot();
        let score_home = game.score_for(Side::Home).map(|s| s.to_string());

        sqlx::query(
            r#"
            INSERT INTO matches (
                id, home_team_id, away_team_id, match_date, start_time, court,
                status, score_home, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                match_date = EXCLUDED.match_date,
                start_time = EXCLUDED.start_time,
                court = EXCLUDED.court,
                status = EXCLUDED.status,
                score_home = EXCLUDED.score_home,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(game.id())
        .bind(game.home_team())
        .bind(game.away_team())
        .bind(slot.date)
        .bind(slot.time)
        .bind(i16::from(slot.court))
        .bind(game.status())
        .bind(score_home)
        .bind(game.created_at())
        .bind(game.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| save_error(e, slot))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Match>, String> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_MATCHES))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| format!("Failed to find match by id: {}", e))?;

        row.as_ref().map(match_from_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Match>, String> {
        self.fetch(
            format!("{} ORDER BY match_date, start_time, court", SELECT_MATCHES),
            None,
        )
        .await
    }

    async fn find_on_date(&self, date: NaiveDate) -> Result<Vec<Match>, String> {
        self.fetch(
            format!(
                "{} WHERE match_date = $1 ORDER BY start_time, court",
                SELECT_MATCHES
            ),
            Some(date),
        )
        .await
    }

    async fn find_finished(&self) -> Result<Vec<Match>, String> {
        self.fetch(
            format!(
                "{} WHERE status = 'finished' ORDER BY match_date, start_time, court",
                SELECT_MATCHES
            ),
            None,
        )
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<(), String> {
        let result = sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| format!("Failed to delete match: {}", e))?;

        if result.rows_affected() == 0 {
            return Err(format!("Match not found: {}", id));
        }

        Ok(())
    }
}
