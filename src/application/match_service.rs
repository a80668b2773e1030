use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::matches::scheduling::ensure_distinct_teams;
use crate::domain::matches::{
    Match, MatchEvent, MatchRules, MatchStatus, MatchUpdate, Slot, StatusChange,
};
use crate::domain::ranking::{compute_ranking, PointsTable, RankingEntry};
use crate::domain::repositories::{MatchRepository, SaveMatchError, TeamRepository};
use crate::domain::score::Side;
use crate::domain::team::Team;

/// Data needed to book a match
#[derive(Debug, Clone, Deserialize)]
pub struct NewMatch {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub court_number: u8,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
}

/// Optional filters for listing matches
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchFilter {
    pub status: Option<MatchStatus>,
    pub team_id: Option<Uuid>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl MatchFilter {
    pub fn accepts(&self, game: &Match) -> bool {
        let date = game.slot().date;
        self.status.map_or(true, |s| game.status() == s)
            && self.team_id.map_or(true, |t| game.involves(t))
            && self.from.map_or(true, |from| date >= from)
            && self.to.map_or(true, |to| date <= to)
    }
}

/// Use cases around matches and the ranking
///
/// Mutations take `write_lock` so the snapshot read for a slot or status
/// decision cannot go stale before the write lands. Ranking reads do not
/// take it: a ranking may lag behind a concurrent write, never mix two.
pub struct MatchService {
    matches: Arc<dyn MatchRepository>,
    teams: Arc<dyn TeamRepository>,
    rules: MatchRules,
    points: PointsTable,
    write_lock: Mutex<()>,
}

impl MatchService {
    pub fn new(
        matches: Arc<dyn MatchRepository>,
        teams: Arc<dyn TeamRepository>,
        rules: MatchRules,
        points: PointsTable,
    ) -> Self {
        Self {
            matches,
            teams,
            rules,
            points,
            write_lock: Mutex::new(()),
        }
    }

    /// Registers a team so matches can reference it
    pub async fn register_team(&self, company: &str, players: [Uuid; 2]) -> EngineResult<Team> {
        let team = Team::new(company, players)?;
        self.teams.save(&team).await.map_err(EngineError::Repository)?;

        tracing::info!(team_id = %team.id(), company = team.company(), "Team registered");
        Ok(team)
    }

    pub async fn list_teams(&self) -> EngineResult<Vec<Team>> {
        self.teams.find_all().await.map_err(EngineError::Repository)
    }

    /// Books a new match after checking teams, court and slot
    pub async fn create_match(&self, new_match: NewMatch) -> EngineResult<Match> {
        ensure_distinct_teams(new_match.home_team_id, new_match.away_team_id)?;

        let _guard = self.write_lock.lock().await;

        self.ensure_team_exists(new_match.home_team_id).await?;
        self.ensure_team_exists(new_match.away_team_id).await?;

        let slot = Slot::new(new_match.date, new_match.time, new_match.court_number);
        let booked = self.snapshot_on(slot.date).await?;

        let (game, events) = Match::schedule(
            new_match.home_team_id,
            new_match.away_team_id,
            slot,
            &booked,
            &self.rules,
        )
        .map_err(|e| {
            tracing::warn!(%slot, error = %e, "Match creation rejected");
            e
        })?;

        self.store(&game).await?;
        log_events(&events);
        Ok(game)
    }

    /// Applies a logistics edit and/or status change to a match
    pub async fn update_match(&self, id: Uuid, update: MatchUpdate) -> EngineResult<Match> {
        let _guard = self.write_lock.lock().await;

        let mut game = self.load(id).await?;
        let target_date = update.slot.date.unwrap_or(game.slot().date);
        let booked = self.snapshot_on(target_date).await?;

        let from = game.status();
        let requested = update.status.as_ref().map(StatusChange::target);
        let events = game.apply(update, &booked, &self.rules).map_err(|e| {
            tracing::warn!(
                match_id = %id,
                %from,
                to = ?requested,
                kind = e.kind(),
                error = %e,
                "Match update rejected"
            );
            e
        })?;

        if events.is_empty() {
            tracing::debug!(match_id = %id, "Match update changed nothing");
            return Ok(game);
        }

        self.store(&game).await?;
        log_events(&events);
        Ok(game)
    }

    /// Records a score entered by one side and finishes the match
    pub async fn finish_match(&self, id: Uuid, side: Side, raw_score: &str) -> EngineResult<Match> {
        self.update_match(
            id,
            MatchUpdate {
                status: Some(StatusChange::Finish {
                    side,
                    raw_score: raw_score.to_string(),
                }),
                ..MatchUpdate::default()
            },
        )
        .await
    }

    pub async fn cancel_match(&self, id: Uuid) -> EngineResult<Match> {
        self.update_match(
            id,
            MatchUpdate {
                status: Some(StatusChange::Cancel),
                ..MatchUpdate::default()
            },
        )
        .await
    }

    /// Deletes a match that is still scheduled
    pub async fn delete_match(&self, id: Uuid) -> EngineResult<()> {
        let _guard = self.write_lock.lock().await;

        let game = self.load(id).await?;
        game.ensure_deletable()?;
        self.matches.delete(id).await.map_err(EngineError::Repository)?;

        tracing::info!(match_id = %id, "Match deleted");
        Ok(())
    }

    pub async fn get_match(&self, id: Uuid) -> EngineResult<Match> {
        self.load(id).await
    }

    pub async fn list_matches(&self, filter: &MatchFilter) -> EngineResult<Vec<Match>> {
        let all = self.matches.find_all().await.map_err(EngineError::Repository)?;
        Ok(all.into_iter().filter(|m| filter.accepts(m)).collect())
    }

    /// Recomputes the ranking from every finished match
    pub async fn ranking(&self) -> EngineResult<Vec<RankingEntry>> {
        let finished = self
            .matches
            .find_finished()
            .await
            .map_err(EngineError::Repository)?;
        let teams = self.teams.find_all().await.map_err(EngineError::Repository)?;

        let ranking = compute_ranking(&finished, &teams, &self.points);
        tracing::debug!(
            finished_matches = finished.len(),
            teams = ranking.len(),
            "Ranking computed"
        );
        Ok(ranking)
    }

    async fn load(&self, id: Uuid) -> EngineResult<Match> {
        self.matches
            .find_by_id(id)
            .await
            .map_err(EngineError::Repository)?
            .ok_or(EngineError::MatchNotFound(id))
    }

    /// Saves a match, turning a slot refused by the store into `SlotConflict`
    async fn store(&self, game: &Match) -> EngineResult<()> {
        self.matches.save(game).await.map_err(|e| match e {
            SaveMatchError::SlotTaken(slot) => {
                tracing::warn!(match_id = %game.id(), %slot, "Slot taken by a concurrent booking");
                EngineError::SlotConflict { slot }
            }
            SaveMatchError::Storage(message) => EngineError::Repository(message),
        })
    }

    async fn snapshot_on(&self, date: NaiveDate) -> EngineResult<Vec<Match>> {
        self.matches
            .find_on_date(date)
            .await
            .map_err(EngineError::Repository)
    }

    async fn ensure_team_exists(&self, id: Uuid) -> EngineResult<()> {
        match self.teams.find_by_id(id).await.map_err(EngineError::Repository)? {
            Some(_) => Ok(()),
            None => Err(EngineError::TeamNotFound(id)),
        }
    }
}

fn log_events(events: &[MatchEvent]) {
    for event in events {
        tracing::info!(match_id = %event.match_id(), event = event.name(), "Match event");
    }
}
