use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::domain::matches::{Match, MatchStatus};
use crate::domain::repositories::{MatchRepository, SaveMatchError, TeamRepository};
use crate::domain::team::Team;

const LOCK_ERROR: &str = "In-memory store lock poisoned";

/// In-memory implementation of MatchRepository
///
/// Used when no database is configured and in tests. Reads clone out of the
/// map, so every call works on its own snapshot. Saving mirrors the live-slot
/// unique index of the PostgreSQL schema.
#[derive(Default)]
pub struct InMemoryMatchRepository {
    matches: RwLock<HashMap<Uuid, Match>>,
}

impl InMemoryMatchRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_sorted<F>(&self, keep: F) -> Result<Vec<Match>, String>
    where
        F: Fn(&Match) -> bool,
    {
        let guard = self.matches.read().map_err(|_| LOCK_ERROR.to_string())?;
        let mut found: Vec<Match> = guard.values().filter(|m| keep(m)).cloned().collect();
        found.sort_by_key(|m| (m.slot().date, m.slot().time, m.slot().court));
        Ok(found)
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    async fn save(&self, game: &Match) -> Result<(), SaveMatchError> {
        let mut guard = self
            .matches
            .write()
            .map_err(|_| SaveMatchError::Storage(LOCK_ERROR.to_string()))?;

        let is_live = |m: &Match| m.status() != MatchStatus::Cancelled;
        let taken = is_live(game)
            && guard
                .values()
                .any(|m| m.id() != game.id() && is_live(m) && m.slot() == game.slot());
        if taken {
            return Err(SaveMatchError::SlotTaken(game.slot()));
        }

        guard.insert(game.id(), game.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Match>, String> {
        let guard = self.matches.read().map_err(|_| LOCK_ERROR.to_string())?;
        Ok(guard.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Match>, String> {
        self.collect_sorted(|_| true)
    }

    async fn find_on_date(&self, date: NaiveDate) -> Result<Vec<Match>, String> {
        self.collect_sorted(|m| m.slot().date == date)
    }

    async fn find_finished(&self) -> Result<Vec<Match>, String> {
        self.collect_sorted(|m| m.status() == MatchStatus::Finished)
    }

    async fn delete(&self, id: Uuid) -> Result<(), String> {
        let mut guard = self.matches.write().map_err(|_| LOCK_ERROR.to_string())?;
        guard
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| format!("Match not found: {}", id))
    }
}

/// In-memory implementation of TeamRepository
#[derive(Default)]
pub struct InMemoryTeamRepository {
    teams: RwLock<HashMap<Uuid, Team>>,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn save(&self, team: &Team) -> Result<(), String> {
        let mut guard = self.teams.write().map_err(|_| LOCK_ERROR.to_string())?;
        guard.insert(team.id(), team.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, String> {
        let guard = self.teams.read().map_err(|_| LOCK_ERROR.to_string())?;
        Ok(guard.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Team>, String> {
        let guard = self.teams.read().map_err(|_| LOCK_ERROR.to_string())?;
        let mut teams: Vec<Team> = guard.values().cloned().collect();
        teams.sort_by(|a, b| a.company().cmp(b.company()));
        Ok(teams)
    }
}
