use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::matches::{Match, Slot};

/// Failure of [`MatchRepository::save`]
///
/// `SlotTaken` is reported when the store itself refuses a second live
/// match on a slot, which happens when another writer booked it after our
/// snapshot was read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveMatchError {
    #[error("Slot {0} is already taken by another live match")]
    SlotTaken(Slot),

    #[error("{0}")]
    Storage(String),
}

/// Repository trait for the Match aggregate
///
/// Each method returns a consistent snapshot; callers serialize writes that
/// depend on a snapshot (finishing a match, booking a slot).
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Save a match (insert or update)
    ///
    /// Must refuse a live match on a slot already held by another live match.
    async fn save(&self, game: &Match) -> Result<(), SaveMatchError>;

    /// Find a match by its ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Match>, String>;

    /// Find every match, ordered by date, time and court
    async fn find_all(&self) -> Result<Vec<Match>, String>;

    /// Find all matches booked on a date, whatever their status
    async fn find_on_date(&self, date: NaiveDate) -> Result<Vec<Match>, String>;

    /// Find all finished matches
    async fn find_finished(&self) -> Result<Vec<Match>, String>;

    /// Delete a match by ID
    async fn delete(&self, id: Uuid) -> Result<(), String>;
}
