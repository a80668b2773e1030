// Scheduling guards shared by match creation and rescheduling

use uuid::Uuid;

use super::padel_match::Match;
use super::value_objects::{MatchRules, MatchStatus, Slot};
use crate::domain::errors::{EngineError, EngineResult};

pub fn ensure_distinct_teams(home_team: Uuid, away_team: Uuid) -> EngineResult<()> {
    if home_team == away_team {
        return Err(EngineError::SameTeamConflict);
    }
    Ok(())
}

pub fn ensure_court_exists(court: u8, rules: &MatchRules) -> EngineResult<()> {
    if court == 0 || court > rules.max_courts {
        return Err(EngineError::InvalidCourt {
            court,
            max_courts: rules.max_courts,
        });
    }
    Ok(())
}

/// Rejects `slot` when another live match already holds it
///
/// Cancelled matches free their slot. `candidate` is the match being placed,
/// so it never conflicts with its own booking.
pub fn ensure_slot_free(slot: &Slot, candidate: Uuid, booked: &[Match]) -> EngineResult<()> {
    let taken = booked.iter().any(|other| {
        other.id() != candidate && other.status() != MatchStatus::Cancelled && other.slot() == *slot
    });

    if taken {
        return Err(EngineError::SlotConflict { slot: *slot });
    }
    Ok(())
}
