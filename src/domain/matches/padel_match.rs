use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::events::MatchEvent;
use super::scheduling::{ensure_court_exists, ensure_distinct_teams, ensure_slot_free};
use super::state::MatchState;
use super::value_objects::{MatchRules, MatchStatus, Slot, SlotEdit, StatusChange};
use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::score::{Score, Side};

/// Requested change to a match: logistics, status, or both
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchUpdate {
    pub slot: SlotEdit,
    pub status: Option<StatusChange>,
}

/// Match aggregate root
///
/// A match between two teams on a booked slot. All status changes go
/// through [`MatchState::transition`]; this type adds the scheduling rules
/// that need the other bookings.
///
/// # Invariants
/// - Home and away teams differ
/// - A live (non-cancelled) match never shares its slot with another one
/// - A score exists if and only if the match is finished
/// - Date, time and court only change while scheduled, or when a cancelled
///   match is reactivated
///
/// # Example
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use padel_corpo_api::domain::matches::{Match, MatchRules, MatchStatus, Slot};
/// use uuid::Uuid;
///
/// let slot = Slot::new(
///     NaiveDate::from_ymd_opt(2026, 5, 4).unwrap(),
///     NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
///     1,
/// );
/// let (game, events) = Match::schedule(
///     Uuid::new_v4(),
///     Uuid::new_v4(),
///     slot,
///     &[],
///     &MatchRules::default(),
/// )
/// .expect("valid match");
///
/// assert_eq!(game.status(), MatchStatus::Scheduled);
/// assert_eq!(events.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    id: Uuid,
    home_team: Uuid,
    away_team: Uuid,
    slot: Slot,
    state: MatchState,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Match {
    /// Books a new match
    ///
    /// # Arguments
    /// * `booked` - Matches already on the same date, used for the slot check
    ///
    /// # Business Rules Enforced
    /// - Teams must differ (`SameTeamConflict`)
    /// - Court must exist (`InvalidCourt`)
    /// - Slot must be free of live matches (`SlotConflict`)
    /// - Initial status is always Scheduled
    pub fn schedule(
        home_team: Uuid,
        away_team: Uuid,
        slot: Slot,
        booked: &[Match],
        rules: &MatchRules,
    ) -> EngineResult<(Self, Vec<MatchEvent>)> {
        ensure_distinct_teams(home_team, away_team)?;
        ensure_court_exists(slot.court, rules)?;

        let id = Uuid::new_v4();
        ensure_slot_free(&slot, id, booked)?;

        let now = Utc::now();
        let game = Self {
            id,
            home_team,
            away_team,
            slot,
            state: MatchState::Scheduled,
            created_at: now,
            updated_at: now,
        };

        let events = vec![MatchEvent::Scheduled { match_id: id, slot }];
        Ok((game, events))
    }

    /// Applies a status change and/or a slot edit as one decision
    ///
    /// Nothing is modified when an error is returned.
    ///
    /// # Arguments
    /// * `booked` - Matches on the target date, used when the slot moves or a
    ///   cancelled match comes back
    pub fn apply(
        &mut self,
        update: MatchUpdate,
        booked: &[Match],
        rules: &MatchRules,
    ) -> EngineResult<Vec<MatchEvent>> {
        let from = self.status();
        let next_state = match update.status {
            Some(change) => self.state.transition(change, rules.set_rules)?,
            None => self.state.clone(),
        };
        let to = next_state.status();

        let next_slot = self.slot.with_edit(&update.slot);
        let slot_changed = next_slot != self.slot;
        let reactivated = from == MatchStatus::Cancelled && to == MatchStatus::Scheduled;

        if slot_changed && from != MatchStatus::Scheduled && !reactivated {
            return Err(EngineError::SchedulingLocked { status: from });
        }
        if slot_changed {
            ensure_court_exists(next_slot.court, rules)?;
        }
        if (slot_changed || reactivated) && to != MatchStatus::Cancelled {
            ensure_slot_free(&next_slot, self.id, booked)?;
        }

        let mut events = Vec::new();
        if slot_changed {
            events.push(MatchEvent::Rescheduled {
                match_id: self.id,
                from: self.slot,
                to: next_slot,
            });
        }
        if from != to {
            match to {
                MatchStatus::Finished => {
                    if let Some(side) = next_state.winner() {
                        events.push(MatchEvent::Finished {
                            match_id: self.id,
                            winner_team: self.team_on(side),
                        });
                    }
                }
                MatchStatus::Scheduled => events.push(MatchEvent::Reopened { match_id: self.id }),
                MatchStatus::Cancelled => events.push(MatchEvent::Cancelled { match_id: self.id }),
            }
        }

        self.slot = next_slot;
        self.state = next_state;
        if !events.is_empty() {
            self.updated_at = Utc::now();
        }

        Ok(events)
    }

    /// Only scheduled matches may be removed
    pub fn ensure_deletable(&self) -> EngineResult<()> {
        match self.status() {
            MatchStatus::Scheduled => Ok(()),
            status => Err(EngineError::NotDeletable { status }),
        }
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn home_team(&self) -> Uuid {
        self.home_team
    }

    pub fn away_team(&self) -> Uuid {
        self.away_team
    }

    pub fn team_on(&self, side: Side) -> Uuid {
        match side {
            Side::Home => self.home_team,
            Side::Away => self.away_team,
        }
    }

    pub fn involves(&self, team_id: Uuid) -> bool {
        self.home_team == team_id || self.away_team == team_id
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn status(&self) -> MatchStatus {
        self.state.status()
    }

    /// Score seen by `side`; the away score is the mirror of the home one
    pub fn score_for(&self, side: Side) -> Option<Score> {
        self.state.score_for(side)
    }

    /// Team that won, once finished
    pub fn winner_team(&self) -> Option<Uuid> {
        self.state.winner().map(|side| self.team_on(side))
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Reconstructs a Match from persistence layer data
    ///
    /// Bypasses scheduling rules: stored data was validated when written.
    /// Only to be used by repository implementations.
    pub fn from_persistence(
        id: Uuid,
        home_team: Uuid,
        away_team: Uuid,
        slot: Slot,
        state: MatchState,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            home_team,
            away_team,
            slot,
            state,
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn slot(court: u8) -> Slot {
        Slot::new(
            NaiveDate::from_ymd_opt(2026, 5, 4).unwrap(),
            NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            court,
        )
    }

    fn booked_match(court: u8) -> Match {
        Match::schedule(
            Uuid::new_v4(),
            Uuid::new_v4(),
            slot(court),
            &[],
            &MatchRules::default(),
        )
        .unwrap()
        .0
    }

    fn finish(side: Side, text: &str) -> MatchUpdate {
        MatchUpdate {
            status: Some(StatusChange::Finish {
                side,
                raw_score: text.to_string(),
            }),
            ..MatchUpdate::default()
        }
    }

    fn status(change: StatusChange) -> MatchUpdate {
        MatchUpdate {
            status: Some(change),
            ..MatchUpdate::default()
        }
    }

    fn move_to_court(court: u8) -> MatchUpdate {
        MatchUpdate {
            slot: SlotEdit {
                court: Some(court),
                ..SlotEdit::default()
            },
            status: None,
        }
    }

    #[test]
    fn same_team_on_both_sides_is_rejected() {
        let team = Uuid::new_v4();
        let result = Match::schedule(team, team, slot(1), &[], &MatchRules::default());

        assert_eq!(result.unwrap_err(), EngineError::SameTeamConflict);
    }

    #[test]
    fn booking_an_occupied_slot_is_rejected() {
        let existing = booked_match(1);
        let result = Match::schedule(
            Uuid::new_v4(),
            Uuid::new_v4(),
            slot(1),
            &[existing],
            &MatchRules::default(),
        );

        assert_eq!(result.unwrap_err(), EngineError::SlotConflict { slot: slot(1) });
    }

    #[test]
    fn cancelled_match_frees_its_slot() {
        let mut existing = booked_match(1);
        existing
            .apply(status(StatusChange::Cancel), &[], &MatchRules::default())
            .unwrap();

        let result = Match::schedule(
            Uuid::new_v4(),
            Uuid::new_v4(),
            slot(1),
            &[existing],
            &MatchRules::default(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn court_outside_venue_is_rejected() {
        let rules = MatchRules::default();
        for court in [0, 11] {
            let result = Match::schedule(Uuid::new_v4(), Uuid::new_v4(), slot(court), &[], &rules);
            assert_eq!(
                result.unwrap_err(),
                EngineError::InvalidCourt {
                    court,
                    max_courts: 10
                }
            );
        }
    }

    #[test]
    fn finishing_records_winner_and_event() {
        let mut game = booked_match(1);
        let events = game
            .apply(finish(Side::Away, "6-2, 6-3"), &[], &MatchRules::default())
            .unwrap();

        assert_eq!(game.status(), MatchStatus::Finished);
        assert_eq!(game.winner_team(), Some(game.away_team()));
        assert_eq!(game.score_for(Side::Home).unwrap().to_string(), "2-6, 3-6");
        assert_eq!(
            events,
            vec![MatchEvent::Finished {
                match_id: game.id(),
                winner_team: game.away_team(),
            }]
        );
    }

    #[test]
    fn invalid_score_leaves_match_scheduled() {
        let mut game = booked_match(1);
        let before = game.clone();

        let result = game.apply(finish(Side::Home, "6-4, 6-4, 6-4"), &[], &MatchRules::default());

        assert_eq!(result, Err(EngineError::PrematureStop { set_number: 3 }));
        assert_eq!(game, before);
    }

    #[test]
    fn rescheduling_into_occupied_slot_is_rejected() {
        let other = booked_match(2);
        let mut game = booked_match(1);

        let result = game.apply(move_to_court(2), &[other], &MatchRules::default());

        assert_eq!(result, Err(EngineError::SlotConflict { slot: slot(2) }));
        assert_eq!(game.slot(), slot(1));
    }

    #[test]
    fn rescheduling_a_scheduled_match_emits_event() {
        let mut game = booked_match(1);
        let events = game
            .apply(move_to_court(4), &[], &MatchRules::default())
            .unwrap();

        assert_eq!(game.slot(), slot(4));
        assert_eq!(
            events,
            vec![MatchEvent::Rescheduled {
                match_id: game.id(),
                from: slot(1),
                to: slot(4),
            }]
        );
    }

    #[test]
    fn cancelled_match_logistics_are_frozen() {
        let mut game = booked_match(1);
        game.apply(status(StatusChange::Cancel), &[], &MatchRules::default())
            .unwrap();

        let result = game.apply(move_to_court(3), &[], &MatchRules::default());

        assert_eq!(
            result,
            Err(EngineError::SchedulingLocked {
                status: MatchStatus::Cancelled
            })
        );
    }

    #[test]
    fn finished_match_logistics_are_frozen() {
        let mut game = booked_match(1);
        game.apply(finish(Side::Home, "6-1, 6-1"), &[], &MatchRules::default())
            .unwrap();

        let result = game.apply(move_to_court(3), &[], &MatchRules::default());

        assert!(matches!(result, Err(EngineError::SchedulingLocked { .. })));
    }

    #[test]
    fn reactivation_may_move_the_slot() {
        let mut game = booked_match(1);
        game.apply(status(StatusChange::Cancel), &[], &MatchRules::default())
            .unwrap();

        let mut update = move_to_court(5);
        update.status = Some(StatusChange::Schedule);
        let events = game.apply(update, &[], &MatchRules::default()).unwrap();

        assert_eq!(game.status(), MatchStatus::Scheduled);
        assert_eq!(game.slot(), slot(5));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn reactivation_checks_slot_was_not_taken_meanwhile() {
        let mut game = booked_match(1);
        game.apply(status(StatusChange::Cancel), &[], &MatchRules::default())
            .unwrap();
        let newcomer = booked_match(1);

        let result = game.apply(status(StatusChange::Schedule), &[newcomer], &MatchRules::default());

        assert_eq!(result, Err(EngineError::SlotConflict { slot: slot(1) }));
        assert_eq!(game.status(), MatchStatus::Cancelled);
    }

    #[test]
    fn same_status_request_still_updates_court() {
        let mut game = booked_match(1);
        let mut update = move_to_court(6);
        update.status = Some(StatusChange::Schedule);

        let events = game.apply(update, &[], &MatchRules::default()).unwrap();

        assert_eq!(game.status(), MatchStatus::Scheduled);
        assert_eq!(game.slot().court, 6);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn own_booking_is_not_a_conflict() {
        let mut game = booked_match(1);
        let snapshot = vec![game.clone()];
        let mut update = MatchUpdate {
            slot: SlotEdit {
                court: Some(1),
                ..SlotEdit::default()
            },
            status: None,
        };
        update.slot.time = Some(NaiveTime::from_hms_opt(18, 0, 0).unwrap());

        assert!(game.apply(update, &snapshot, &MatchRules::default()).unwrap().is_empty());
    }

    #[test]
    fn only_scheduled_matches_are_deletable() {
        let mut game = booked_match(1);
        assert!(game.ensure_deletable().is_ok());

        game.apply(finish(Side::Home, "6-0, 6-0"), &[], &MatchRules::default())
            .unwrap();
        assert_eq!(
            game.ensure_deletable(),
            Err(EngineError::NotDeletable {
                status: MatchStatus::Finished
            })
        );
    }
}
