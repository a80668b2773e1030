use uuid::Uuid;

use super::value_objects::Slot;

/// Domain events produced by the Match aggregate
///
/// Returned from every accepted mutation so callers can log or publish what
/// happened without diffing the aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    /// A new match was booked
    Scheduled {
        match_id: Uuid,
        slot: Slot,
    },
    /// Date, time or court changed
    Rescheduled {
        match_id: Uuid,
        from: Slot,
        to: Slot,
    },
    /// A valid score was recorded
    Finished {
        match_id: Uuid,
        winner_team: Uuid,
    },
    /// Back to scheduled, from finished or cancelled
    Reopened {
        match_id: Uuid,
    },
    Cancelled {
        match_id: Uuid,
    },
}

impl MatchEvent {
    pub fn match_id(&self) -> Uuid {
        match self {
            MatchEvent::Scheduled { match_id, .. } => *match_id,
            MatchEvent::Rescheduled { match_id, .. } => *match_id,
            MatchEvent::Finished { match_id, .. } => *match_id,
            MatchEvent::Reopened { match_id } => *match_id,
            MatchEvent::Cancelled { match_id } => *match_id,
        }
    }

    /// Short name used as a log field
    pub fn name(&self) -> &'static str {
        match self {
            MatchEvent::Scheduled { .. } => "scheduled",
            MatchEvent::Rescheduled { .. } => "rescheduled",
            MatchEvent::Finished { .. } => "finished",
            MatchEvent::Reopened { .. } => "reopened",
            MatchEvent::Cancelled { .. } => "cancelled",
        }
    }
}
