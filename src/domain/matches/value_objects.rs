use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::score::{SetRules, Side};

/// Default number of courts at the venue
pub const DEFAULT_MAX_COURTS: u8 = 10;

/// Lifecycle status of a match
///
/// # Status Transitions
/// ```text
/// Scheduled -> Finished  (needs a valid score)
/// Scheduled -> Cancelled
/// Finished  -> Scheduled | Cancelled   (clears the score)
/// Cancelled -> Scheduled
/// ```
/// `Cancelled -> Finished` has to go through `Scheduled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "match_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// Planned, no result yet
    Scheduled,
    /// Played, score recorded
    Finished,
    /// Called off
    Cancelled,
}

impl MatchStatus {
    /// Checks whether a match in this status may be moved to `next`
    ///
    /// Requesting the current status is always allowed and changes nothing.
    ///
    /// # Example
    /// ```
    /// use padel_corpo_api::domain::matches::MatchStatus;
    ///
    /// assert!(MatchStatus::Scheduled.can_transition_to(MatchStatus::Finished));
    /// assert!(!MatchStatus::Cancelled.can_transition_to(MatchStatus::Finished));
    /// ```
    pub fn can_transition_to(&self, next: MatchStatus) -> bool {
        use MatchStatus::*;
        matches!(
            (self, next),
            (Scheduled, _)
                | (Finished, _)
                | (Cancelled, Scheduled)
                | (Cancelled, Cancelled)
        )
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStatus::Scheduled => write!(f, "scheduled"),
            MatchStatus::Finished => write!(f, "finished"),
            MatchStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Date, start time and court a match is booked on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub court: u8,
}

impl Slot {
    pub fn new(date: NaiveDate, time: NaiveTime, court: u8) -> Self {
        Self { date, time, court }
    }

    /// Applies the fields of an edit that are set
    pub fn with_edit(self, edit: &SlotEdit) -> Slot {
        Slot {
            date: edit.date.unwrap_or(self.date),
            time: edit.time.unwrap_or(self.time),
            court: edit.court.unwrap_or(self.court),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} court {}",
            self.date,
            self.time.format("%H:%M"),
            self.court
        )
    }
}

/// Partial change of a match's logistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotEdit {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub court: Option<u8>,
}

impl SlotEdit {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.time.is_none() && self.court.is_none()
    }
}

/// Requested status change, with the payload the target status needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    Schedule,
    Finish { side: Side, raw_score: String },
    Cancel,
}

impl StatusChange {
    pub fn target(&self) -> MatchStatus {
        match self {
            StatusChange::Schedule => MatchStatus::Scheduled,
            StatusChange::Finish { .. } => MatchStatus::Finished,
            StatusChange::Cancel => MatchStatus::Cancelled,
        }
    }
}

/// Competition settings the engine enforces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRules {
    /// Courts are numbered `1..=max_courts`
    pub max_courts: u8,
    pub set_rules: SetRules,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            max_courts: DEFAULT_MAX_COURTS,
            set_rules: SetRules::Lenient,
        }
    }
}
