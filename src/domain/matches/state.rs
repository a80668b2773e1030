use super::value_objects::{MatchStatus, StatusChange};
use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::score::{mirror_score, parse_score, validate_score, Score, SetRules, Side};

/// Status of a match together with the data only that status carries
///
/// The score lives inside `Finished`, so a scheduled or cancelled match
/// cannot hold one. Only the home side's score is stored; the away score is
/// always derived with [`mirror_score`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchState {
    Scheduled,
    Finished { score: Score },
    Cancelled,
}

impl MatchState {
    pub fn status(&self) -> MatchStatus {
        match self {
            MatchState::Scheduled => MatchStatus::Scheduled,
            MatchState::Finished { .. } => MatchStatus::Finished,
            MatchState::Cancelled => MatchStatus::Cancelled,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, MatchState::Finished { .. })
    }

    /// Score as seen by `side`, present only once finished
    pub fn score_for(&self, side: Side) -> Option<Score> {
        match (self, side) {
            (MatchState::Finished { score }, Side::Home) => Some(score.clone()),
            (MatchState::Finished { score }, Side::Away) => Some(mirror_score(score)),
            _ => None,
        }
    }

    /// Side that won the match, present only once finished
    pub fn winner(&self) -> Option<Side> {
        match self {
            MatchState::Finished { score } => score.tally().leader(),
            _ => None,
        }
    }

    /// Computes the state reached by applying `change`
    ///
    /// Every legal move is listed here. Asking for the current status is a
    /// no-op, including `Finish` on a finished match: a score correction goes
    /// back through `Scheduled` first. On error the caller keeps its state.
    pub fn transition(&self, change: StatusChange, rules: SetRules) -> EngineResult<MatchState> {
        use MatchState as S;
        use StatusChange as C;

        match (self, change) {
            (S::Scheduled, C::Schedule) => Ok(S::Scheduled),
            (S::Scheduled, C::Finish { side, raw_score }) => finish(side, &raw_score, rules),
            (S::Scheduled, C::Cancel) => Ok(S::Cancelled),

            (S::Finished { .. }, C::Finish { .. }) => Ok(self.clone()),
            (S::Finished { .. }, C::Schedule) => Ok(S::Scheduled),
            (S::Finished { .. }, C::Cancel) => Ok(S::Cancelled),

            (S::Cancelled, C::Cancel) => Ok(S::Cancelled),
            (S::Cancelled, C::Schedule) => Ok(S::Scheduled),
            (S::Cancelled, C::Finish { .. }) => Err(EngineError::InvalidTransition {
                from: MatchStatus::Cancelled,
                to: MatchStatus::Finished,
            }),
        }
    }

    /// Rebuilds the state from a stored status and home score text
    pub fn from_persistence(status: MatchStatus, score_home: Option<&str>) -> Result<Self, String> {
        match (status, score_home) {
            (MatchStatus::Scheduled, _) => Ok(MatchState::Scheduled),
            (MatchStatus::Cancelled, _) => Ok(MatchState::Cancelled),
            (MatchStatus::Finished, Some(text)) => parse_score(text)
                .map(|score| MatchState::Finished { score })
                .map_err(|e| format!("Stored score '{}' is unreadable: {}", text, e)),
            (MatchStatus::Finished, None) => {
                Err("Finished match has no stored score".to_string())
            }
        }
    }
}

fn finish(side: Side, raw_score: &str, rules: SetRules) -> EngineResult<MatchState> {
    let entered = parse_score(raw_score)?;
    validate_score(&entered, rules)?;

    let score = match side {
        Side::Home => entered,
        Side::Away => mirror_score(&entered),
    };
    Ok(MatchState::Finished { score })
}
