use serde::{Deserialize, Serialize};

use super::value_objects::{Score, SetResult, SetTally, Side};
use crate::domain::errors::{EngineError, EngineResult};

/// Sets a side must win to take the match (best of 3)
pub const SETS_TO_WIN: u32 = 2;

/// Fewest sets a complete score can contain
pub const MIN_SETS: usize = 2;

/// How strictly the game counts inside each set are checked
///
/// `Lenient` accepts any two non-negative integers per set. `Padel` adds the
/// usual set rules: the winner needs 6 or 7 games, a 2-game margin unless
/// the set went to a 7-6 tie-break, and 7 games only against 5 or 6.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetRules {
    #[default]
    Lenient,
    Padel,
}

/// Outcome of a valid score, from the perspective of whoever entered it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub winner: Side,
    pub tally: SetTally,
    /// Number of sets it took to decide the match
    pub sets_played: usize,
}

/// Checks a parsed score against the competition rules
///
/// # Rules
/// - at least 2 sets are present
/// - no set is listed after one side reached 2 set wins
/// - the set tally is not level
/// - one side reached 2 set wins
///
/// # Example
/// ```
/// use padel_corpo_api::domain::score::{parse_score, validate_score, SetRules, Side};
///
/// let score = parse_score("6-4, 6-2").unwrap();
/// let decision = validate_score(&score, SetRules::Lenient).unwrap();
/// assert_eq!(decision.winner, Side::Home);
/// assert_eq!(decision.sets_played, 2);
/// ```
pub fn validate_score(score: &Score, rules: SetRules) -> EngineResult<Decision> {
    if score.len() < MIN_SETS {
        return Err(EngineError::InsufficientSets);
    }

    if rules == SetRules::Padel {
        for (index, set) in score.sets().iter().enumerate() {
            check_padel_set(set).map_err(|reason| EngineError::InvalidSetScore {
                set_number: index + 1,
                reason: reason.to_string(),
            })?;
        }
    }

    let mut tally = SetTally::default();
    for (index, set) in score.sets().iter().enumerate() {
        tally.record(set);
        let decided = tally.highest() >= SETS_TO_WIN;
        if decided && index + 1 < score.len() {
            return Err(EngineError::PrematureStop {
                set_number: index + 2,
            });
        }
    }

    match tally.leader() {
        None => Err(EngineError::DrawNotAllowed),
        Some(_) if tally.highest() < SETS_TO_WIN => Err(EngineError::InsufficientSets),
        Some(winner) => Ok(Decision {
            winner,
            tally,
            sets_played: score.len(),
        }),
    }
}

fn check_padel_set(set: &SetResult) -> Result<(), &'static str> {
    let high = set.games_a.max(set.games_b);
    let low = set.games_a.min(set.games_b);

    if high < 6 {
        return Err("the set winner needs at least 6 games");
    }
    if high > 7 {
        return Err("a set cannot go beyond 7 games");
    }
    if high == 7 && low < 5 {
        return Err("7 games are only possible against 5 or 6");
    }
    if high - low < 2 && !(high == 7 && low == 6) {
        return Err("a set needs a 2-game margin unless it ends 7-6");
    }
    Ok(())
}
