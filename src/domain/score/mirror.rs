use super::value_objects::{Score, SetResult};

/// Derives the opponent's score by swapping the games of every set
///
/// Set order is preserved, so mirroring twice gives back the input.
pub fn mirror_score(score: &Score) -> Score {
    score.sets().iter().copied().map(SetResult::swapped).collect()
}
