// Ranking module
// Standings derived from finished matches, recomputed on every call

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use crate::domain::matches::{Match, MatchState};
use crate::domain::score::Side;
use crate::domain::team::Team;

/// Points awarded per finished match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsTable {
    pub win: u32,
    /// Participation point for the losing team
    pub loss: u32,
}

impl Default for PointsTable {
    fn default() -> Self {
        Self { win: 3, loss: 1 }
    }
}

/// One row of the ranking table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// 1-based place in the table
    pub position: usize,
    pub team_id: Uuid,
    /// Company name of the team
    pub team_name: String,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub points: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
}

impl RankingEntry {
    pub fn set_difference(&self) -> i64 {
        i64::from(self.sets_won) - i64::from(self.sets_lost)
    }
}

#[derive(Debug, Default)]
struct Standing {
    matches_played: u32,
    wins: u32,
    losses: u32,
    points: u32,
    sets_won: u32,
    sets_lost: u32,
}

impl Standing {
    fn record(&mut self, won: bool, sets_won: u32, sets_lost: u32, points: &PointsTable) {
        self.matches_played += 1;
        self.sets_won += sets_won;
        self.sets_lost += sets_lost;
        if won {
            self.wins += 1;
            self.points += points.win;
        } else {
            self.losses += 1;
            self.points += points.loss;
        }
    }
}

/// Folds finished matches into an ordered ranking
///
/// Matches that are not finished are skipped, so the whole match list can be
/// passed. Teams appear once they have played a finished match; `teams` only
/// supplies display names, falling back to the team id.
///
/// Order: points, then wins, then set difference (all descending), then team
/// name and id ascending. The result does not depend on input order.
pub fn compute_ranking<'a, I>(matches: I, teams: &[Team], points: &PointsTable) -> Vec<RankingEntry>
where
    I: IntoIterator<Item = &'a Match>,
{
    let mut standings: BTreeMap<Uuid, Standing> = BTreeMap::new();

    for game in matches {
        let MatchState::Finished { score } = game.state() else {
            continue;
        };
        let tally = score.tally();
        let Some(winner) = tally.leader() else {
            tracing::warn!(match_id = %game.id(), "Finished match without a winner skipped");
            continue;
        };

        for side in [Side::Home, Side::Away] {
            standings.entry(game.team_on(side)).or_default().record(
                side == winner,
                tally.wins_of(side),
                tally.wins_of(side.opposite()),
                points,
            );
        }
    }

    let names: HashMap<Uuid, &str> = teams.iter().map(|t| (t.id(), t.company())).collect();

    let mut ranking: Vec<RankingEntry> = standings
        .into_iter()
        .map(|(team_id, s)| RankingEntry {
            position: 0,
            team_id,
            team_name: names
                .get(&team_id)
                .map(|name| name.to_string())
                .unwrap_or_else(|| team_id.to_string()),
            matches_played: s.matches_played,
            wins: s.wins,
            losses: s.losses,
            points: s.points,
            sets_won: s.sets_won,
            sets_lost: s.sets_lost,
        })
        .collect();

    ranking.sort_by(compare_entries);
    for (index, entry) in ranking.iter_mut().enumerate() {
        entry.position = index + 1;
    }
    ranking
}

fn compare_entries(a: &RankingEntry, b: &RankingEntry) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| b.set_difference().cmp(&a.set_difference()))
        .then_with(|| a.team_name.cmp(&b.team_name))
        .then_with(|| a.team_id.cmp(&b.team_id))
}
