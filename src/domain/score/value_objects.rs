use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::parser::parse_score;
use crate::domain::errors::EngineError;

/// One side of a match
///
/// Inside a [`SetResult`] the first number always belongs to `Home`
/// and the second to `Away`, from the point of view of whoever wrote it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[serde(alias = "A", alias = "a")]
    Home,
    #[serde(alias = "B", alias = "b")]
    Away,
}

impl Side {
    /// Returns the other side
    pub fn opposite(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Home => write!(f, "home"),
            Side::Away => write!(f, "away"),
        }
    }
}

/// Games won by each side in a single set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetResult {
    pub games_a: u32,
    pub games_b: u32,
}

impl SetResult {
    pub fn new(games_a: u32, games_b: u32) -> Self {
        Self { games_a, games_b }
    }

    /// Side with strictly more games, `None` when tied on games
    pub fn winner(&self) -> Option<Side> {
        match self.games_a.cmp(&self.games_b) {
            Ordering::Greater => Some(Side::Home),
            Ordering::Less => Some(Side::Away),
            Ordering::Equal => None,
        }
    }

    /// The same set seen from the opponent's side
    pub fn swapped(self) -> Self {
        Self {
            games_a: self.games_b,
            games_b: self.games_a,
        }
    }
}

impl fmt::Display for SetResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.games_a, self.games_b)
    }
}

/// Running count of sets won by each side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetTally {
    pub home: u32,
    pub away: u32,
}

impl SetTally {
    pub fn record(&mut self, set: &SetResult) {
        match set.winner() {
            Some(Side::Home) => self.home += 1,
            Some(Side::Away) => self.away += 1,
            None => {}
        }
    }

    /// Side with more sets, `None` on equal tallies
    pub fn leader(&self) -> Option<Side> {
        match self.home.cmp(&self.away) {
            Ordering::Greater => Some(Side::Home),
            Ordering::Less => Some(Side::Away),
            Ordering::Equal => None,
        }
    }

    pub fn wins_of(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    pub fn highest(&self) -> u32 {
        self.home.max(self.away)
    }
}

/// Ordered per-set results of a match
///
/// Serializes as a plain array of `{ games_a, games_b }` objects and prints
/// in the same text form the parser accepts (`"6-4, 6-2"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(Vec<SetResult>);

impl Score {
    pub fn new(sets: Vec<SetResult>) -> Self {
        Self(sets)
    }

    pub fn sets(&self) -> &[SetResult] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sets won by each side over the whole score
    pub fn tally(&self) -> SetTally {
        let mut tally = SetTally::default();
        for set in &self.0 {
            tally.record(set);
        }
        tally
    }
}

impl FromIterator<SetResult> for Score {
    fn from_iter<I: IntoIterator<Item = SetResult>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, set) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", set)?;
        }
        Ok(())
    }
}

impl FromStr for Score {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_score(s)
    }
}
