use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::{EngineError, EngineResult};

/// A two-player team entered by a company
///
/// Team management belongs to the admin CRUD layer; the engine only needs the
/// identity and the display name used to break ranking ties.
///
/// # Invariants
/// - Company name is not blank
/// - The two member references are distinct
///
/// # Example
/// ```
/// use padel_corpo_api::domain::team::Team;
/// use uuid::Uuid;
///
/// let team = Team::new("Acme", [Uuid::new_v4(), Uuid::new_v4()]).expect("valid team");
/// assert_eq!(team.company(), "Acme");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    id: Uuid,
    company: String,
    players: [Uuid; 2],
}

impl Team {
    /// Creates a new team
    ///
    /// # Returns
    /// * `Ok(Team)` - New team with a fresh id
    /// * `Err(EngineError::InvalidTeam)` - Blank company or the same player twice
    pub fn new(company: impl Into<String>, players: [Uuid; 2]) -> EngineResult<Self> {
        let company = company.into().trim().to_string();
        if company.is_empty() {
            return Err(EngineError::InvalidTeam(
                "Company name cannot be empty".to_string(),
            ));
        }
        if players[0] == players[1] {
            return Err(EngineError::InvalidTeam(
                "A team needs two different players".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            company,
            players,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Display name shown in the ranking
    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn players(&self) -> [Uuid; 2] {
        self.players
    }

    /// Rebuilds a team from stored data without re-running validation
    pub fn from_persistence(id: Uuid, company: String, players: [Uuid; 2]) -> Self {
        Self {
            id,
            company,
            players,
        }
    }
}
