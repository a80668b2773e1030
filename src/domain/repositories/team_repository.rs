use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::team::Team;

/// Repository trait for teams
///
/// Teams are managed by the admin layer; the engine reads them to check that
/// a match references real teams and to name ranking rows.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Save a team (insert or update)
    async fn save(&self, team: &Team) -> Result<(), String>;

    /// Find a team by its ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, String>;

    /// Find every team
    async fn find_all(&self) -> Result<Vec<Team>, String>;
}
