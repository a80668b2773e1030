// Repository ports: persistence contracts the domain depends on

pub mod match_repository;
pub mod team_repository;

pub use match_repository::{MatchRepository, SaveMatchError};
pub use team_repository::TeamRepository;
