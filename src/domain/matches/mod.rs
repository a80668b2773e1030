// Match domain module
// Contains the match aggregate, its state machine, scheduling guards and events

pub mod events;
pub mod padel_match;
pub mod scheduling;
pub mod state;
pub mod value_objects;

pub use events::MatchEvent;
pub use padel_match::{Match, MatchUpdate};
pub use state::MatchState;
pub use value_objects::{MatchRules, MatchStatus, Slot, SlotEdit, StatusChange};
