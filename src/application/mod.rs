// Application layer
// Use cases that combine repository snapshots with domain decisions

pub mod match_service;

pub use match_service::{MatchFilter, MatchService, NewMatch};
