// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of infrastructure concerns

pub mod errors;
pub mod matches;
pub mod ranking;
pub mod repositories;
pub mod score;
pub mod team;
