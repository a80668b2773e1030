//! Padel Corpo API Library
//!
//! Match lifecycle and ranking engine for a corporate padel tournament:
//! score parsing and validation, the match state machine, slot booking
//! rules, and the standings derived from finished matches.

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
