// Team domain module
// Two-player company teams referenced by matches

#![allow(clippy::module_inception)]

pub mod team;

pub use team::Team;
