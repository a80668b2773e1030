// HTTP handlers, one module per resource

pub mod health;
pub mod matches;
pub mod results;
pub mod teams;
