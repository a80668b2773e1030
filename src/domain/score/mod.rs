// Score module
// Parsing, validation and mirroring of tennis-style set scores

mod mirror;
mod parser;
mod validator;
pub mod value_objects;

pub use mirror::mirror_score;
pub use parser::parse_score;
pub use validator::{validate_score, Decision, SetRules, MIN_SETS, SETS_TO_WIN};
pub use value_objects::{Score, SetResult, SetTally, Side};
