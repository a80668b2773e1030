use once_cell::sync::Lazy;
use regex::Regex;

use super::value_objects::{Score, SetResult};
use crate::domain::errors::{EngineError, EngineResult};

static SET_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)-([0-9]+)$").expect("set token pattern is valid"));

/// Parses free-text set scores such as `"6-4, 6-2"`
///
/// Sets are separated by `","` or `", "`. Whitespace around the whole string
/// is ignored; anything else that is not `<int>-<int>` rejects the whole
/// input.
///
/// # Example
/// ```
/// use padel_corpo_api::domain::score::parse_score;
///
/// let score = parse_score(" 6-4, 3-6,7-5 ").expect("valid score");
/// assert_eq!(score.len(), 3);
/// assert_eq!(score.to_string(), "6-4, 3-6, 7-5");
/// ```
pub fn parse_score(text: &str) -> EngineResult<Score> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Parse("score is empty".to_string()));
    }

    trimmed
        .split(',')
        .enumerate()
        .map(|(index, token)| {
            let token = if index > 0 {
                token.strip_prefix(' ').unwrap_or(token)
            } else {
                token
            };
            parse_set(token)
        })
        .collect()
}

fn parse_set(token: &str) -> EngineResult<SetResult> {
    let captures = SET_TOKEN
        .captures(token)
        .ok_or_else(|| EngineError::Parse(format!("'{}' is not a set like 6-4", token)))?;

    let games = |group: usize| -> EngineResult<u32> {
        captures[group]
            .parse::<u32>()
            .map_err(|e| EngineError::Parse(format!("'{}': {}", token, e)))
    };

    Ok(SetResult::new(games(1)?, games(2)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets(text: &str) -> Vec<(u32, u32)> {
        parse_score(text)
            .unwrap()
            .sets()
            .iter()
            .map(|s| (s.games_a, s.games_b))
            .collect()
    }

    #[test]
    fn parses_comma_space_separated_sets() {
        assert_eq!(sets("6-4, 6-2"), vec![(6, 4), (6, 2)]);
    }

    #[test]
    fn parses_bare_comma_and_surrounding_whitespace() {
        assert_eq!(sets("  6-4,6-2  "), vec![(6, 4), (6, 2)]);
    }

    #[test]
    fn single_set_parses() {
        assert_eq!(sets("6-4"), vec![(6, 4)]);
    }

    #[test]
    fn empty_input_fails() {
        assert!(matches!(parse_score(""), Err(EngineError::Parse(_))));
        assert!(matches!(parse_score("   "), Err(EngineError::Parse(_))));
    }

    #[test]
    fn malformed_inputs_fail_whole_parse() {
        for input in [
            "6-4 6-3",
            "6-4, 6",
            "A-B",
            "6-4,,6-2",
            "6-4,  6-2",
            "6 - 4",
            "6-4, -6-2",
            "6-4,",
            "99999999999-1",
        ] {
            assert!(
                matches!(parse_score(input), Err(EngineError::Parse(_))),
                "expected parse failure for {:?}",
                input
            );
        }
    }

    #[test]
    fn reparsing_printed_score_is_stable() {
        for input in ["6-4, 6-2", "6-4,3-6, 7-5", "0-6, 7-6", "12-10, 6-6, 6-1"] {
            let first = parse_score(input).unwrap();
            let second = parse_score(&first.to_string()).unwrap();
            assert_eq!(first, second);
        }
    }
}
