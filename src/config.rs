use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::domain::matches::value_objects::DEFAULT_MAX_COURTS;
use crate::domain::matches::MatchRules;
use crate::domain::ranking::PointsTable;
use crate::domain::score::SetRules;

/// Runtime configuration, read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// PostgreSQL URL; in-memory repositories are used when unset
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub rules: MatchRules,
    pub points: PointsTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            rules: MatchRules::default(),
            points: PointsTable::default(),
        }
    }
}

impl Config {
    /// Builds the configuration from process environment variables
    ///
    /// # Variables
    /// - `DATABASE_URL`
    /// - `BIND_ADDR` (default `0.0.0.0:3000`)
    /// - `MAX_COURTS` (default 10)
    /// - `POINTS_WIN` / `POINTS_LOSS` (default 3 / 1)
    /// - `STRICT_SET_SCORES` (default false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let strict = parse_or("STRICT_SET_SCORES", &lookup, false);

        let mut max_courts = parse_or("MAX_COURTS", &lookup, DEFAULT_MAX_COURTS);
        if max_courts == 0 {
            tracing::warn!(fallback = DEFAULT_MAX_COURTS, "MAX_COURTS must be at least 1");
            max_courts = DEFAULT_MAX_COURTS;
        }

        let mut points = PointsTable {
            win: parse_or("POINTS_WIN", &lookup, defaults.points.win),
            loss: parse_or("POINTS_LOSS", &lookup, defaults.points.loss),
        };
        if points.loss >= points.win {
            tracing::warn!(
                win = points.win,
                loss = points.loss,
                fallback = ?defaults.points,
                "POINTS_WIN must be greater than POINTS_LOSS"
            );
            points = defaults.points;
        }

        Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            bind_addr: parse_or("BIND_ADDR", &lookup, defaults.bind_addr),
            rules: MatchRules {
                max_courts,
                set_rules: if strict {
                    SetRules::Padel
                } else {
                    SetRules::Lenient
                },
            },
            points,
        }
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, fallback = ?default, "Ignoring malformed setting");
            default
        }),
    }
}
