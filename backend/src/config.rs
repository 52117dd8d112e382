use std::{env, fmt, net::SocketAddr, path::PathBuf};

use chrono::{DateTime, Duration, Utc};
use shared::constants::CURRENT_LOTTERY_ID;
use shared::validation::validate_lottery_id;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_FRONTEND_DIST: &str = "../frontend/dist";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://127.0.0.1:8080,http://127.0.0.1:3000";
const DEFAULT_LOTTERY_DAYS: i64 = 7;

#[derive(Debug)]
pub enum ConfigError {
    InvalidBindAddr(String),
    InvalidLotteryId(String),
    InvalidTimestamp { var: &'static str, value: String },
    InvertedWindow,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBindAddr(addr) => write!(f, "BIND_ADDR is not a socket address: {}", addr),
            Self::InvalidLotteryId(id) => write!(f, "LOTTERY_ID is not a valid lottery id: {}", id),
            Self::InvalidTimestamp { var, value } => {
                write!(f, "{} is not an RFC 3339 timestamp: {}", var, value)
            }
            Self::InvertedWindow => write!(f, "LOTTERY_END must not be before LOTTERY_START"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// The lottery the server is seeded with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotterySeed {
    pub id: String,
    pub start: i64,
    pub end: i64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub frontend_dist: PathBuf,
    pub allowed_origins: Vec<String>,
    pub lottery: LotterySeed,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok(), Utc::now())
    }

    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, ConfigError> {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_addr.clone()))?;

        let frontend_dist = lookup("FRONTEND_DIST")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FRONTEND_DIST));

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let id = lookup("LOTTERY_ID").unwrap_or_else(|| CURRENT_LOTTERY_ID.to_string());
        if validate_lottery_id(&id).is_err() {
            return Err(ConfigError::InvalidLotteryId(id));
        }

        let start = match lookup("LOTTERY_START") {
            Some(value) => parse_timestamp("LOTTERY_START", value)?,
            None => now,
        };
        let end = match lookup("LOTTERY_END") {
            Some(value) => parse_timestamp("LOTTERY_END", value)?,
            None => start + Duration::days(DEFAULT_LOTTERY_DAYS),
        };
        if end < start {
            return Err(ConfigError::InvertedWindow);
        }

        Ok(Self {
            bind_addr,
            frontend_dist,
            allowed_origins,
            lottery: LotterySeed {
                id,
                start: start.timestamp_millis(),
                end: end.timestamp_millis(),
            },
        })
    }
}

fn parse_timestamp(var: &'static str, value: String) -> Result<DateTime<Utc>, ConfigError> {
    DateTime::parse_from_rfc3339(&value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| ConfigError::InvalidTimestamp { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let now = DateTime::parse_from_rfc3339("2021-03-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Config::from_lookup(|key| vars.get(key).cloned(), now)
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.lottery.id, CURRENT_LOTTERY_ID);
        assert_eq!(config.lottery.end - config.lottery.start, 7 * 24 * 3600 * 1000);
        assert_eq!(config.allowed_origins.len(), 2);
    }

    #[test]
    fn test_explicit_window() {
        let config = config(&[
            ("LOTTERY_ID", "fall2021"),
            ("LOTTERY_START", "2021-09-01T12:00:00Z"),
            ("LOTTERY_END", "2021-09-01T12:00:01Z"),
        ])
        .unwrap();
        assert_eq!(config.lottery.id, "fall2021");
        assert_eq!(config.lottery.end - config.lottery.start, 1000);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(config(&[("BIND_ADDR", "nope")]), Err(ConfigError::InvalidBindAddr(_))));
        assert!(matches!(config(&[("LOTTERY_ID", "Spring")]), Err(ConfigError::InvalidLotteryId(_))));
        assert!(matches!(
            config(&[("LOTTERY_START", "yesterday")]),
            Err(ConfigError::InvalidTimestamp { var: "LOTTERY_START", .. })
        ));
        assert!(matches!(
            config(&[
                ("LOTTERY_START", "2021-09-02T00:00:00Z"),
                ("LOTTERY_END", "2021-09-01T00:00:00Z"),
            ]),
            Err(ConfigError::InvertedWindow)
        ));
    }
}
