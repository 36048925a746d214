use crate::domain::Decimal;
use crate::engine::{AnalyzerConfig, LedgerConfig};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub max_leverage: u32,
    pub fee_rate: Decimal,
    pub history_limit: usize,
    pub direction_window: usize,
    pub direction_threshold: Decimal,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Default for Config {
    fn default() -> Self {
        let ledger = LedgerConfig::default();
        let analyzer = AnalyzerConfig::default();
        Config {
            port: 8080,
            max_leverage: ledger.max_leverage,
            fee_rate: ledger.fee_rate,
            history_limit: ledger.history_limit,
            direction_window: analyzer.direction_window,
            direction_threshold: analyzer.direction_threshold,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let max_leverage = match env_map.get("MAX_LEVERAGE") {
            Some(raw) => raw.trim().parse::<u32>().ok().filter(|v| *v >= 1).ok_or_else(|| {
                ConfigError::InvalidValue(
                    "MAX_LEVERAGE".to_string(),
                    "must be an integer >= 1".to_string(),
                )
            })?,
            None => defaults.max_leverage,
        };

        let fee_rate = match env_map.get("FEE_RATE") {
            Some(raw) => parse_decimal("FEE_RATE", raw)
                .and_then(|v| {
                    if v.is_negative() || v >= Decimal::one() {
                        Err(ConfigError::InvalidValue(
                            "FEE_RATE".to_string(),
                            format!("must be in [0, 1), got {}", v),
                        ))
                    } else {
                        Ok(v)
                    }
                })?,
            None => defaults.fee_rate,
        };

        let history_limit = parse_min_usize(&env_map, "HISTORY_LIMIT", 1)?
            .unwrap_or(defaults.history_limit);

        let direction_window = parse_min_usize(&env_map, "DIRECTION_WINDOW", 2)?
            .unwrap_or(defaults.direction_window);

        let direction_threshold = match env_map.get("DIRECTION_THRESHOLD") {
            Some(raw) => {
                let v = parse_decimal("DIRECTION_THRESHOLD", raw)?;
                if v.is_negative() {
                    return Err(ConfigError::InvalidValue(
                        "DIRECTION_THRESHOLD".to_string(),
                        format!("must be >= 0, got {}", v),
                    ));
                }
                v
            }
            None => defaults.direction_threshold,
        };

        Ok(Config {
            port,
            max_leverage,
            fee_rate,
            history_limit,
            direction_window,
            direction_threshold,
        })
    }

    pub fn ledger(&self) -> LedgerConfig {
        LedgerConfig {
            max_leverage: self.max_leverage,
            fee_rate: self.fee_rate,
            history_limit: self.history_limit,
        }
    }

    pub fn analyzer(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            direction_window: self.direction_window,
            direction_threshold: self.direction_threshold,
        }
    }
}

fn parse_decimal(key: &str, raw: &str) -> Result<Decimal, ConfigError> {
    Decimal::from_str_canonical(raw.trim()).map_err(|_| {
        ConfigError::InvalidValue(key.to_string(), "must be a decimal number".to_string())
    })
}

fn parse_min_usize(
    env_map: &HashMap<String, String>,
    key: &str,
    min: usize,
) -> Result<Option<usize>, ConfigError> {
    let Some(raw) = env_map.get(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|v| *v >= min)
        .map(Some)
        .ok_or_else(|| {
            ConfigError::InvalidValue(key.to_string(), format!("must be an integer >= {}", min))
        })
}
