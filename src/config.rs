use std::collections::HashMap;
use thiserror::Error;

/// Tunables for the catalog core, loaded from the environment.
///
/// Every key has a default so an empty environment yields a working
/// configuration; invalid values are rejected rather than silently
/// falling back.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Stock at or below this count flags a product as low (default 2).
    pub low_stock_threshold: u32,
    /// Quiet period before a search query is applied, in milliseconds.
    pub search_debounce_ms: u64,
    /// How long a guarded collection fetch may run before degrading to
    /// the fallback value, in milliseconds.
    pub fetch_timeout_ms: u64,
    /// Maximum accepted length for a product or asset name, in characters.
    pub name_max_len: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            low_stock_threshold: 2,
            search_debounce_ms: 300,
            fetch_timeout_ms: 5_000,
            name_max_len: 120,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        let low_stock_threshold = match env_map.get("LOW_STOCK_THRESHOLD") {
            Some(s) => s.parse::<u32>().map_err(|_| {
                ConfigError::InvalidValue(
                    "LOW_STOCK_THRESHOLD".to_string(),
                    "must be a valid u32".to_string(),
                )
            })?,
            None => defaults.low_stock_threshold,
        };

        let search_debounce_ms = match env_map.get("SEARCH_DEBOUNCE_MS") {
            Some(s) => s.parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue(
                    "SEARCH_DEBOUNCE_MS".to_string(),
                    "must be a valid u64".to_string(),
                )
            })?,
            None => defaults.search_debounce_ms,
        };

        let fetch_timeout_ms = match env_map.get("FETCH_TIMEOUT_MS") {
            Some(s) => s.parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue(
                    "FETCH_TIMEOUT_MS".to_string(),
                    "must be a valid u64".to_string(),
                )
            })?,
            None => defaults.fetch_timeout_ms,
        };

        let name_max_len = match env_map.get("NAME_MAX_LEN") {
            Some(s) => s.parse::<usize>().map_err(|_| {
                ConfigError::InvalidValue(
                    "NAME_MAX_LEN".to_string(),
                    "must be a valid usize".to_string(),
                )
            })?,
            None => defaults.name_max_len,
        };

        Ok(Settings {
            low_stock_threshold,
            search_debounce_ms,
            fetch_timeout_ms,
            name_max_len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_env_uses_defaults() {
        let settings = Settings::from_env_map(HashMap::new()).unwrap();
        assert_eq!(settings.low_stock_threshold, 2);
        assert_eq!(settings.search_debounce_ms, 300);
        assert_eq!(settings.fetch_timeout_ms, 5_000);
        assert_eq!(settings.name_max_len, 120);
    }

    #[test]
    fn test_overrides_applied() {
        let mut env_map = HashMap::new();
        env_map.insert("LOW_STOCK_THRESHOLD".to_string(), "5".to_string());
        env_map.insert("SEARCH_DEBOUNCE_MS".to_string(), "150".to_string());
        let settings = Settings::from_env_map(env_map).unwrap();
        assert_eq!(settings.low_stock_threshold, 5);
        assert_eq!(settings.search_debounce_ms, 150);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let mut env_map = HashMap::new();
        env_map.insert("LOW_STOCK_THRESHOLD".to_string(), "lots".to_string());
        let result = Settings::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "LOW_STOCK_THRESHOLD"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let mut env_map = HashMap::new();
        env_map.insert("FETCH_TIMEOUT_MS".to_string(), "-1".to_string());
        let result = Settings::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "FETCH_TIMEOUT_MS"),
            _ => panic!("Expected InvalidValue error"),
        }
    }
}
