use std::env;
use std::path::PathBuf;

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    Local,
    ObjectStore,
}

/// Default exclusion list: short all-caps tokens that collide with real
/// tickers (pronouns, finance abbreviations, forum slang).
pub const DEFAULT_EXCLUDED_WORDS: &[&str] = &[
    "THE", "AND", "FOR", "ARE", "BUT", "NOT", "YOU", "ALL", "CAN", "HER", "WAS", "ONE", "OUR",
    "HAD", "WHAT", "YOUR", "WHEN", "HIM", "MY", "HAS", "IT", "I", "A", "TO", "OF", "IN", "IS",
    "ON", "AT", "BE", "OR", "AS", "FROM", "UP", "BY", "IF", "DO", "NO", "SO", "WE", "GO", "ME",
    "AM", "US", "AN", "HE", "SHE", "WHO", "OIL", "GAS", "CAR", "CEO", "CFO", "CTO", "IPO", "SEC",
    "FDA", "FED", "GDP", "CPI", "ATH", "ATL", "DD", "TA", "PE", "EPS", "ROI", "YOY", "QOQ", "MOM",
    "EOD", "AH", "PM", "WSB", "YOLO", "FD", "HODL", "MOON", "STONK", "STONKS", "TENDIES",
    "DIAMOND", "HANDS", "PAPER", "ROCKET", "BULL", "BEAR", "APES", "APE", "RETARD", "AUTIST",
    "WIFE", "BOYFRIEND", "LOSS", "GAIN", "PORN", "BUY", "SELL", "HOLD", "LONG", "SHORT", "CALL",
    "PUT", "PUTS", "CALLS", "OPTION", "OPTIONS", "STRIKE", "EXPIRY", "DTE", "IV", "THETA",
    "DELTA", "GAMMA", "VEGA", "RHO",
];

/// Crawl-side configuration, loaded once and passed into components by value.
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    pub feed: String,
    pub post_limit: usize,
    pub comment_limit: usize,
    pub min_symbol_length: usize,
    pub max_symbol_length: usize,
    pub excluded_words: Vec<String>,
    pub symbol_file: PathBuf,
    pub logs_dir: PathBuf,
}

/// Storage-side configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: BackendType,
    pub local_root: PathBuf,
    pub bucket: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingVariable(String),
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVariable(var) => write!(f, "Missing environment variable: {}", var),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            feed: "wallstreetbets".to_string(),
            post_limit: 100,
            comment_limit: 50,
            min_symbol_length: 1,
            max_symbol_length: 5,
            excluded_words: DEFAULT_EXCLUDED_WORDS.iter().map(|w| w.to_string()).collect(),
            symbol_file: PathBuf::from("data/stock_symbols.csv"),
            logs_dir: PathBuf::from("logs"),
        }
    }
}

impl CrawlerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let feed = env::var("FEED").unwrap_or(defaults.feed);

        let post_limit = env::var("POST_LIMIT")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(defaults.post_limit);

        let comment_limit = env::var("COMMENT_LIMIT")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(defaults.comment_limit);

        let min_symbol_length = env::var("MIN_SYMBOL_LENGTH")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(defaults.min_symbol_length);

        let max_symbol_length = env::var("MAX_SYMBOL_LENGTH")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(defaults.max_symbol_length);

        let excluded_words = match env::var("EXCLUDED_WORDS") {
            Ok(s) => s
                .split(',')
                .map(|w| w.trim().to_uppercase())
                .filter(|w| !w.is_empty())
                .collect(),
            Err(_) => defaults.excluded_words,
        };

        let symbol_file = env::var("SYMBOL_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.symbol_file);

        let logs_dir = env::var("LOGS_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.logs_dir);

        let config = Self {
            feed,
            post_limit,
            comment_limit,
            min_symbol_length,
            max_symbol_length,
            excluded_words,
            symbol_file,
            logs_dir,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed.is_empty() {
            return Err(ConfigError::InvalidValue("feed name cannot be empty".to_string()));
        }

        if self.min_symbol_length == 0 {
            return Err(ConfigError::InvalidValue(
                "min_symbol_length must be at least 1".to_string(),
            ));
        }

        if self.min_symbol_length > self.max_symbol_length {
            return Err(ConfigError::InvalidValue(format!(
                "min_symbol_length ({}) exceeds max_symbol_length ({})",
                self.min_symbol_length, self.max_symbol_length
            )));
        }

        Ok(())
    }
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend_str = env::var("STORAGE_BACKEND").unwrap_or_else(|_| "local".to_string());
        let backend = match backend_str.to_lowercase().as_str() {
            "local" => BackendType::Local,
            "object-store" | "s3" => BackendType::ObjectStore,
            other => {
                return Err(ConfigError::InvalidValue(format!(
                    "unknown STORAGE_BACKEND '{}' (expected 'local' or 'object-store')",
                    other
                )))
            }
        };

        let local_root = env::var("STORAGE_ROOT")
            .unwrap_or_else(|_| "data".to_string())
            .into();

        let bucket = env::var("STORAGE_BUCKET").ok();

        if backend == BackendType::ObjectStore && bucket.is_none() {
            return Err(ConfigError::MissingVariable("STORAGE_BUCKET".to_string()));
        }

        Ok(Self {
            backend,
            local_root,
            bucket,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CrawlerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.post_limit, 100);
        assert_eq!(config.comment_limit, 50);
        assert_eq!(config.min_symbol_length, 1);
        assert_eq!(config.max_symbol_length, 5);
    }

    #[test]
    fn test_excluded_defaults_cover_common_collisions() {
        let config = CrawlerConfig::default();
        for word in ["THE", "CEO", "YOLO", "CALLS"] {
            assert!(config.excluded_words.iter().any(|w| w == word), "missing {}", word);
        }
    }

    #[test]
    fn test_validate_rejects_zero_min_length() {
        let config = CrawlerConfig {
            min_symbol_length: 0,
            ..CrawlerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let config = CrawlerConfig {
            min_symbol_length: 4,
            max_symbol_length: 2,
            ..CrawlerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
