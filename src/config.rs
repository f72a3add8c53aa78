use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Port the HTTP server listens on
    pub port: u16,
    /// Path to the SQLite database
    pub database_path: PathBuf,
    /// Lifetime of the session cookie handed out on registration
    pub cookie_max_age_days: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3333,
            database_path: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("daily-diet")
                .join("daily-diet.db"),
            cookie_max_age_days: 7,
        }
    }
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var("DAILY_DIET_CONFIG").ok().map(PathBuf::from))
            .unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            config = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;
        }

        // Apply environment variable overrides
        if let Some(port) = env_override("DAILY_DIET_PORT")? {
            config.port = port;
        }
        if let Ok(db_path) = std::env::var("DAILY_DIET_DATABASE_PATH") {
            config.database_path = PathBuf::from(db_path);
        }
        if let Some(days) = env_override("DAILY_DIET_COOKIE_MAX_AGE_DAYS")? {
            config.cookie_max_age_days = days;
        }

        if config.cookie_max_age_days.checked_mul(SECS_PER_DAY).is_none() {
            return Err(ConfigError::InvalidValue(
                "cookie_max_age_days",
                config.cookie_max_age_days.to_string(),
            ));
        }

        Ok(config)
    }

    /// Default config file path: <config dir>/daily-diet/config.yaml
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("daily-diet")
            .join("config.yaml")
    }

    /// Session cookie lifetime in seconds.
    pub fn cookie_max_age_secs(&self) -> u64 {
        self.cookie_max_age_days.saturating_mul(SECS_PER_DAY)
    }
}

/// Reads and parses an environment variable, `None` when unset.
fn env_override<T: FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(var, value)),
        Err(_) => Ok(None),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    e
                )
            }
            ConfigError::InvalidValue(var, value) => {
                write!(f, "Invalid value '{}' for {}", value, var)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
