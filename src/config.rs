use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub cache: CacheSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub cors: CorsSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub redis_url: String,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_access_token_ttl_mins")]
    pub access_token_ttl_mins: i64,
    #[serde(default = "default_refresh_token_ttl_days")]
    pub refresh_token_ttl_days: i64,
}

fn default_access_token_ttl_mins() -> i64 { 60 }
fn default_refresh_token_ttl_days() -> i64 { 30 }

/// Shortest HS256 signing secret accepted at startup
pub const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:8000".to_string(),
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:8000".to_string(),
    ]
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_match_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_match_limit")]
    pub max_limit: u16,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_match_limit(),
            max_limit: default_max_match_limit(),
        }
    }
}

fn default_match_limit() -> u16 { 10 }
fn default_max_match_limit() -> u16 { 50 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_career_weight")]
    pub career: f64,
    #[serde(default = "default_concentration_weight")]
    pub concentration: f64,
    #[serde(default = "default_courses_weight")]
    pub courses: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            career: default_career_weight(),
            concentration: default_concentration_weight(),
            courses: default_courses_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            career: config.career,
            concentration: config.concentration,
            courses: config.courses,
        }
    }
}

fn default_career_weight() -> f64 { 40.0 }
fn default_concentration_weight() -> f64 { 30.0 }
fn default_courses_weight() -> f64 { 30.0 }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PATHMATCH__)
    /// 5. DATABASE_URL and JWT_SECRET_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PATHMATCH__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        settings = apply_env_overrides(settings)?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Self::read(path)?;
        settings.validate()?;
        Ok(settings)
    }

    fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Scoring weights configured for the matcher
    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring_weights()
            .validate()
            .map_err(|e| ConfigError::Message(format!("scoring.weights: {}", e)))?;

        if self.matching.max_limit == 0 {
            return Err(ConfigError::Message("matching.max_limit must be positive".to_string()));
        }
        if self.matching.default_limit > self.matching.max_limit {
            return Err(ConfigError::Message(format!(
                "matching.default_limit ({}) exceeds matching.max_limit ({})",
                self.matching.default_limit, self.matching.max_limit
            )));
        }
        if self.auth.jwt_secret.is_empty() {
            return Err(ConfigError::Message(
                "auth.jwt_secret is not set; provide JWT_SECRET_KEY".to_string(),
            ));
        }
        if self.auth.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::Message(format!(
                "auth.jwt_secret must be at least {} bytes",
                MIN_JWT_SECRET_LEN
            )));
        }

        Ok(())
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("PATHMATCH")
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("cors.allowed_origins")
        .try_parsing(true)
}

/// Apply the conventional unprefixed variables on top of the layered config
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(database_url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }
    if let Ok(secret) = env::var("JWT_SECRET_KEY") {
        builder = builder.set_override("auth.jwt_secret", secret)?;
    }
    if let Ok(redis_url) = env::var("REDIS_URL") {
        builder = builder.set_override("cache.redis_url", redis_url)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.career, 40.0);
        assert_eq!(weights.concentration, 30.0);
        assert_eq!(weights.courses, 30.0);
        assert_eq!(ScoringWeights::from(&weights), ScoringWeights::default());
    }

    #[test]
    fn test_default_matching_limits() {
        let matching = MatchingSettings::default();
        assert_eq!(matching.default_limit, 10);
        assert_eq!(matching.max_limit, 50);
    }

    const TEST_SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn default_file_with_secret() -> Settings {
        let mut settings = Settings::read("config/default.toml").unwrap();
        settings.auth.jwt_secret = TEST_SECRET.to_string();
        settings
    }

    #[test]
    fn test_load_from_file() {
        let settings = default_file_with_secret();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.scoring_weights(), ScoringWeights::default());
        assert_eq!(settings.auth.access_token_ttl_mins, 60);
        assert_eq!(settings.cors.allowed_origins.len(), 4);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let mut settings = default_file_with_secret();
        settings.scoring.weights.career = 90.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_default_file_ships_no_signing_secret() {
        let mut settings = Settings::read("config/default.toml").unwrap();
        // Only meaningful when the environment does not supply one
        if std::env::var("PATHMATCH__AUTH__JWT_SECRET").is_err() {
            assert!(settings.auth.jwt_secret.is_empty());
            let err = settings.validate().unwrap_err().to_string();
            assert!(err.contains("JWT_SECRET_KEY"));
        }

        settings.auth.jwt_secret = "jwt-secret-key-change-me".to_string();
        let err = settings.validate().unwrap_err().to_string();
        assert!(err.contains("at least 32 bytes"));
    }
}
