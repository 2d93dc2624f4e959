// config.rs
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::model::{ForestParams, IsolationParams};
use crate::pipeline::AnalysisSettings;

const PLACEHOLDER_KEY: &str = "YOUR_API_KEY_HERE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("RAPIDAPI_KEY not configured")]
    MissingApiKey,

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Process configuration, read once at startup and handed to the pieces that need it.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_host: String,
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub provider_timeout: Duration,
    pub model_seed: u64,
    pub n_estimators: usize,
    pub contamination: f64,
    pub min_listings: usize,
}

impl Config {
    /// Loads `.env` if present, then reads the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("RAPIDAPI_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty() && k != PLACEHOLDER_KEY)
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            api_key,
            api_host: env::var("RAPIDAPI_HOST")
                .unwrap_or_else(|_| "zillow-com1.p.rapidapi.com".to_string()),
            bind_addr: env_or("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)))?,
            max_workers: env_or("MAX_WORKERS", 8)?,
            provider_timeout: Duration::from_secs(env_or("PROVIDER_TIMEOUT_SECS", 20)?),
            model_seed: env_or("MODEL_SEED", 42)?,
            n_estimators: env_or("N_ESTIMATORS", 100)?,
            contamination: contamination(env_or("CONTAMINATION", 0.1)?)?,
            min_listings: env_or("MIN_LISTINGS", 10)?,
        })
    }

    pub fn analysis_settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            min_listings: self.min_listings,
            forest: ForestParams {
                n_trees: self.n_estimators,
                seed: self.model_seed,
                ..ForestParams::default()
            },
            isolation: IsolationParams {
                contamination: self.contamination,
                seed: self.model_seed,
                ..IsolationParams::default()
            },
        }
    }
}

fn env_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

/// Share of listings the isolation forest flags; must lie in (0, 0.5].
fn contamination(value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 && value <= 0.5 {
        Ok(value)
    } else {
        Err(ConfigError::Invalid {
            name: "CONTAMINATION",
            value: value.to_string(),
        })
    }
}

fn parse_value<T: FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: raw.to_string(),
    })
}
