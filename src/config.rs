use std::{fmt::Display, str::FromStr, time::Duration};

use crate::{
    error::config::ConfigError,
    provider::aladhan::{AladhanConfig, DEFAULT_BASE_URL},
    service::prayer_time::ResolutionSettings,
};

pub struct Config {
    pub database_url: String,
    pub provider: AladhanConfig,
    pub resolution: ResolutionSettings,
    /// Optional JSON file with extra city and district coordinates
    pub locations_file: Option<String>,
    #[cfg(feature = "redis")]
    pub valkey_url: String,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns the value of a variable if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AladhanConfig::default();
        let resolution_defaults = ResolutionSettings::default();

        let provider = AladhanConfig {
            base_url: lookup("PROVIDER_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            method: parse_or(&lookup, "PROVIDER_METHOD", defaults.method)?,
            timeout: Duration::from_secs(parse_or(
                &lookup,
                "PROVIDER_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )?),
            asr_offset_minutes: parse_or(
                &lookup,
                "ASR_OFFSET_MINUTES",
                defaults.asr_offset_minutes,
            )?,
        };

        let resolution = ResolutionSettings {
            lock_ttl: Duration::from_secs(parse_or(
                &lookup,
                "LOCK_TTL_SECS",
                resolution_defaults.lock_ttl.as_secs(),
            )?),
            lock_wait_timeout: Duration::from_secs(parse_or(
                &lookup,
                "LOCK_WAIT_TIMEOUT_SECS",
                resolution_defaults.lock_wait_timeout.as_secs(),
            )?),
            timezone: lookup("TIMEZONE").unwrap_or(resolution_defaults.timezone),
        };

        if provider.timeout.is_zero() {
            return Err(ConfigError::InvalidEnvValue {
                var: "PROVIDER_TIMEOUT_SECS".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        // A fetch must finish before its lock can expire under it
        if provider.timeout >= resolution.lock_ttl {
            return Err(ConfigError::InvalidEnvValue {
                var: "PROVIDER_TIMEOUT_SECS".to_string(),
                reason: format!(
                    "must be shorter than LOCK_TTL_SECS ({}s)",
                    resolution.lock_ttl.as_secs()
                ),
            });
        }
        if resolution.lock_wait_timeout >= resolution.lock_ttl {
            return Err(ConfigError::InvalidEnvValue {
                var: "LOCK_WAIT_TIMEOUT_SECS".to_string(),
                reason: format!(
                    "must be shorter than LOCK_TTL_SECS ({}s)",
                    resolution.lock_ttl.as_secs()
                ),
            });
        }

        Ok(Self {
            database_url: required(&lookup, "DATABASE_URL")?,
            provider,
            resolution,
            locations_file: lookup("LOCATIONS_FILE").filter(|path| !path.trim().is_empty()),
            #[cfg(feature = "redis")]
            valkey_url: required(&lookup, "VALKEY_URL")?,
        })
    }
}

fn required<F>(lookup: &F, var: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

fn parse_or<F, T>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvValue {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        None => Ok(default),
    }
}
