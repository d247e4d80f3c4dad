//! Runtime configuration read from the environment.

use secrecy::SecretString;
use strum_macros::{Display, EnumString};
use thiserror::Error;
use tracing::warn;

use super::schedule_engine::ColorPolicy;

const DEV_JWT_SECRET: &str = "daybook-dev-secret";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// `None` means the default file under the asset directory.
    pub database_url: Option<String>,
    pub jwt_secret: SecretString,
    pub environment: Environment,
    pub color_policy: ColorPolicy,
    pub bcrypt_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            database_url: None,
            jwt_secret: SecretString::from(DEV_JWT_SECRET.to_string()),
            environment: Environment::Development,
            color_policy: ColorPolicy::FirstUnused,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key/value source, falling back to defaults
    /// for missing keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let environment = parse_or(&lookup, "DAYBOOK_ENV", defaults.environment)?;
        let port = parse_or(&lookup, "DAYBOOK_PORT", defaults.port)?;
        let color_policy = parse_or(&lookup, "SCHEDULE_COLOR_POLICY", defaults.color_policy)?;
        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", defaults.bcrypt_cost)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => SecretString::from(secret),
            None if environment == Environment::Production => {
                return Err(ConfigError::InvalidValue {
                    key: "JWT_SECRET",
                    value: String::new(),
                });
            }
            None => {
                warn!("JWT_SECRET not set - using the development secret");
                defaults.jwt_secret
            }
        };

        Ok(Self {
            host: lookup("DAYBOOK_HOST").unwrap_or(defaults.host),
            port,
            database_url: lookup("DATABASE_URL").filter(|s| !s.is_empty()),
            jwt_secret,
            environment,
            color_policy,
            bcrypt_cost,
        })
    }

    /// Session cookies carry the `Secure` attribute in production only.
    pub fn secure_cookies(&self) -> bool {
        self.environment == Environment::Production
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        _ => Ok(default),
    }
}
