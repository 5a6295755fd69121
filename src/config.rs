use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

// Where bookings, flights and users are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MySql,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(StoreBackend::MySql),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::Invalid {
                key: "STORE_BACKEND",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub expiration_hours: i64,
    pub password_cost: u32,
}

#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    pub fare_lock_fee: Decimal,
    pub disruption_assistance_fee: Decimal,
    // Simulated payment processing time
    pub payment_delay: Duration,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        CheckoutConfig {
            fare_lock_fee: Decimal::new(20, 0),
            disruption_assistance_fee: Decimal::new(53, 0),
            payment_delay: Duration::from_millis(1500),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub auth: AuthConfig,
    pub checkout: CheckoutConfig,
}

impl AppConfig {
    /// Reads the configuration from the process environment, after loading `.env` if present.
    ///
    /// `DATABASE_URL` is only required for the MySQL store.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let store = match env::var("STORE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StoreBackend::MySql,
        };

        let database_url = env::var("DATABASE_URL").ok();
        if store == StoreBackend::MySql && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        let defaults = CheckoutConfig::default();
        let payment_delay_ms: u64 = parse_or("PAYMENT_DELAY_MS", defaults.payment_delay.as_millis() as u64)?;

        Ok(AppConfig {
            store,
            database_url,
            max_connections: parse_or("DB_MAX_CONNECTIONS", 10)?,
            auth: AuthConfig {
                jwt_secret,
                expiration_hours: parse_or("JWT_EXPIRATION_HOURS", 24)?,
                password_cost: parse_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            },
            checkout: CheckoutConfig {
                fare_lock_fee: parse_or("FARE_LOCK_FEE", defaults.fare_lock_fee)?,
                disruption_assistance_fee: parse_or(
                    "DISRUPTION_ASSISTANCE_FEE",
                    defaults.disruption_assistance_fee,
                )?,
                payment_delay: Duration::from_millis(payment_delay_ms),
            },
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_backend_parses_case_insensitively() {
        assert_eq!("MySQL".parse::<StoreBackend>().unwrap(), StoreBackend::MySql);
        assert_eq!("memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("redis".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn checkout_defaults_match_published_fees() {
        let defaults = CheckoutConfig::default();
        assert_eq!(defaults.fare_lock_fee, Decimal::new(20, 0));
        assert_eq!(defaults.disruption_assistance_fee, Decimal::new(53, 0));
    }
}
