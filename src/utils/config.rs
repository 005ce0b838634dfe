use std::env;
use std::str::FromStr;

pub const DEFAULT_DEMO_PASSWORD: &str = "demo1234";

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub environment: String,
    pub discount_percent: Option<f64>,
    pub demo_username: String,
    pub demo_password: String,
    pub login_latency_ms: u64,
    pub bcrypt_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            environment: "development".to_string(),
            discount_percent: None,
            demo_username: "demo".to_string(),
            demo_password: DEFAULT_DEMO_PASSWORD.to_string(),
            login_latency_ms: 0,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let config = Config {
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            environment: lookup("APP_ENV").unwrap_or(defaults.environment),
            discount_percent: parse_optional(&lookup, "DISCOUNT_PERCENT")?,
            demo_username: lookup("DEMO_USERNAME").unwrap_or(defaults.demo_username),
            demo_password: lookup("DEMO_PASSWORD").unwrap_or(defaults.demo_password),
            login_latency_ms: parse_optional(&lookup, "LOGIN_LATENCY_MS")?
                .unwrap_or(defaults.login_latency_ms),
            bcrypt_cost: parse_optional(&lookup, "BCRYPT_COST")?.unwrap_or(defaults.bcrypt_cost),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if let Some(percent) = self.discount_percent {
            validate_discount_percent(percent)
                .map_err(|e| anyhow::anyhow!("DISCOUNT_PERCENT {}", e))?;
        }

        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(anyhow::anyhow!(
                "BCRYPT_COST must be between 4 and 31, got {}",
                self.bcrypt_cost
            ));
        }

        if self.is_production() && self.demo_password == DEFAULT_DEMO_PASSWORD {
            return Err(anyhow::anyhow!("DEMO_PASSWORD is not set in production"));
        }

        Ok(())
    }

    /// Filter directive for the log subscriber; `--verbose` forces `debug`.
    pub fn log_filter(&self, verbose: bool) -> &str {
        if verbose {
            "debug"
        } else {
            &self.log_level
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Discounts accepted from configuration or the command line. The policy
/// itself applies whatever percentage it is given.
pub fn validate_discount_percent(percent: f64) -> anyhow::Result<()> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(anyhow::anyhow!("must be between 0 and 100, got {}", percent));
    }
    Ok(())
}

fn parse_optional<T, F>(lookup: &F, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{} has an invalid value '{}': {}", key, raw, e)),
        None => Ok(None),
    }
}
