use anyhow::{ensure, Context, Result};
use std::env;
use std::path::PathBuf;

use shared::config::PublicConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub recurrence_check_interval_seconds: u64,
    /// JSON file with the public config; `TIMEFUL_*` variables are used when unset
    pub public_config_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            recurrence_check_interval_seconds: parse_check_interval(
                &env::var("RECURRENCE_CHECK_INTERVAL_SECONDS")
                    .unwrap_or_else(|_| "3600".to_string()),
            )?,
            public_config_path: env::var("TIMEFUL_CONFIG_PATH").ok().map(PathBuf::from),
        })
    }

    pub fn load_public_config(&self) -> Result<PublicConfig> {
        match &self.public_config_path {
            Some(path) => PublicConfig::load(path)
                .with_context(|| format!("Failed to load public config from {}", path.display())),
            None => PublicConfig::from_env().context("Invalid TIMEFUL_* configuration"),
        }
    }
}

fn parse_check_interval(value: &str) -> Result<u64> {
    let seconds: u64 = value
        .trim()
        .parse()
        .context("RECURRENCE_CHECK_INTERVAL_SECONDS must be a valid number")?;
    ensure!(
        seconds > 0,
        "RECURRENCE_CHECK_INTERVAL_SECONDS must be greater than zero"
    );
    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_interval_parses() {
        assert_eq!(parse_check_interval("3600").unwrap(), 3600);
        assert_eq!(parse_check_interval(" 60 ").unwrap(), 60);
    }

    #[test]
    fn test_zero_check_interval_rejected() {
        let err = parse_check_interval("0").unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_non_numeric_check_interval_rejected() {
        let err = parse_check_interval("hourly").unwrap_err();
        assert!(err.to_string().contains("must be a valid number"));
    }
}
