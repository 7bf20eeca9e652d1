use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{info, warn};

use crate::compare::CompareMode;

const DEFAULT_BACKEND_URL: &str = "http://localhost:54321/rest/v1";

/// Runtime configuration, read from the environment with logged defaults
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the hosted property API
    pub backend_url: String,
    /// Bearer key for the hosted API, when it requires one
    pub api_key: Option<String>,
    pub page_size: u32,
    pub compare_cap: usize,
    pub compare_mode: CompareMode,
    /// File the compare selection is mirrored to, when set
    pub compare_file: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            backend_url: load_or("ESTATE_BACKEND_URL", DEFAULT_BACKEND_URL.to_string()),
            api_key: env::var("ESTATE_API_KEY").ok(),
            page_size: load_or("ESTATE_PAGE_SIZE", 12),
            compare_cap: load_or("ESTATE_COMPARE_CAP", 2),
            compare_mode: CompareMode::parse(&load_or(
                "ESTATE_COMPARE_MODE",
                "exactly_two".to_string(),
            )),
            compare_file: match env::var("ESTATE_COMPARE_FILE") {
                // an explicitly empty value disables persistence
                Ok(path) if path.trim().is_empty() => None,
                Ok(path) => Some(PathBuf::from(path)),
                Err(_) => Some(PathBuf::from("compare_set.json")),
            },
        }
    }
}

fn load_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(e) => {
                warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
                default
            }
        },
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_or_falls_back_on_missing_or_invalid_values() {
        env::remove_var("ESTATE_TEST_MISSING");
        assert_eq!(load_or::<u32>("ESTATE_TEST_MISSING", 7), 7);

        env::set_var("ESTATE_TEST_INVALID", "twelve");
        assert_eq!(load_or::<u32>("ESTATE_TEST_INVALID", 7), 7);
        env::remove_var("ESTATE_TEST_INVALID");

        env::set_var("ESTATE_TEST_VALID", "31");
        assert_eq!(load_or::<u32>("ESTATE_TEST_VALID", 7), 31);
        env::remove_var("ESTATE_TEST_VALID");
    }
}
