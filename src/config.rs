//! Runtime configuration
//!
//! Everything comes from environment variables, with sensible defaults for
//! local development

use std::env::var;

use anyhow::Context;
use anyhow::Result;

const DEFAULT_BASE_URL: &str = "http://localhost:7000";
const DEFAULT_TOKEN_EXPIRY: i64 = 3600;

/// Externally supplied configuration used by the domain logic
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL public short links are composed from
    pub base_url: String,

    /// Validity window of issued tokens, in seconds
    pub token_expiry: i64,
}

impl Config {
    /// Read the configuration from the environment
    ///
    /// - `BASE_URL`: prefix of public short links, default
    ///   `http://localhost:7000`
    /// - `TOKEN_EXPIRY`: token validity in seconds, default 3600
    ///
    /// # Errors
    ///
    /// Will return `Err` when `TOKEN_EXPIRY` is set but not a number
    pub fn from_env() -> Result<Self> {
        let base_url = env_var_or_else("BASE_URL", || String::from(DEFAULT_BASE_URL));
        let base_url = base_url.trim_end_matches('/').to_string();

        let token_expiry = env_var_or_else("TOKEN_EXPIRY", || DEFAULT_TOKEN_EXPIRY.to_string())
            .parse::<i64>()
            .context("`TOKEN_EXPIRY` is not a valid number of seconds")?;

        Ok(Self {
            base_url,
            token_expiry,
        })
    }
}

/// Get the value of an ENV var, or a default
///
/// Only when:
/// - It is set
/// - It is not empty
pub fn env_var_or_else(var_name: &'static str, or_else: fn() -> String) -> String {
    if let Ok(value) = var(var_name) {
        if !value.is_empty() {
            return value;
        }
    }

    or_else()
}
