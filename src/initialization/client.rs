//! HTTP client initialization.
//!
//! This module provides functions to initialize the HTTP clients used for
//! comparison fetches and cache warmup.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, MAX_REDIRECT_HOPS, WARMUP_TIMEOUT_SECS};

/// Initializes the HTTP client used for comparison fetches.
///
/// Creates a `reqwest::Client` with redirects disabled so the redirect chain
/// can be followed manually. This lets the fetcher record the first hop's
/// status and the final resolved path instead of only seeing the terminal
/// response.
///
/// # Arguments
///
/// * `config` - Configuration containing user-agent and timeout settings
///
/// # Returns
///
/// A configured HTTP client with redirects disabled.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_compare_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

/// Initializes the HTTP client used for the cache warmup pass.
///
/// Warmup only needs reachability, so this client follows redirects on its
/// own (bounded to the same hop limit as the fetcher) and uses the longer
/// warmup timeout.
///
/// # Arguments
///
/// * `config` - Configuration containing the user-agent setting
///
/// # Returns
///
/// A configured HTTP client with redirect following enabled.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_warmup_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
        .timeout(Duration::from_secs(WARMUP_TIMEOUT_SECS))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
