//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Default per-call timeout for roster endpoints, in seconds
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the TeachPortal REST API
    pub api_url: String,

    /// Path of the file holding the persisted session token
    pub session_file: PathBuf,

    /// Per-call timeout for roster endpoints, in seconds
    pub request_timeout_secs: u64,

    /// Runtime configuration
    pub rust_log: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            api_url: env::var("PORTAL_API_URL")
                .map_err(|_| anyhow::anyhow!("PORTAL_API_URL is required"))?,

            session_file: env::var("PORTAL_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_session_file()),

            request_timeout_secs: env::var("PORTAL_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),

            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "teachportal=debug".to_string()),
        };

        Ok(config)
    }
}

/// Session file under the user state dir, falling back to the working directory
fn default_session_file() -> PathBuf {
    let base = env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".local/state")))
        .unwrap_or_else(|_| PathBuf::from("."));
    base.join("teachportal").join("session")
}
