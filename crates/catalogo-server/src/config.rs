// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use std::env;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3333;

#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    /// Upper bound on any request body; sized for image uploads, JSON
    /// bodies are orders of magnitude below it.
    pub max_body_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Connection settings for the hosted store, read once at startup.
/// Missing credentials are a fatal startup condition.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub service_key: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingEnv(pub &'static str);

impl Display for MissingEnv {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "missing environment variable: {} (set SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY)",
            self.0
        )
    }
}

impl std::error::Error for MissingEnv {}

fn required_env(name: &'static str) -> Result<String, MissingEnv> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(MissingEnv(name))
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, MissingEnv> {
        Ok(Self {
            base_url: required_env("SUPABASE_URL")?,
            service_key: required_env("SUPABASE_SERVICE_ROLE_KEY")?,
            timeout: Duration::from_secs(15),
        })
    }
}

#[must_use]
pub fn bind_addr_from_env() -> SocketAddr {
    let port = env::var("PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    SocketAddr::from(([0, 0, 0, 0], port))
}
