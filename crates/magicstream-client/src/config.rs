// Copyright (c) 2026 Roman Barinov <rbarinov@gmail.com>
// Licensed under the FSL-1.1-NC.

use crate::gateway::RefreshPolicy;
use magicstream_core::endpoints;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
    #[serde(default = "default_login_route")]
    pub login_route: String,
    #[serde(default = "default_excluded_paths")]
    pub excluded_paths: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

fn default_base_url() -> String {
    endpoints::DEFAULT_API_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_refresh_path() -> String {
    endpoints::REFRESH.to_string()
}

fn default_login_route() -> String {
    endpoints::routes::LOGIN.to_string()
}

fn default_excluded_paths() -> Vec<String> {
    endpoints::AUTH_ENDPOINTS
        .iter()
        .map(|path| path.to_string())
        .collect()
}

fn default_session_path() -> PathBuf {
    PathBuf::from("./magicstream-session.json")
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            refresh_path: default_refresh_path(),
            login_route: default_login_route(),
            excluded_paths: default_excluded_paths(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            auth: AuthConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let mut config = if let Some(path) = config_path {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("API_URL") {
            self.api.base_url = val;
        }
        if let Ok(val) = env::var("API_TIMEOUT") {
            if let Ok(timeout) = val.parse() {
                self.api.timeout = timeout;
            }
        }
        if let Ok(val) = env::var("AUTH_REFRESH_PATH") {
            self.auth.refresh_path = val;
        }
        if let Ok(val) = env::var("AUTH_LOGIN_ROUTE") {
            self.auth.login_route = val;
        }
        if let Ok(val) = env::var("SESSION_PATH") {
            self.session.path = PathBuf::from(val);
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.api.base_url.is_empty() {
            anyhow::bail!("API_URL is required");
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            anyhow::bail!("API_URL must start with http:// or https://");
        }
        if self.api.timeout == 0 {
            anyhow::bail!("API_TIMEOUT must be greater than zero");
        }
        if !self.auth.refresh_path.starts_with('/') {
            anyhow::bail!("AUTH_REFRESH_PATH must start with '/'");
        }
        Ok(())
    }

    pub fn refresh_policy(&self) -> RefreshPolicy {
        RefreshPolicy {
            refresh_path: self.auth.refresh_path.clone(),
            login_route: self.auth.login_route.clone(),
            auth_endpoints: self
                .auth
                .excluded_paths
                .iter()
                .cloned()
                .chain(std::iter::once(self.auth.refresh_path.clone()))
                .collect(),
        }
    }
}
