// Copyright (c) 2026 Roman Barinov <rbarinov@gmail.com>
// Licensed under the FSL-1.1-NC.

use crate::config::Config;
use crate::gateway::Gateway;
use crate::navigator::Navigator;
use crate::services::{AuthService, MovieService};
use crate::session::{FileSessionStore, SessionStore};
use crate::transport::{HttpTransport, Transport};
use magicstream_core::Result;
use std::sync::Arc;
use std::time::Duration;

/// One gateway per application lifetime, shared by every service.
pub struct MagicStreamClient {
    gateway: Arc<Gateway>,
    movies: MovieService,
    auth: AuthService,
}

impl MagicStreamClient {
    pub fn new(config: &Config, navigator: Arc<dyn Navigator>) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(
            config.api.base_url.clone(),
            Duration::from_secs(config.api.timeout),
        )?);
        let sessions = Arc::new(FileSessionStore::new(config.session.path.clone()));

        Ok(Self::with_parts(config, transport, sessions, navigator))
    }

    pub fn with_parts(
        config: &Config,
        transport: Arc<dyn Transport>,
        sessions: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let gateway = Arc::new(
            Gateway::new(transport, sessions, navigator).with_policy(config.refresh_policy()),
        );

        Self {
            movies: MovieService::new(gateway.clone()),
            auth: AuthService::new(gateway.clone()),
            gateway,
        }
    }

    pub fn gateway(&self) -> &Arc<Gateway> {
        &self.gateway
    }

    pub fn movies(&self) -> &MovieService {
        &self.movies
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }
}
