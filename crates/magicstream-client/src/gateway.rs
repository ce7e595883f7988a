// Copyright (c) 2026 Roman Barinov <rbarinov@gmail.com>
// Licensed under the FSL-1.1-NC.

//! Request gateway: every API call goes through [`Gateway::dispatch`], which
//! applies two policies uniformly.
//!
//! * Deduplication: a new call identical to one still in flight (same method,
//!   URL, params and body) cancels the older one. The older caller gets
//!   [`Error::Canceled`].
//! * Session refresh: a 401 on a non-auth endpoint, while a user is marked as
//!   logged in, triggers one refresh call followed by one replay of the
//!   original request. If the refresh fails the session marker is cleared and
//!   the user is sent to the login route.

use crate::navigator::Navigator;
use crate::pending::{PendingRequests, SettleGuard};
use crate::session::SessionStore;
use crate::transport::Transport;
use magicstream_core::{codec, endpoints, Error, RequestConfig, Result};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RefreshPolicy {
    pub refresh_path: String,
    pub login_route: String,
    /// Matched against the request path exactly, ignoring a leading `/`.
    /// The refresh path always counts as one of them.
    pub auth_endpoints: HashSet<String>,
}

impl RefreshPolicy {
    pub fn is_auth_endpoint(&self, path: &str) -> bool {
        let path = normalize_path(path);
        path == normalize_path(&self.refresh_path)
            || self
                .auth_endpoints
                .iter()
                .any(|endpoint| normalize_path(endpoint) == path)
    }
}

// Relative URLs resolve against the base URL, so `login` and `/login` are
// the same endpoint.
fn normalize_path(path: &str) -> &str {
    path.trim_start_matches('/')
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            refresh_path: endpoints::REFRESH.to_string(),
            login_route: endpoints::routes::LOGIN.to_string(),
            auth_endpoints: endpoints::AUTH_ENDPOINTS
                .iter()
                .map(|path| path.to_string())
                .collect(),
        }
    }
}

/// One outbound call. A replay is a fresh attempt with `retried` set.
#[derive(Debug, Clone)]
pub struct RequestAttempt {
    id: Uuid,
    config: RequestConfig,
    retried: bool,
}

impl RequestAttempt {
    pub fn new(config: RequestConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            retried: false,
        }
    }

    pub fn replay(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            config: self.config.clone(),
            retried: true,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    pub fn retried(&self) -> bool {
        self.retried
    }
}

pub struct Gateway {
    transport: Arc<dyn Transport>,
    sessions: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    pending: PendingRequests,
    policy: RefreshPolicy,
}

impl Gateway {
    pub fn new(
        transport: Arc<dyn Transport>,
        sessions: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            transport,
            sessions,
            navigator,
            pending: PendingRequests::new(),
            policy: RefreshPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RefreshPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &RefreshPolicy {
        &self.policy
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub async fn dispatch(&self, config: RequestConfig) -> Result<serde_json::Value> {
        let attempt = RequestAttempt::new(config);

        match self.execute(&attempt).await {
            Err(err) if err.is_unauthorized() && self.should_refresh(&attempt) => {
                let replay = attempt.replay();
                self.refresh_session().await?;
                debug!(
                    "Replaying {} {} after refresh",
                    replay.config().method,
                    replay.config().url
                );
                self.execute(&replay).await
            }
            result => result,
        }
    }

    pub async fn dispatch_json<T: DeserializeOwned>(&self, config: RequestConfig) -> Result<T> {
        let data = self.dispatch(config).await?;
        Ok(serde_json::from_value(data)?)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.count()
    }

    pub fn is_pending(&self, config: &RequestConfig) -> bool {
        self.pending.contains(&codec::request_key(config))
    }

    async fn execute(&self, attempt: &RequestAttempt) -> Result<serde_json::Value> {
        let key = codec::request_key(attempt.config());
        let mut cancel = self.pending.register(key.clone(), attempt.id());
        let _settle = SettleGuard {
            pending: &self.pending,
            key,
            attempt_id: attempt.id(),
        };

        let response = tokio::select! {
            result = self.transport.send(attempt.config()) => result,
            Ok(()) = &mut cancel => {
                debug!(
                    "Request {} {} superseded by a newer identical call",
                    attempt.config().method,
                    attempt.config().url
                );
                Err(Error::Canceled)
            }
        };

        response?.into_result()
    }

    fn should_refresh(&self, attempt: &RequestAttempt) -> bool {
        if attempt.retried() {
            debug!("Not refreshing: {} already retried", attempt.config().url);
            return false;
        }
        if self.policy.is_auth_endpoint(attempt.config().path()) {
            debug!("Not refreshing: {} is an auth endpoint", attempt.config().path());
            return false;
        }
        if !self.sessions.is_logged_in() {
            debug!("Not refreshing: no session marker");
            return false;
        }
        true
    }

    /// Calls the refresh endpoint directly on the transport, outside of
    /// deduplication and the retry policy.
    async fn refresh_session(&self) -> Result<()> {
        info!("Session expired, refreshing");
        let request = RequestConfig::post(self.policy.refresh_path.as_str());
        let result = match self.transport.send(&request).await {
            Ok(response) => response.into_result().map(|_| ()),
            Err(e) => Err(e),
        };

        result.map_err(|e| {
            warn!("Session refresh failed: {}", e);
            self.sessions.clear();
            self.navigator.redirect_to(&self.policy.login_route);
            Error::RefreshFailed(Box::new(e))
        })
    }
}
