// Copyright (c) 2026 Roman Barinov <rbarinov@gmail.com>
// Licensed under the FSL-1.1-NC.

use crate::gateway::Gateway;
use magicstream_core::{
    endpoints, Genre, LoginRequest, Movie, RegisterRequest, RequestConfig, Result, ReviewUpdate,
    SessionUser,
};
use serde_json::json;
use std::sync::Arc;

#[derive(Clone)]
pub struct MovieService {
    gateway: Arc<Gateway>,
}

impl MovieService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn all_movies(&self) -> Result<Vec<Movie>> {
        self.gateway
            .dispatch_json(RequestConfig::get(endpoints::MOVIES))
            .await
    }

    pub async fn genres(&self) -> Result<Vec<Genre>> {
        self.gateway
            .dispatch_json(RequestConfig::get(endpoints::GENRES))
            .await
    }

    pub async fn movie(&self, imdb_id: &str) -> Result<Movie> {
        self.gateway
            .dispatch_json(RequestConfig::get(endpoints::movie(imdb_id)))
            .await
    }

    pub async fn recommended_movies(&self) -> Result<Vec<Movie>> {
        self.gateway
            .dispatch_json(RequestConfig::get(endpoints::RECOMMENDED_MOVIES))
            .await
    }

    pub async fn add_movie(&self, movie: &Movie) -> Result<serde_json::Value> {
        let request = RequestConfig::post(endpoints::ADD_MOVIE).json(movie)?;
        self.gateway.dispatch(request).await
    }

    pub async fn update_review(&self, imdb_id: &str, admin_review: &str) -> Result<ReviewUpdate> {
        let request = RequestConfig::patch(endpoints::update_review(imdb_id))
            .json(&json!({ "admin_review": admin_review }))?;
        self.gateway.dispatch_json(request).await
    }
}

/// Login state on top of the gateway. Login writes the session marker and
/// logout always removes it.
#[derive(Clone)]
pub struct AuthService {
    gateway: Arc<Gateway>,
}

impl AuthService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn register(&self, user: &RegisterRequest) -> Result<serde_json::Value> {
        let request = RequestConfig::post(endpoints::REGISTER).json(user)?;
        self.gateway.dispatch(request).await
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Result<SessionUser> {
        let request = RequestConfig::post(endpoints::LOGIN).json(credentials)?;
        let user: SessionUser = self.gateway.dispatch_json(request).await?;
        self.gateway.sessions().save(&user)?;
        tracing::info!("Logged in as {}", user.email);
        Ok(user)
    }

    /// Server-side logout is best effort; local state is always cleared.
    pub async fn logout(&self) {
        if let Some(user) = self.gateway.sessions().current() {
            let mut request = RequestConfig::post(endpoints::LOGOUT);
            request.body = Some(json!({ "user_id": user.user_id }));
            if let Err(e) = self.gateway.dispatch(request).await {
                if !e.is_canceled() {
                    tracing::error!("Logout error: {}", e);
                }
            }
        }
        self.gateway.sessions().clear();
        self.gateway
            .navigator()
            .redirect_to(&self.gateway.policy().login_route);
    }

    pub async fn refresh_token(&self) -> Result<serde_json::Value> {
        self.gateway
            .dispatch(RequestConfig::post(
                self.gateway.policy().refresh_path.as_str(),
            ))
            .await
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.gateway.sessions().current()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user().map(|u| u.is_admin()).unwrap_or(false)
    }
}
