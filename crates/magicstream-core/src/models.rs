// Copyright (c) 2026 Roman Barinov <rbarinov@gmail.com>
// Licensed under the FSL-1.1-NC.

use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_USER: &str = "USER";

pub mod ranking {
    pub const AVERAGE: &str = "average";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub genre_id: i64,
    pub genre_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    #[serde(default)]
    pub ranking_value: i64,
    #[serde(default)]
    pub ranking_name: String,
}

impl Default for Ranking {
    fn default() -> Self {
        Self {
            ranking_value: 5,
            ranking_name: ranking::AVERAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Movie {
    pub imdb_id: String,
    pub title: String,
    #[serde(default)]
    pub poster_path: String,
    #[serde(default)]
    pub youtube_id: String,
    #[serde(default)]
    pub genre: Vec<Genre>,
    #[serde(default)]
    pub admin_review: String,
    #[serde(default)]
    pub ranking: Ranking,
}

/// Locally remembered login. Its presence is the session marker; the
/// credential itself lives in the transport's cookie jar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub favorite_genres: Vec<Genre>,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub favorite_genres: Vec<Genre>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewUpdate {
    #[serde(default)]
    pub admin_review: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranking_name: Option<String>,
}
