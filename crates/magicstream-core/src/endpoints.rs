// Copyright (c) 2026 Roman Barinov <rbarinov@gmail.com>
// Licensed under the FSL-1.1-NC.

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

// Unprotected
pub const MOVIES: &str = "/movies";
pub const GENRES: &str = "/genres";
pub const REGISTER: &str = "/register";
pub const LOGIN: &str = "/login";
pub const LOGOUT: &str = "/logout";
pub const REFRESH: &str = "/refresh";

// Protected
pub const MOVIE: &str = "/movie";
pub const ADD_MOVIE: &str = "/addmovie";
pub const RECOMMENDED_MOVIES: &str = "/recommendedmovies";
pub const UPDATE_REVIEW: &str = "/updatereview";

/// Endpoints whose 401s mean "bad credentials", never "expired session".
pub const AUTH_ENDPOINTS: [&str; 3] = [LOGIN, REGISTER, REFRESH];

pub mod routes {
    pub const LOGIN: &str = "/login";
}

pub fn movie(imdb_id: &str) -> String {
    format!("{}/{}", MOVIE, imdb_id)
}

pub fn update_review(imdb_id: &str) -> String {
    format!("{}/{}", UPDATE_REVIEW, imdb_id)
}
