// Copyright (c) 2026 Roman Barinov <rbarinov@gmail.com>
// Licensed under the FSL-1.1-NC.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{AppendHeaders, IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use magicstream_client::config::Config;
use magicstream_client::navigator::Navigator;
use magicstream_client::session::SessionStore;
use magicstream_client::transport::HttpTransport;
use magicstream_client::MagicStreamClient;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const PASSWORD: &str = "correct-horse";

/// Server-side view of the mock backend, shared with the test body.
pub struct BackendState {
    access_token: Mutex<String>,
    refresh_allowed: AtomicBool,
    movies_delay_ms: AtomicU64,
    pub movies_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub protected_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
    reviews: Mutex<Vec<(String, String)>>,
    added: Mutex<Vec<Value>>,
}

impl BackendState {
    fn new() -> Self {
        Self {
            access_token: Mutex::new(new_token()),
            refresh_allowed: AtomicBool::new(true),
            movies_delay_ms: AtomicU64::new(0),
            movies_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            protected_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            reviews: Mutex::new(Vec::new()),
            added: Mutex::new(Vec::new()),
        }
    }

    fn is_authorized(&self, headers: &HeaderMap) -> bool {
        cookie(headers, "access_token").as_deref() == Some(self.access_token.lock().as_str())
    }
}

pub struct TestBackend {
    pub base_url: String,
    pub state: Arc<BackendState>,
    _handle: JoinHandle<()>,
}

impl TestBackend {
    pub async fn start() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();

        let state = Arc::new(BackendState::new());
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let port = listener.local_addr().unwrap().port();

        let app = router(state.clone());
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://localhost:{}", port),
            state,
            _handle: handle,
        }
    }

    /// Invalidates every issued access token, as if it expired.
    pub fn expire_access_token(&self) {
        *self.state.access_token.lock() = new_token();
    }

    pub fn set_refresh_allowed(&self, allowed: bool) {
        self.state.refresh_allowed.store(allowed, Ordering::SeqCst);
    }

    pub fn set_movies_delay(&self, delay: Duration) {
        self.state
            .movies_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn refresh_calls(&self) -> usize {
        self.state.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn reviews(&self) -> Vec<(String, String)> {
        self.state.reviews.lock().clone()
    }

    pub fn added_movies(&self) -> Vec<Value> {
        self.state.added.lock().clone()
    }

    pub fn client(
        &self,
        sessions: Arc<dyn SessionStore>,
        navigator: Arc<RecordingNavigator>,
    ) -> MagicStreamClient {
        let mut config = Config::default();
        config.api.base_url = self.base_url.clone();
        let transport = Arc::new(
            HttpTransport::new(self.base_url.clone(), Duration::from_secs(5)).unwrap(),
        );
        MagicStreamClient::with_parts(&config, transport, sessions, navigator)
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_to(&self, path: &str) {
        self.visits.lock().push(path.to_string());
    }
}

fn new_token() -> String {
    format!("tok-{}", rand::random::<u64>())
}

fn cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

fn session_cookies(access_token: &str) -> AppendHeaders<[(header::HeaderName, String); 2]> {
    AppendHeaders([
        (
            header::SET_COOKIE,
            format!("access_token={}; Path=/; HttpOnly", access_token),
        ),
        (
            header::SET_COOKIE,
            "refresh_token=r-1; Path=/; HttpOnly".to_string(),
        ),
    ])
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Unauthorized" })),
    )
        .into_response()
}

fn catalog() -> Value {
    json!([
        {
            "imdb_id": "tt001",
            "title": "The Matrix",
            "poster_path": "https://example.com/matrix.jpg",
            "youtube_id": "vKQi3bBA1y8",
            "genre": [{ "genre_id": 1, "genre_name": "Sci-Fi" }],
            "admin_review": "Still holds up.",
            "ranking": { "ranking_value": 1, "ranking_name": "excellent" }
        },
        {
            "imdb_id": "tt002",
            "title": "Heat",
            "genre": [{ "genre_id": 2, "genre_name": "Crime" }],
            "ranking": { "ranking_value": 2, "ranking_name": "good" }
        }
    ])
}

fn router(state: Arc<BackendState>) -> Router {
    Router::new()
        .route("/movies", get(movies))
        .route("/genres", get(genres))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/refresh", post(refresh))
        .route("/movie/:imdb_id", get(movie))
        .route("/recommendedmovies", get(recommended))
        .route("/addmovie", post(add_movie))
        .route("/updatereview/:imdb_id", patch(update_review))
        .with_state(state)
}

async fn movies(State(state): State<Arc<BackendState>>) -> Json<Value> {
    state.movies_calls.fetch_add(1, Ordering::SeqCst);
    let delay = state.movies_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    Json(catalog())
}

async fn genres() -> Json<Value> {
    Json(json!([
        { "genre_id": 1, "genre_name": "Sci-Fi" },
        { "genre_id": 2, "genre_name": "Crime" },
        { "genre_id": 3, "genre_name": "Drama" }
    ]))
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"].as_str().unwrap_or_default().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid input data" })),
        )
            .into_response();
    }
    (StatusCode::CREATED, Json(json!({ "InsertedID": "u-100" }))).into_response()
}

async fn login(State(state): State<Arc<BackendState>>, Json(body): Json<Value>) -> Response {
    if body["password"] != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid email or password" })),
        )
            .into_response();
    }
    let token = state.access_token.lock().clone();
    let role = if body["email"] == "admin@example.com" {
        "ADMIN"
    } else {
        "USER"
    };
    (
        StatusCode::OK,
        session_cookies(&token),
        Json(json!({
            "user_id": "u-100",
            "first_name": "Test",
            "last_name": "User",
            "email": body["email"],
            "role": role,
            "favorite_genres": [{ "genre_id": 1, "genre_name": "Sci-Fi" }]
        })),
    )
        .into_response()
}

async fn logout(State(state): State<Arc<BackendState>>) -> Response {
    state.logout_calls.fetch_add(1, Ordering::SeqCst);
    (
        StatusCode::OK,
        AppendHeaders([
            (header::SET_COOKIE, "access_token=; Path=/; Max-Age=0"),
            (header::SET_COOKIE, "refresh_token=; Path=/; Max-Age=0"),
        ]),
        Json(json!({ "message": "Logged out successfully" })),
    )
        .into_response()
}

async fn refresh(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    let has_refresh = cookie(&headers, "refresh_token").is_some_and(|v| !v.is_empty());
    if !has_refresh || !state.refresh_allowed.load(Ordering::SeqCst) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid or expired refresh token" })),
        )
            .into_response();
    }
    let token = state.access_token.lock().clone();
    (
        StatusCode::OK,
        session_cookies(&token),
        Json(json!({ "message": "Tokens refreshed" })),
    )
        .into_response()
}

async fn movie(
    State(state): State<Arc<BackendState>>,
    Path(imdb_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    state.protected_calls.fetch_add(1, Ordering::SeqCst);
    if !state.is_authorized(&headers) {
        return unauthorized();
    }
    let found = catalog()
        .as_array()
        .and_then(|movies| movies.iter().find(|m| m["imdb_id"] == imdb_id.as_str()).cloned());
    match found {
        Some(movie) => Json(movie).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Movie not found" })),
        )
            .into_response(),
    }
}

async fn recommended(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    state.protected_calls.fetch_add(1, Ordering::SeqCst);
    if !state.is_authorized(&headers) {
        return unauthorized();
    }
    Json(json!([catalog()[0].clone()])).into_response()
}

async fn add_movie(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.protected_calls.fetch_add(1, Ordering::SeqCst);
    if !state.is_authorized(&headers) {
        return unauthorized();
    }
    state.added.lock().push(body);
    (StatusCode::CREATED, Json(json!({ "InsertedID": "m-1" }))).into_response()
}

async fn update_review(
    State(state): State<Arc<BackendState>>,
    Path(imdb_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.protected_calls.fetch_add(1, Ordering::SeqCst);
    if !state.is_authorized(&headers) {
        return unauthorized();
    }
    let review = body["admin_review"].as_str().unwrap_or_default().to_string();
    state.reviews.lock().push((imdb_id, review.clone()));
    Json(json!({ "admin_review": review, "ranking_name": "good" })).into_response()
}
