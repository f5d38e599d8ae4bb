//! Game-side receiver of logins and stat updates.
//!
//! Holds the most recent wallet/username pairing and the most recent counters,
//! which the game client polls through `GET /session`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use duel_client::payload::{LoginRequest, StatsPayload};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    pub public_key: String,
    pub username: String,
    pub stats: Option<StatsPayload>,
}

impl Session {
    pub fn logged_in(&self) -> bool {
        !self.public_key.is_empty() && !self.username.is_empty()
    }
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Session>>,
}

impl SessionStore {
    pub async fn snapshot(&self) -> Session {
        self.inner.read().await.clone()
    }

    pub async fn record_login(&self, request: LoginRequest) {
        let mut session = self.inner.write().await;
        // A different wallet starts from unknown stats.
        if session.public_key != request.public_key {
            session.stats = None;
        }
        session.public_key = request.public_key;
        session.username = request.username;
    }

    pub async fn record_stats(&self, stats: StatsPayload) {
        self.inner.write().await.stats = Some(stats);
    }
}

pub fn session_router(store: SessionStore) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/update-stats", post(update_stats))
        .route("/session", get(session))
        .with_state(store)
}

async fn login(
    State(store): State<SessionStore>,
    Json(request): Json<LoginRequest>,
) -> (StatusCode, &'static str) {
    if !request.is_complete() {
        warn!("Rejected login with missing credentials");
        return (StatusCode::BAD_REQUEST, "Missing credentials");
    }
    info!(public_key = %request.public_key, username = %request.username, "Logged in");
    store.record_login(request).await;
    (StatusCode::OK, "OK")
}

async fn update_stats(
    State(store): State<SessionStore>,
    Json(stats): Json<StatsPayload>,
) -> (StatusCode, &'static str) {
    store.record_stats(stats).await;
    (StatusCode::OK, "OK")
}

async fn session(State(store): State<SessionStore>) -> Json<Session> {
    Json(store.snapshot().await)
}
