pub mod health;
pub mod positions;
pub mod snapshot;
pub mod ticks;

use crate::config::Config;
use crate::orchestration::Session;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    /// One lock serializes ticks against manual opens and closes.
    pub session: Arc<Mutex<Session>>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let session = Session::new(&config.analyzer(), config.ledger());
        Self {
            session: Arc::new(Mutex::new(session)),
            config,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/ticks", post(ticks::post_tick))
        .route(
            "/v1/positions",
            get(positions::get_open_positions).post(positions::open_position),
        )
        .route("/v1/positions/:id/close", post(positions::close_position))
        .route("/v1/snapshot", get(snapshot::get_snapshot))
        .layer(cors)
        .with_state(state)
}
