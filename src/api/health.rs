use crate::api::AppState;
use axum::extract::State;
use axum::Json;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Ready once at least one valid tick has been processed.
pub async fn ready(State(state): State<AppState>) -> Json<serde_json::Value> {
    let price_established = state.session.lock().await.last_price().is_some();
    let status = if price_established { "ready" } else { "waiting" };
    Json(serde_json::json!({
        "status": status,
        "priceEstablished": price_established,
    }))
}
