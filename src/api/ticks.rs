use crate::api::AppState;
use crate::domain::{PriceTick, TimeMs};
use crate::error::AppError;
use crate::orchestration::TickReport;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickRequest {
    pub price: f64,
    /// Defaults to the server clock.
    pub timestamp_ms: Option<i64>,
}

pub async fn post_tick(
    State(state): State<AppState>,
    Json(body): Json<TickRequest>,
) -> Result<Json<TickReport>, AppError> {
    let timestamp = body.timestamp_ms.map(TimeMs::new).unwrap_or_else(TimeMs::now);
    let report = state
        .session
        .lock()
        .await
        .process_tick(PriceTick::new(body.price, timestamp))?;
    Ok(Json(report))
}
