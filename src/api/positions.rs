use crate::api::AppState;
use crate::domain::{ClosedPosition, Decimal, Position, PositionId, Side, TimeMs};
use crate::error::AppError;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPositionRequest {
    pub side: Side,
    pub leverage: u32,
    pub size: Decimal,
}

/// An open position plus the figures a trader checks before closing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPositionDto {
    #[serde(flatten)]
    pub position: Position,
    /// Always set for stakes the ledger accepted.
    pub liquidation_price: Option<Decimal>,
    pub closing_fee: Option<Decimal>,
}

pub async fn get_open_positions(State(state): State<AppState>) -> Json<Vec<OpenPositionDto>> {
    let fee_rate = state.config.fee_rate;
    let session = state.session.lock().await;
    let positions = session
        .open_positions()
        .iter()
        .map(|p| OpenPositionDto {
            liquidation_price: p.liquidation_price(),
            closing_fee: p.closing_fee(fee_rate),
            position: p.clone(),
        })
        .collect();
    Json(positions)
}

pub async fn open_position(
    State(state): State<AppState>,
    Json(body): Json<OpenPositionRequest>,
) -> Result<Json<Position>, AppError> {
    let position = state.session.lock().await.open_position(
        body.side,
        body.leverage,
        body.size,
        TimeMs::now(),
    )?;
    Ok(Json(position))
}

pub async fn close_position(
    Path(id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<ClosedPosition>, AppError> {
    let closed = state
        .session
        .lock()
        .await
        .close_position(PositionId::new(id), TimeMs::now())?;
    Ok(Json(closed))
}
