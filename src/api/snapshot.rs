use crate::api::AppState;
use crate::domain::Decimal;
use crate::engine::LedgerSnapshot;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotResponse {
    #[serde(flatten)]
    pub ledger: LedgerSnapshot,
    pub win_rate: f64,
    pub last_price: Option<Decimal>,
}

pub async fn get_snapshot(State(state): State<AppState>) -> Json<SnapshotResponse> {
    let session = state.session.lock().await;
    let ledger = session.snapshot();
    Json(SnapshotResponse {
        win_rate: ledger.stats.win_rate(),
        last_price: session.last_price(),
        ledger,
    })
}
