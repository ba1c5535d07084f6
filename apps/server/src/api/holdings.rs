use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use sipledger_core::holdings::Holding;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsQuery {
    pub user_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingItemQuery {
    pub user_id: String,
    pub trading_symbol: String,
}

async fn get_holdings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HoldingsQuery>,
) -> ApiResult<Json<Vec<Holding>>> {
    let holdings = state.holding_service.get_holdings(&query.user_id)?;
    Ok(Json(holdings))
}

async fn get_holding(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HoldingItemQuery>,
) -> ApiResult<Json<Holding>> {
    state
        .holding_service
        .get_holding(&query.user_id, &query.trading_symbol)?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/holdings", get(get_holdings))
        .route("/holdings/item", get(get_holding))
}
