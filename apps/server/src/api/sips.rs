use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};
use sipledger_core::executions::ExecutionRecord;
use sipledger_core::sips::{BatchReport, NewSip, Sip};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionsQuery {
    pub user_id: String,
    pub sip_id: Option<String>,
}

async fn list_sips(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<Vec<Sip>>> {
    let sips = state.sip_service.list_sips(&query.user_id)?;
    Ok(Json(sips))
}

async fn create_sip(
    State(state): State<Arc<AppState>>,
    Json(new_sip): Json<NewSip>,
) -> ApiResult<Json<Sip>> {
    let sip = state.sip_service.create_sip(new_sip).await?;
    Ok(Json(sip))
}

async fn get_sip(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Sip>> {
    let sip = state.sip_service.get_sip(&id)?;
    Ok(Json(sip))
}

async fn get_executions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExecutionsQuery>,
) -> ApiResult<Json<Vec<ExecutionRecord>>> {
    let records = state
        .sip_service
        .get_executions(&query.user_id, query.sip_id.as_deref())?;
    Ok(Json(records))
}

/// Runs the due batch now. Per-SIP failures are part of the 200 report.
async fn execute_due_sips(State(state): State<Arc<AppState>>) -> ApiResult<Json<BatchReport>> {
    let report = state.sip_service.run_pending(Utc::now()).await?;
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sips", get(list_sips).post(create_sip))
        .route("/sips/executions", get(get_executions))
        .route("/sips/{id}", get(get_sip))
}

/// The batch trigger. Kept out of the request timeout: the batch may wait
/// behind a scheduled run.
pub fn batch_router() -> Router<Arc<AppState>> {
    Router::new().route("/sips/execute", post(execute_due_sips))
}
