use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use super::domain::ReceiptId;
use super::service::ReceiptService;
use super::store::ReceiptStore;
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct ProcessedReceipt {
    pub id: ReceiptId,
}

#[derive(Debug, Serialize)]
pub struct ReceiptPoints {
    pub points: u64,
}

/// Router builder exposing receipt intake and points lookup.
pub fn receipt_router<S>(service: Arc<ReceiptService<S>>) -> Router
where
    S: ReceiptStore + 'static,
{
    Router::new()
        .route("/receipts/process", post(process_handler::<S>))
        .route("/receipts/:id/points", get(points_handler::<S>))
        .with_state(service)
}

pub(crate) async fn process_handler<S>(
    State(service): State<Arc<ReceiptService<S>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ProcessedReceipt>, AppError>
where
    S: ReceiptStore + 'static,
{
    let Json(payload) = payload?;
    let id = service.submit(&payload)?;
    Ok(Json(ProcessedReceipt { id }))
}

pub(crate) async fn points_handler<S>(
    State(service): State<Arc<ReceiptService<S>>>,
    Path(id): Path<String>,
) -> Result<Json<ReceiptPoints>, AppError>
where
    S: ReceiptStore + 'static,
{
    let points = service.points(&ReceiptId::from(id))?;
    Ok(Json(ReceiptPoints { points }))
}
