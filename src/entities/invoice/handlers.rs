//! Invoice HTTP handlers

use super::model::{InvoiceUpdate, NewInvoice};
use crate::core::error::{ApiResult, EntityError};
use crate::core::extractors::{ValidJson, parse_invoice_id};
use crate::core::service::InvoiceService;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{Value, json};
use std::sync::Arc;

/// Invoice-specific AppState
#[derive(Clone)]
pub struct InvoiceAppState {
    pub invoices: Arc<dyn InvoiceService>,
}

/// `GET /invoices` → `{invoices: [{id, comp_code}, ...]}`
pub async fn list_invoices(State(state): State<InvoiceAppState>) -> ApiResult<Json<Value>> {
    let invoices = state.invoices.list().await?;
    Ok(Json(json!({ "invoices": invoices })))
}

/// `GET /invoices/{id}` → `{invoice: {id, amt, paid, add_date, paid_date, company: {...}}}`
pub async fn get_invoice(
    State(state): State<InvoiceAppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_invoice_id(&id)?;
    let invoice = state
        .invoices
        .get_detail(id)
        .await?
        .ok_or_else(|| EntityError::not_found("invoice", id))?;

    Ok(Json(json!({ "invoice": invoice })))
}

/// `POST /invoices` → 201 `{invoice: {id, comp_code, amt, paid, add_date, paid_date}}`
pub async fn create_invoice(
    State(state): State<InvoiceAppState>,
    ValidJson(payload): ValidJson<NewInvoice>,
) -> ApiResult<impl IntoResponse> {
    let invoice = state.invoices.create(payload).await?;
    tracing::info!(id = invoice.id, comp_code = %invoice.comp_code, "invoice created");
    Ok((StatusCode::CREATED, Json(json!({ "invoice": invoice }))))
}

/// `PUT /invoices/{id}` → `{invoice: {...}}`
pub async fn update_invoice(
    State(state): State<InvoiceAppState>,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<InvoiceUpdate>,
) -> ApiResult<Json<Value>> {
    let id = parse_invoice_id(&id)?;
    let invoice = state
        .invoices
        .update(id, payload)
        .await?
        .ok_or_else(|| EntityError::not_found("invoice", id))?;

    Ok(Json(json!({ "invoice": invoice })))
}

/// `DELETE /invoices/{id}` → `{message: "Deleted"}`
pub async fn delete_invoice(
    State(state): State<InvoiceAppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_invoice_id(&id)?;
    if !state.invoices.delete(id).await? {
        return Err(EntityError::not_found("invoice", id).into());
    }

    tracing::info!(id, "invoice deleted");
    Ok(Json(json!({ "message": "Deleted" })))
}
