//! Company HTTP handlers

use super::model::{CompanyDetail, CompanyUpdate, NewCompany};
use crate::core::error::{ApiResult, EntityError};
use crate::core::extractors::ValidJson;
use crate::core::service::{CompanyService, InvoiceService};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{Value, json};
use std::sync::Arc;

/// Company-specific AppState
///
/// Detail reads also need the invoice side, for the id list.
#[derive(Clone)]
pub struct CompanyAppState {
    pub companies: Arc<dyn CompanyService>,
    pub invoices: Arc<dyn InvoiceService>,
}

/// `GET /companies` → `{companies: [{code, name, description}, ...]}`
pub async fn list_companies(State(state): State<CompanyAppState>) -> ApiResult<Json<Value>> {
    let companies = state.companies.list().await?;
    Ok(Json(json!({ "companies": companies })))
}

/// `GET /companies/{code}` → `{company: {code, name, description, invoices: [id, ...]}}`
///
/// Two sequential reads, not a transaction.
pub async fn get_company(
    State(state): State<CompanyAppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<Value>> {
    let company = state
        .companies
        .get(&code)
        .await?
        .ok_or_else(|| EntityError::not_found("company", &code))?;

    let invoices = state.invoices.ids_for_company(&code).await?;

    Ok(Json(json!({ "company": CompanyDetail::new(company, invoices) })))
}

/// `POST /companies` → 201 `{company: {code, name, description}}`
pub async fn create_company(
    State(state): State<CompanyAppState>,
    ValidJson(payload): ValidJson<NewCompany>,
) -> ApiResult<impl IntoResponse> {
    let company = state.companies.create(payload).await?;
    tracing::info!(code = %company.code, "company created");
    Ok((StatusCode::CREATED, Json(json!({ "company": company }))))
}

/// `PUT /companies/{code}` → `{company: {code, name, description}}`
pub async fn update_company(
    State(state): State<CompanyAppState>,
    Path(code): Path<String>,
    ValidJson(payload): ValidJson<CompanyUpdate>,
) -> ApiResult<Json<Value>> {
    let company = state
        .companies
        .update(&code, payload)
        .await?
        .ok_or_else(|| EntityError::not_found("company", &code))?;

    Ok(Json(json!({ "company": company })))
}

/// `DELETE /companies/{code}` → `{message: "Deleted"}`
pub async fn delete_company(
    State(state): State<CompanyAppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<Value>> {
    if !state.companies.delete(&code).await? {
        return Err(EntityError::not_found("company", &code).into());
    }

    tracing::info!(code = %code, "company deleted");
    Ok(Json(json!({ "message": "Deleted" })))
}
