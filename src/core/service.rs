//! Service traits for company and invoice storage
//!
//! Each method maps to exactly one statement against the backing store. The
//! handlers decide what an absent row means (usually a 404), so lookups and
//! keyed writes return `Option`/`bool` rather than failing themselves.

use crate::core::error::ApiResult;
use crate::entities::company::{Company, CompanyUpdate, NewCompany};
use crate::entities::invoice::{Invoice, InvoiceDetail, InvoiceSummary, InvoiceUpdate, NewInvoice};
use async_trait::async_trait;

/// Storage operations over the `companies` table
#[async_trait]
pub trait CompanyService: Send + Sync {
    /// List every company, ordered by name
    async fn list(&self) -> ApiResult<Vec<Company>>;

    /// Get a company by code
    async fn get(&self, code: &str) -> ApiResult<Option<Company>>;

    /// Insert a company; fails with `AlreadyExists` if the code is taken
    async fn create(&self, company: NewCompany) -> ApiResult<Company>;

    /// Replace name and description; `None` if no company has this code
    async fn update(&self, code: &str, changes: CompanyUpdate) -> ApiResult<Option<Company>>;

    /// Delete a company and, through the foreign key, its invoices
    ///
    /// Returns `false` if no company had this code.
    async fn delete(&self, code: &str) -> ApiResult<bool>;
}

/// Storage operations over the `invoices` table
#[async_trait]
pub trait InvoiceService: Send + Sync {
    /// List every invoice as `{id, comp_code}`, ordered by id
    async fn list(&self) -> ApiResult<Vec<InvoiceSummary>>;

    /// Ids of the invoices billed to a company, ordered by id
    async fn ids_for_company(&self, comp_code: &str) -> ApiResult<Vec<i32>>;

    /// Get an invoice joined with its company
    async fn get_detail(&self, id: i32) -> ApiResult<Option<InvoiceDetail>>;

    /// Insert an invoice; id, `paid` and `add_date` come from the store
    ///
    /// Fails with `MissingReference` if `comp_code` names no company.
    async fn create(&self, invoice: NewInvoice) -> ApiResult<Invoice>;

    /// Replace the amount; `None` if no invoice has this id
    async fn update(&self, id: i32, changes: InvoiceUpdate) -> ApiResult<Option<Invoice>>;

    /// Returns `false` if no invoice had this id
    async fn delete(&self, id: i32) -> ApiResult<bool>;
}
