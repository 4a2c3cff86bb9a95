//! In-memory implementation of the company and invoice services
//!
//! Mirrors the Postgres schema closely enough to run the whole HTTP contract
//! without a database: serial invoice ids, `paid = false` and
//! `add_date = today` defaults, the unique company code, the `comp_code`
//! foreign key, and `ON DELETE CASCADE`.

use crate::core::error::{ApiError, ApiResult, EntityError};
use crate::core::service::{CompanyService, InvoiceService};
use crate::entities::company::{Company, CompanyUpdate, NewCompany};
use crate::entities::invoice::{Invoice, InvoiceDetail, InvoiceSummary, InvoiceUpdate, NewInvoice};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct Tables {
    companies: BTreeMap<String, Company>,
    invoices: BTreeMap<i32, Invoice>,
    last_invoice_id: i32,
}

/// In-memory store implementing both [`CompanyService`] and [`InvoiceService`]
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// clones share the same tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ApiResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| ApiError::Internal(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> ApiResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|e| ApiError::Internal(format!("Failed to acquire write lock: {}", e)))
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

#[async_trait]
impl CompanyService for InMemoryStore {
    async fn list(&self) -> ApiResult<Vec<Company>> {
        let tables = self.read()?;
        let mut companies: Vec<Company> = tables.companies.values().cloned().collect();
        // Codes are already in order, so a stable sort leaves ties by code
        companies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(companies)
    }

    async fn get(&self, code: &str) -> ApiResult<Option<Company>> {
        Ok(self.read()?.companies.get(code).cloned())
    }

    async fn create(&self, company: NewCompany) -> ApiResult<Company> {
        let mut tables = self.write()?;
        if tables.companies.contains_key(&company.code) {
            return Err(EntityError::already_exists("company", &company.code).into());
        }

        let company = Company::from(company);
        tables
            .companies
            .insert(company.code.clone(), company.clone());
        Ok(company)
    }

    async fn update(&self, code: &str, changes: CompanyUpdate) -> ApiResult<Option<Company>> {
        let mut tables = self.write()?;
        Ok(tables.companies.get_mut(code).map(|company| {
            company.name = changes.name;
            company.description = changes.description;
            company.clone()
        }))
    }

    async fn delete(&self, code: &str) -> ApiResult<bool> {
        let mut tables = self.write()?;
        if tables.companies.remove(code).is_none() {
            return Ok(false);
        }

        tables.invoices.retain(|_, invoice| invoice.comp_code != code);
        Ok(true)
    }
}

#[async_trait]
impl InvoiceService for InMemoryStore {
    async fn list(&self) -> ApiResult<Vec<InvoiceSummary>> {
        Ok(self
            .read()?
            .invoices
            .values()
            .map(InvoiceSummary::from)
            .collect())
    }

    async fn ids_for_company(&self, comp_code: &str) -> ApiResult<Vec<i32>> {
        Ok(self
            .read()?
            .invoices
            .values()
            .filter(|invoice| invoice.comp_code == comp_code)
            .map(|invoice| invoice.id)
            .collect())
    }

    async fn get_detail(&self, id: i32) -> ApiResult<Option<InvoiceDetail>> {
        let tables = self.read()?;
        // Inner join: an invoice without its company is not returned
        Ok(tables.invoices.get(&id).and_then(|invoice| {
            tables
                .companies
                .get(&invoice.comp_code)
                .map(|company| InvoiceDetail::new(invoice.clone(), company.clone()))
        }))
    }

    async fn create(&self, invoice: NewInvoice) -> ApiResult<Invoice> {
        let mut tables = self.write()?;
        if !tables.companies.contains_key(&invoice.comp_code) {
            return Err(
                EntityError::missing_reference("company", "comp_code", &invoice.comp_code).into(),
            );
        }

        tables.last_invoice_id += 1;
        let invoice = Invoice {
            id: tables.last_invoice_id,
            comp_code: invoice.comp_code,
            amt: invoice.amt,
            paid: false,
            add_date: today(),
            paid_date: None,
        };
        tables.invoices.insert(invoice.id, invoice.clone());
        Ok(invoice)
    }

    async fn update(&self, id: i32, changes: InvoiceUpdate) -> ApiResult<Option<Invoice>> {
        let mut tables = self.write()?;
        Ok(tables.invoices.get_mut(&id).map(|invoice| {
            invoice.amt = changes.amt;
            invoice.clone()
        }))
    }

    async fn delete(&self, id: i32) -> ApiResult<bool> {
        Ok(self.write()?.invoices.remove(&id).is_some())
    }
}
