//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresStore`, which implements both [`CompanyService`] and
//! [`InvoiceService`] over a `sqlx::PgPool`. Every operation is a single
//! parameterized statement; nothing here opens a transaction.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag (on by default).
//!
//! # Schema
//!
//! The tables live in `migrations/` and are applied with [`PostgresStore::migrate`].
//! `invoices.comp_code` references `companies.code` with `ON DELETE CASCADE`.

use crate::config::DatabaseConfig;
use crate::core::error::{ApiError, ApiResult, EntityError, StorageError, ValidationError};
use crate::core::service::{CompanyService, InvoiceService};
use crate::entities::company::{Company, CompanyUpdate, NewCompany};
use crate::entities::invoice::{
    Invoice, InvoiceCompanyRow, InvoiceDetail, InvoiceSummary, InvoiceUpdate, NewInvoice,
};
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::error::ErrorKind;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

const BACKEND: &str = "PostgreSQL";

/// Embedded schema migrations
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

// ---------------------------------------------------------------------------
// Error classification
// ---------------------------------------------------------------------------

/// What a failed statement was trying to do, for error classification
#[derive(Debug, Clone, Copy)]
enum Op<'a> {
    CreateCompany(&'a str),
    CreateInvoice(&'a str),
    Other(&'static str),
}

impl Op<'_> {
    fn name(&self) -> &'static str {
        match *self {
            Op::CreateCompany(_) => "create company",
            Op::CreateInvoice(_) => "create invoice",
            Op::Other(name) => name,
        }
    }
}

/// Map a sqlx error onto the API taxonomy
///
/// Constraint violations become client errors; connectivity problems become
/// `Unavailable`; everything else is an opaque query error.
fn classify(err: sqlx::Error, op: Op<'_>) -> ApiError {
    match &err {
        sqlx::Error::Database(db) => match (db.kind(), op) {
            (ErrorKind::UniqueViolation, Op::CreateCompany(code)) => {
                EntityError::already_exists("company", code).into()
            }
            (ErrorKind::ForeignKeyViolation, Op::CreateInvoice(comp_code)) => {
                EntityError::missing_reference("company", "comp_code", comp_code).into()
            }
            (ErrorKind::NotNullViolation | ErrorKind::CheckViolation, _) => {
                ValidationError::FieldError {
                    field: db.constraint().unwrap_or("unknown").to_string(),
                    message: db.message().to_string(),
                }
                .into()
            }
            _ => query_error(&err, op),
        },
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StorageError::Unavailable {
                backend: BACKEND.to_string(),
                message: err.to_string(),
            }
            .into()
        }
        _ => query_error(&err, op),
    }
}

fn query_error(err: &sqlx::Error, op: Op<'_>) -> ApiError {
    StorageError::QueryError {
        backend: BACKEND.to_string(),
        operation: op.name().to_string(),
        message: err.to_string(),
    }
    .into()
}

// ---------------------------------------------------------------------------
// PostgresStore
// ---------------------------------------------------------------------------

/// Company and invoice storage backed by PostgreSQL.
///
/// Cloning is cheap: clones share the underlying pool.
///
/// # Example
///
/// ```rust,ignore
/// use biztime::storage::PostgresStore;
///
/// let store = PostgresStore::connect(&config.database).await?;
/// store.migrate().await?;
/// ServerBuilder::new().with_store(store).serve("127.0.0.1:3000").await?;
/// ```
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wrap an existing connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool using the database section of the configuration
    pub async fn connect(config: &DatabaseConfig) -> ApiResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| StorageError::Unavailable {
                backend: BACKEND.to_string(),
                message: e.to_string(),
            })?;

        tracing::info!(
            max_connections = config.max_connections,
            "Connected to PostgreSQL"
        );
        Ok(Self::new(pool))
    }

    /// Apply pending schema migrations (idempotent)
    pub async fn migrate(&self) -> ApiResult<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| StorageError::MigrationError {
                message: e.to_string(),
            })?;
        tracing::info!("Database schema is up to date");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CompanyService for PostgresStore {
    async fn list(&self) -> ApiResult<Vec<Company>> {
        sqlx::query_as::<_, Company>(
            "SELECT code, name, description
             FROM companies
             ORDER BY name, code",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify(e, Op::Other("list companies")))
    }

    async fn get(&self, code: &str) -> ApiResult<Option<Company>> {
        sqlx::query_as::<_, Company>(
            "SELECT code, name, description
             FROM companies
             WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(e, Op::Other("get company")))
    }

    async fn create(&self, company: NewCompany) -> ApiResult<Company> {
        sqlx::query_as::<_, Company>(
            "INSERT INTO companies (code, name, description)
             VALUES ($1, $2, $3)
             RETURNING code, name, description",
        )
        .bind(&company.code)
        .bind(&company.name)
        .bind(&company.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, Op::CreateCompany(&company.code)))
    }

    async fn update(&self, code: &str, changes: CompanyUpdate) -> ApiResult<Option<Company>> {
        sqlx::query_as::<_, Company>(
            "UPDATE companies
             SET name = $1,
                 description = $2
             WHERE code = $3
             RETURNING code, name, description",
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(e, Op::Other("update company")))
    }

    async fn delete(&self, code: &str) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM companies WHERE code = $1")
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(|e| classify(e, Op::Other("delete company")))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl InvoiceService for PostgresStore {
    async fn list(&self) -> ApiResult<Vec<InvoiceSummary>> {
        sqlx::query_as::<_, InvoiceSummary>(
            "SELECT id, comp_code
             FROM invoices
             ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify(e, Op::Other("list invoices")))
    }

    async fn ids_for_company(&self, comp_code: &str) -> ApiResult<Vec<i32>> {
        sqlx::query_scalar::<_, i32>(
            "SELECT id
             FROM invoices
             WHERE comp_code = $1
             ORDER BY id",
        )
        .bind(comp_code)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify(e, Op::Other("list company invoices")))
    }

    async fn get_detail(&self, id: i32) -> ApiResult<Option<InvoiceDetail>> {
        let row = sqlx::query_as::<_, InvoiceCompanyRow>(
            "SELECT i.id,
                    i.amt,
                    i.paid,
                    i.add_date,
                    i.paid_date,
                    i.comp_code,
                    c.name,
                    c.description
             FROM invoices AS i
               JOIN companies AS c ON i.comp_code = c.code
             WHERE i.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(e, Op::Other("get invoice")))?;

        Ok(row.map(InvoiceDetail::from))
    }

    async fn create(&self, invoice: NewInvoice) -> ApiResult<Invoice> {
        sqlx::query_as::<_, Invoice>(
            "INSERT INTO invoices (comp_code, amt)
             VALUES ($1, $2)
             RETURNING id, comp_code, amt, paid, add_date, paid_date",
        )
        .bind(&invoice.comp_code)
        .bind(invoice.amt)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, Op::CreateInvoice(&invoice.comp_code)))
    }

    async fn update(&self, id: i32, changes: InvoiceUpdate) -> ApiResult<Option<Invoice>> {
        sqlx::query_as::<_, Invoice>(
            "UPDATE invoices
             SET amt = $1
             WHERE id = $2
             RETURNING id, comp_code, amt, paid, add_date, paid_date",
        )
        .bind(changes.amt)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(e, Op::Other("update invoice")))
    }

    async fn delete(&self, id: i32) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| classify(e, Op::Other("delete invoice")))?;

        Ok(result.rows_affected() > 0)
    }
}
