//! # biztime
//!
//! A JSON REST API for companies and the invoices issued to them.
//!
//! ## Resources
//!
//! - `/companies`: list, create, fetch (with invoice ids), update, delete
//! - `/invoices`: list, create, fetch (with the owning company), update, delete
//! - `/health`, `/healthz`: liveness
//!
//! Storage sits behind [`CompanyService`](core::service::CompanyService) and
//! [`InvoiceService`](core::service::InvoiceService). [`InMemoryStore`](storage::InMemoryStore)
//! implements both for tests and development; `PostgresStore` (feature
//! `postgres`, on by default) is the production backend.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use biztime::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_store(InMemoryStore::new())
//!     .build()?;
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    pub use crate::config::{AppConfig, DatabaseConfig, LoggingConfig, ServerConfig};

    pub use crate::core::{
        error::{ApiError, ApiResult, EntityError, RequestError, StorageError, ValidationError},
        extractors::ValidJson,
        service::{CompanyService, InvoiceService},
    };

    pub use crate::entities::{
        Company, CompanyDetail, CompanyUpdate, Invoice, InvoiceDetail, InvoiceSummary,
        InvoiceUpdate, NewCompany, NewInvoice,
    };

    pub use crate::server::{ServerBuilder, ServerHost};

    pub use crate::storage::InMemoryStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresStore;
}
