//! Core module: the error taxonomy, storage traits, and request extractors

pub mod error;
pub mod extractors;
pub mod service;

pub use error::{ApiError, ApiResult};
pub use extractors::ValidJson;
pub use service::{CompanyService, InvoiceService};
