//! The two resources the API exposes
//!
//! Each submodule holds the row and payload types (`model`), the axum
//! handlers (`handlers`), and the descriptor that mounts them (`descriptor`).

pub mod company;
pub mod invoice;

pub use company::{Company, CompanyDetail, CompanyUpdate, NewCompany};
pub use invoice::{Invoice, InvoiceDetail, InvoiceSummary, InvoiceUpdate, NewInvoice};
