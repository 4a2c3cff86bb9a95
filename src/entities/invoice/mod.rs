//! Invoice entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::InvoiceDescriptor;
pub use handlers::InvoiceAppState;
pub use model::{
    Invoice, InvoiceCompanyRow, InvoiceDetail, InvoiceSummary, InvoiceUpdate, NewInvoice,
};
