//! Entity descriptor for Invoice

use super::handlers::{
    InvoiceAppState, create_invoice, delete_invoice, get_invoice, list_invoices, update_invoice,
};
use crate::server::entity_registry::EntityDescriptor;
use axum::{Router, routing::get};

/// Descriptor for the Invoice entity
pub struct InvoiceDescriptor {
    pub state: InvoiceAppState,
}

impl InvoiceDescriptor {
    pub fn new(state: InvoiceAppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for InvoiceDescriptor {
    fn entity_type(&self) -> &str {
        "invoice"
    }

    fn plural(&self) -> &str {
        "invoices"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/invoices", get(list_invoices).post(create_invoice))
            .route(
                "/invoices/{id}",
                get(get_invoice).put(update_invoice).delete(delete_invoice),
            )
            .with_state(self.state.clone())
    }
}
