//! Server host: the transport-agnostic application state
//!
//! `ServerHost` owns the injected storage handles and the entity registry built
//! from them. Exposures (currently only REST) turn a host into a router.

use crate::config::ServerConfig;
use crate::core::service::{CompanyService, InvoiceService};
use crate::entities::company::{CompanyAppState, CompanyDescriptor};
use crate::entities::invoice::{InvoiceAppState, InvoiceDescriptor};
use crate::server::entity_registry::EntityRegistry;
use std::sync::Arc;

/// Host context containing all application state
pub struct ServerHost {
    /// Company storage
    pub companies: Arc<dyn CompanyService>,

    /// Invoice storage
    pub invoices: Arc<dyn InvoiceService>,

    /// Entity registry for CRUD routes
    pub entity_registry: EntityRegistry,

    /// Listener and HTTP-layer settings
    pub server_config: ServerConfig,
}

impl ServerHost {
    /// Build the host and register the company and invoice resources
    pub fn new(
        companies: Arc<dyn CompanyService>,
        invoices: Arc<dyn InvoiceService>,
        server_config: ServerConfig,
    ) -> Self {
        let mut entity_registry = EntityRegistry::new();
        entity_registry.register(Box::new(CompanyDescriptor::new(CompanyAppState {
            companies: companies.clone(),
            invoices: invoices.clone(),
        })));
        entity_registry.register(Box::new(InvoiceDescriptor::new(InvoiceAppState {
            invoices: invoices.clone(),
        })));

        Self {
            companies,
            invoices,
            entity_registry,
            server_config,
        }
    }

    /// Get entity types registered in the host
    pub fn entity_types(&self) -> Vec<&str> {
        self.entity_registry.entity_types()
    }
}
