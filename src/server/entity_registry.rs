//! Entity registry: one descriptor per resource, merged into one router

use axum::Router;
use std::collections::BTreeMap;

/// Describes how to build the routes of one resource
///
/// Companies and invoices each implement this; the registry merges them.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "company")
    fn entity_type(&self) -> &str;

    /// The plural form, which is also the collection path segment
    fn plural(&self) -> &str;

    /// Build the CRUD routes for this entity
    ///
    /// Expected shape:
    /// - GET/POST /{plural}
    /// - GET/PUT/DELETE /{plural}/{key}
    fn build_routes(&self) -> Router;
}

/// Registry for all resources the server exposes
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: BTreeMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity descriptor, replacing any previous one for the same type
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        if self.descriptors.insert(entity_type, descriptor).is_some() {
            tracing::warn!("entity descriptor registered twice; keeping the latest");
        }
    }

    /// Build a router with all registered entity routes
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes())
            })
    }

    /// Registered entity types, in sorted order
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }

    /// Collection paths (`/companies`, `/invoices`, ...), in entity type order
    pub fn collection_paths(&self) -> Vec<String> {
        self.descriptors
            .values()
            .map(|d| format!("/{}", d.plural()))
            .collect()
    }
}
