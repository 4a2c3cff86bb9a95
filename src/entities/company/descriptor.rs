//! Entity descriptor for Company

use super::handlers::{
    CompanyAppState, create_company, delete_company, get_company, list_companies, update_company,
};
use crate::server::entity_registry::EntityDescriptor;
use axum::{Router, routing::get};

/// Descriptor for the Company entity
pub struct CompanyDescriptor {
    pub state: CompanyAppState,
}

impl CompanyDescriptor {
    pub fn new(state: CompanyAppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for CompanyDescriptor {
    fn entity_type(&self) -> &str {
        "company"
    }

    fn plural(&self) -> &str {
        "companies"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/companies", get(list_companies).post(create_company))
            .route(
                "/companies/{code}",
                get(get_company).put(update_company).delete(delete_company),
            )
            .with_state(self.state.clone())
    }
}
