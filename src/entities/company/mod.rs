//! Company entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::CompanyDescriptor;
pub use handlers::CompanyAppState;
pub use model::{Company, CompanyDetail, CompanyUpdate, NewCompany};
