//! HTTP server assembly
//!
//! `ServerBuilder` collects the storage services, `ServerHost` registers the
//! company and invoice resources, and `RestExposure` turns the host into a
//! router.

pub mod builder;
pub mod entity_registry;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use exposure::RestExposure;
pub use host::ServerHost;
