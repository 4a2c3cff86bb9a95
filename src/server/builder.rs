//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::config::ServerConfig;
use crate::core::service::{CompanyService, InvoiceService};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the biztime HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryStore::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    companies: Option<Arc<dyn CompanyService>>,
    invoices: Option<Arc<dyn InvoiceService>>,
    server_config: ServerConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            companies: None,
            invoices: None,
            server_config: ServerConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Use one store for both companies and invoices
    ///
    /// This is the normal setup: both backends implement the two services
    /// over shared tables, so the invoice foreign key and the cascading
    /// company delete see the same data.
    pub fn with_store<S>(self, store: S) -> Self
    where
        S: CompanyService + InvoiceService + 'static,
    {
        let store = Arc::new(store);
        self.with_company_service(store.clone())
            .with_invoice_service(store)
    }

    /// Set the company service (required)
    pub fn with_company_service(mut self, service: Arc<dyn CompanyService>) -> Self {
        self.companies = Some(service);
        self
    }

    /// Set the invoice service (required)
    pub fn with_invoice_service(mut self, service: Arc<dyn InvoiceService>) -> Self {
        self.invoices = Some(service);
        self
    }

    /// Apply the `server` section of the configuration
    pub fn with_server_config(mut self, config: ServerConfig) -> Self {
        self.server_config = config;
        self
    }

    /// Add routes outside the company/invoice resources
    ///
    /// ```ignore
    /// let admin = Router::new().route("/version", get(|| async { env!("CARGO_PKG_VERSION") }));
    /// ServerBuilder::new().with_store(store).with_custom_routes(admin).build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(mut self) -> Result<ServerHost> {
        let companies = self.companies.take().ok_or_else(|| {
            anyhow::anyhow!("CompanyService is required. Call .with_store() or .with_company_service()")
        })?;
        let invoices = self.invoices.take().ok_or_else(|| {
            anyhow::anyhow!("InvoiceService is required. Call .with_store() or .with_invoice_service()")
        })?;

        Ok(ServerHost::new(companies, invoices, self.server_config))
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        RestExposure::build_router(host, custom_routes)
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds `addr`, serves until SIGTERM or Ctrl+C, then lets in-flight
    /// requests finish.
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
///
/// A handler that cannot be installed never fires; the other one still does.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
