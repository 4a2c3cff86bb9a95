//! REST exposure
//!
//! Consumes a `ServerHost` and produces the Axum `Router` the binary serves:
//! health checks, the company and invoice resources, any custom routes, and a
//! JSON 404 for everything else.

use super::super::host::ServerHost;
use crate::core::error::{ApiError, RequestError};
use anyhow::Result;
use axum::http::Uri;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns a router with:
    /// - `/health` and `/healthz`
    /// - CRUD routes for every registered entity
    /// - the given custom routes
    /// - a fallback answering unknown paths with a `ROUTE_NOT_FOUND` error body
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let health_routes = Self::health_routes();
        let entity_routes = host.entity_registry.build_routes();

        let mut app = health_routes.merge(entity_routes);

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        let app = app.fallback(Self::route_not_found).layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .option_layer(
                    host.server_config
                        .allow_any_origin
                        .then(CorsLayer::permissive),
                ),
        );

        Ok(app)
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "biztime"
        }))
    }

    async fn route_not_found(uri: Uri) -> ApiError {
        RequestError::RouteNotFound {
            path: uri.path().to_string(),
        }
        .into()
    }
}
