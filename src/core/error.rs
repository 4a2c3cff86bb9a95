//! Typed error handling for biztime
//!
//! Every failure a handler can produce is an [`ApiError`]. Each category carries
//! its own HTTP status and a stable machine-readable code, so the outer request
//! boundary only has to call `into_response()`.
//!
//! # Error Categories
//!
//! - [`EntityError`]: lookups and writes against companies/invoices
//! - [`ValidationError`]: request bodies that do not match the operation schema
//! - [`RequestError`]: malformed requests (missing body, bad path ids, unknown routes)
//! - [`StorageError`]: query executor and connection pool failures
//! - [`ConfigError`]: configuration loading and validation
//!
//! # Example
//!
//! ```rust,ignore
//! use biztime::prelude::*;
//!
//! async fn load(store: &dyn CompanyService, code: &str) -> ApiResult<Company> {
//!     store
//!         .get(code)
//!         .await?
//!         .ok_or_else(|| EntityError::not_found("company", code).into())
//! }
//! ```
//!
//! Responses use the same envelope convention as every other payload:
//!
//! ```json
//! { "error": { "status": 404, "code": "ENTITY_NOT_FOUND", "message": "company not found: ibm" } }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for biztime
#[derive(Debug)]
pub enum ApiError {
    /// Entity-related errors (CRUD operations)
    Entity(EntityError),

    /// Request body validation errors
    Validation(ValidationError),

    /// HTTP/Request errors
    Request(RequestError),

    /// Storage backend errors
    Storage(StorageError),

    /// Configuration errors
    Config(ConfigError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Entity(e) => write!(f, "{}", e),
            ApiError::Validation(e) => write!(f, "{}", e),
            ApiError::Request(e) => write!(f, "{}", e),
            ApiError::Storage(e) => write!(f, "{}", e),
            ApiError::Config(e) => write!(f, "{}", e),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Entity(e) => Some(e),
            ApiError::Validation(e) => Some(e),
            ApiError::Request(e) => Some(e),
            ApiError::Storage(e) => Some(e),
            ApiError::Config(e) => Some(e),
            ApiError::Internal(_) => None,
        }
    }
}

/// Body of the `{"error": ...}` envelope
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// HTTP status, repeated in the body for clients that only see JSON
    pub status: u16,
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// The `{"error": ...}` envelope itself
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorResponse,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Entity(e) => e.status_code(),
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Request(e) => e.status_code(),
            ApiError::Storage(e) => e.status_code(),
            ApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Entity(e) => e.error_code(),
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Request(e) => e.error_code(),
            ApiError::Storage(e) => e.error_code(),
            ApiError::Config(_) => "CONFIG_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            status: self.status_code().as_u16(),
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Entity(EntityError::NotFound { entity_type, key }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "key": key
                }))
            }
            ApiError::Entity(EntityError::MissingReference {
                entity_type,
                field,
                value,
            }) => Some(serde_json::json!({
                "entity_type": entity_type,
                "field": field,
                "value": value
            })),
            ApiError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }
        let body = Json(ErrorEnvelope {
            error: self.to_response(),
        });
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to company and invoice rows
#[derive(Debug)]
pub enum EntityError {
    /// No row matches the primary key
    NotFound { entity_type: String, key: String },

    /// A row with this primary key already exists
    AlreadyExists { entity_type: String, key: String },

    /// A foreign key points at a row that does not exist
    MissingReference {
        entity_type: String,
        field: String,
        value: String,
    },
}

impl EntityError {
    pub fn not_found(entity_type: &str, key: impl ToString) -> Self {
        EntityError::NotFound {
            entity_type: entity_type.to_string(),
            key: key.to_string(),
        }
    }

    pub fn already_exists(entity_type: &str, key: impl ToString) -> Self {
        EntityError::AlreadyExists {
            entity_type: entity_type.to_string(),
            key: key.to_string(),
        }
    }

    pub fn missing_reference(entity_type: &str, field: &str, value: impl ToString) -> Self {
        EntityError::MissingReference {
            entity_type: entity_type.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::AlreadyExists { .. } => StatusCode::CONFLICT,
            EntityError::MissingReference { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
            EntityError::MissingReference { .. } => "UNKNOWN_REFERENCE",
        }
    }
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, key } => {
                write!(f, "{} not found: {}", entity_type, key)
            }
            EntityError::AlreadyExists { entity_type, key } => {
                write!(f, "{} already exists: {}", entity_type, key)
            }
            EntityError::MissingReference {
                entity_type,
                field,
                value,
            } => {
                write!(
                    f,
                    "{} '{}' referenced by '{}' does not exist",
                    entity_type, value, field
                )
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl From<EntityError> for ApiError {
    fn from(err: EntityError) -> Self {
        ApiError::Entity(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to request body validation
#[derive(Debug)]
pub enum ValidationError {
    /// Single field validation error
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),

    /// Body is not JSON, or does not match the operation schema
    InvalidJson { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidJson { message } => {
                write!(f, "Invalid JSON: {}", message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter().map(move |e| FieldValidationError {
                    field: field.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        // HashMap iteration order is random
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.into())
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to the shape of the HTTP request itself
#[derive(Debug)]
pub enum RequestError {
    /// A body is required and none was sent
    MissingBody,

    /// The body could not be read
    InvalidBody { message: String },

    /// Path id is not a valid key for the entity
    InvalidEntityId { entity_type: String, id: String },

    /// No route matches the request path
    RouteNotFound { path: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::MissingBody => write!(f, "Request body is required"),
            RequestError::InvalidBody { message } => {
                write!(f, "Invalid request body: {}", message)
            }
            RequestError::InvalidEntityId { entity_type, id } => {
                write!(f, "Invalid {} id: '{}'", entity_type, id)
            }
            RequestError::RouteNotFound { path } => write!(f, "Not Found: {}", path),
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::MissingBody => StatusCode::BAD_REQUEST,
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            RequestError::InvalidEntityId { .. } => StatusCode::BAD_REQUEST,
            RequestError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::MissingBody => "MISSING_BODY",
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::InvalidEntityId { .. } => "INVALID_ENTITY_ID",
            RequestError::RouteNotFound { .. } => "ROUTE_NOT_FOUND",
        }
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        ApiError::Request(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the query executor
#[derive(Debug)]
pub enum StorageError {
    /// Could not reach the database, or the pool had no free connection
    Unavailable { backend: String, message: String },

    /// Query execution error
    QueryError {
        backend: String,
        operation: String,
        message: String,
    },

    /// Schema migration failed
    MigrationError { message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable { backend, message } => {
                write!(f, "Storage backend '{}' is unavailable: {}", backend, message)
            }
            StorageError::QueryError {
                backend,
                operation,
                message,
            } => {
                write!(f, "{} query error during {}: {}", backend, operation, message)
            }
            StorageError::MigrationError { message } => {
                write!(f, "Migration failed: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StorageError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            StorageError::QueryError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            StorageError::MigrationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::Unavailable { .. } => "STORAGE_UNAVAILABLE",
            StorageError::QueryError { .. } => "STORAGE_ERROR",
            StorageError::MigrationError { .. } => "STORAGE_ERROR",
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Storage(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for ApiError {
    fn from(err: serde_yaml::Error) -> Self {
        ApiError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ApiError>() {
            Ok(api_err) => api_err,
            Err(err) => ApiError::Internal(err.to_string()),
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for biztime operations
pub type ApiResult<T> = Result<T, ApiError>;
