//! Axum extractors for request bodies
//!
//! [`ValidJson<T>`] replaces `axum::Json<T>` on every write endpoint. It tells
//! an absent body apart from a malformed one, parses into the operation's
//! payload type, then runs its `validator` rules, so handlers only ever see a
//! well-formed payload.

use crate::core::error::{ApiError, RequestError};
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// A JSON body that was present, parsed into `T`, and validated
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_company(
///     State(state): State<CompanyAppState>,
///     ValidJson(payload): ValidJson<NewCompany>,
/// ) -> ApiResult<impl IntoResponse> {
///     // payload is already validated
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<T> ValidJson<T> {
    /// Get the inner payload
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for ValidJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            ApiError::from(RequestError::InvalidBody {
                message: e.body_text(),
            })
        })?;

        parse_body(&bytes).map(ValidJson)
    }
}

/// Parse and validate a raw body
///
/// A body that is empty or only whitespace counts as missing.
pub fn parse_body<T>(bytes: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned + Validate,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(RequestError::MissingBody.into());
    }

    let payload: T = serde_json::from_slice(bytes)?;
    payload.validate()?;
    Ok(payload)
}

/// Parse an invoice id taken from the path
pub fn parse_invoice_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>().map_err(|_| {
        RequestError::InvalidEntityId {
            entity_type: "invoice".to_string(),
            id: raw.to_string(),
        }
        .into()
    })
}
