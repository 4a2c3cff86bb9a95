//! Company rows and request payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A row of the `companies` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Company {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

/// A company together with the ids of its invoices
///
/// Serializes flat: `{code, name, description, invoices: [id, ...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub invoices: Vec<i32>,
}

impl CompanyDetail {
    pub fn new(company: Company, invoices: Vec<i32>) -> Self {
        Self { company, invoices }
    }
}

/// Body of `POST /companies`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NewCompany {
    #[validate(length(min = 1, max = 32, message = "must be 1 to 32 characters"))]
    pub code: String,
    #[validate(length(min = 1, max = 255, message = "must be 1 to 255 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<NewCompany> for Company {
    fn from(new: NewCompany) -> Self {
        Self {
            code: new.code,
            name: new.name,
            description: new.description,
        }
    }
}

/// Body of `PUT /companies/{code}`
///
/// The code is taken from the path and never changes.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CompanyUpdate {
    #[validate(length(min = 1, max = 255, message = "must be 1 to 255 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}
