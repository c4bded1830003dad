use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::validation::{validate_email, validate_name};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// User entity as stored and as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier
    #[schema(example = 1)]
    pub id: i64,
    /// Display name
    #[schema(example = "Vraj")]
    pub name: String,
    /// Email address (unique, compared exactly)
    #[schema(example = "vraj@example.com")]
    pub email: String,
}

impl User {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Overwrite `name` and `email`; the id never changes.
    pub fn apply_update(&mut self, update: UpdateUser) {
        self.name = update.name;
        self.email = update.email;
    }
}

/// DTO for creating a new user
///
/// Missing `name`/`email` deserialize as empty strings so they surface as
/// field violations rather than as a malformed body.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    /// Client-chosen id; assigned by the store when omitted
    #[serde(default)]
    #[schema(example = 3)]
    pub id: Option<i64>,
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    #[schema(example = "Asha")]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "validate_email"))]
    #[schema(example = "asha@example.com")]
    pub email: String,
}

/// DTO for replacing a user's name and email
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "validate_email"))]
    pub email: String,
}

/// Page selection for listing users
///
/// Any integer is accepted: pages before the first clamp to it and a
/// non-positive `pageSize` selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// 1-based page number
    #[serde(default = "default_page")]
    #[param(example = 1)]
    pub page: i64,
    /// Users per page
    #[serde(rename = "pageSize", default = "default_page_size")]
    #[param(example = 5)]
    pub page_size: i64,
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self { page, page_size }
    }

    /// `max(page - 1, 0) * max(pageSize, 0)`, saturating.
    pub fn offset(&self) -> usize {
        let skipped = self.page.saturating_sub(1).max(0);
        to_usize(skipped.saturating_mul(self.page_size.max(0)))
    }

    /// `max(pageSize, 0)`
    pub fn limit(&self) -> usize {
        to_usize(self.page_size.max(0))
    }
}

fn to_usize(n: i64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}
