//! Standard messages for consistent error responses.

pub const VALIDATION_FAILED: &str = "Validation failed";
pub const UNAUTHORIZED: &str = "Unauthorized";
pub const NOT_FOUND_RESOURCE: &str = "Resource not found";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Violation key used when the request body cannot be decoded at all.
pub const FIELD_BODY: &str = "body";
/// Violation key used when the query string cannot be decoded.
pub const FIELD_QUERY: &str = "query";
