//! Reusable OpenAPI response types for consistent API documentation.

use super::{FaultResponse, MessageResponse, ValidationErrorResponse};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "error": "Internal server error"
    })
)]
pub struct InternalServerErrorResponse(pub FaultResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "message": "Validation failed",
        "errors": {
            "name": "Name is required",
            "email": "Invalid email format"
        }
    })
)]
pub struct BadRequestValidationResponse(pub ValidationErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "message": "User not found"
    })
)]
pub struct NotFoundResponse(pub MessageResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict - Resource already exists",
    content_type = "application/json",
    example = json!({
        "message": "Email already exists"
    })
)]
pub struct ConflictResponse(pub MessageResponse);

#[derive(ToResponse)]
#[response(
    description = "Unauthorized - missing or malformed bearer token",
    content_type = "text/plain",
    example = json!("Unauthorized")
)]
pub struct UnauthorizedResponse(pub String);
