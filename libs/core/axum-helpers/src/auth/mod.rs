//! Bearer token handling.
//!
//! This module provides:
//! - Extraction of a bearer token from the `Authorization` header
//! - The [`TokenValidator`] seam, with a structural JWT check as the default
//!
//! Signature and issuer verification belong to an external identity
//! provider; plug one in by implementing [`TokenValidator`].

pub mod bearer;
pub mod token;

pub use bearer::bearer_token;
pub use token::{DecodedToken, JwtStructureValidator, TokenError, TokenValidator};
