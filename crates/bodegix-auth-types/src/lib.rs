//! Auth types shared across Bodegix services.
//!
//! Provides bearer JWT validation and the `Identity` extractor. Token issuance
//! belongs to the login flow and is not implemented here.

pub mod identity;
pub mod token;
