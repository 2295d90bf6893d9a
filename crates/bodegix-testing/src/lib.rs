//! Test utilities for Bodegix services.
//!
//! Import from `[dev-dependencies]` only; never in production code.

pub mod auth;
