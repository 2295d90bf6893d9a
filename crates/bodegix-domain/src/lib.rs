//! Domain types shared across all Bodegix services and tools.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers, in the reader tool and in the client.

pub mod id;
pub mod qr;
pub mod qr_code;
