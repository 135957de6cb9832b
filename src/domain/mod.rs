//! # Domain Layer
//!
//! Repository identifiers, the registry snapshot, per-item outcomes, and the
//! pure extraction and reconciliation logic. Nothing here performs I/O.

pub mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
