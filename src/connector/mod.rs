//! # Connector Layer
//!
//! External integrations implementing the application ports:
//! - Hosting provider (GitHub REST API, offline mock)
//! - Registry storage (remote document API, in-memory)
//! - Command surface (router, controllers, HTTP endpoint)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
