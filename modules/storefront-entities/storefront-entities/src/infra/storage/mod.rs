//! Infrastructure storage layer.
//!
//! All sea-orm specific code lives here:
//! - `entity/` - table definitions for the three entities
//! - `migrations/` - schema migrations
//! - `mapper.rs` - conversions between sea-orm models and SDK contract types
//! - `resources.rs` - per-entity bindings (field registries, owner columns)
//!   consumed by the generic domain service

pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod resources;

pub use resources::{ContactSubmissions, PaymentSettings, Transactions};
