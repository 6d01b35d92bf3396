//! Domain layer.
//!
//! - `error` - domain errors
//! - `fields` - static per-entity field registry
//! - `query` - filter / sort / pagination resolution
//! - `resource` - per-entity binding trait and change application
//! - `service` - the generic entity service

pub mod error;
pub mod fields;
pub mod query;
pub mod resource;
pub mod service;
