//! Domain service layer.
//!
//! One generic [`EntityService`] drives every entity. It is parameterised by a
//! [`Resource`](crate::domain::resource::Resource) binding that supplies the
//! sea-orm entity, the field registry and the owner column, so the query,
//! ownership, mutation and batch rules are written exactly once.

mod entities;

pub use entities::EntityService;

#[cfg(test)]
mod tests_crud;

#[cfg(test)]
mod tests_ownership;

#[cfg(test)]
mod tests_listing;

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 2000,
        }
    }
}
