//! Storefront entities module
//!
//! Generic CRUD over the storefront tables (contact submissions, payment
//! settings, transactions) with a shared query / ownership / batch layer.
//!
//! The contract types are defined in `storefront-entities-sdk` and
//! re-exported here. Use [`api::rest::routes::router`] to mount the REST
//! surface and [`infra::storage::migrations::Migrator`] to prepare the schema.

pub use storefront_entities_sdk::{
    ContactSubmission, ContactSubmissionPatch, ListQuery, NewContactSubmission, NewPaymentSetting,
    NewTransaction, Page, PaymentSetting, PaymentSettingPatch, SortDir, SortSpec, Transaction,
    TransactionPatch,
};

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;

pub use config::EntitiesConfig;
pub use domain::error::DomainError;
pub use domain::service::{EntityService, ServiceConfig};

#[cfg(test)]
mod test_support;
