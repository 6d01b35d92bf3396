//! Storefront entities SDK
//!
//! Transport-agnostic contract types shared by the storefront entities module
//! and its consumers:
//! - entity records (`ContactSubmission`, `PaymentSetting`, `Transaction`)
//! - creation inputs (`New*`) and partial updates (`*Patch`)
//! - list query and page envelope types

pub mod models;
pub mod query;

pub use models::{
    ContactSubmission, ContactSubmissionPatch, NewContactSubmission, NewPaymentSetting,
    NewTransaction, PaymentSetting, PaymentSettingPatch, Transaction, TransactionPatch,
};
pub use query::{ListQuery, Page, SortDir, SortSpec};
