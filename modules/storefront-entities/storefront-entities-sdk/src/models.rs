//! Public models for the storefront entities module.
//!
//! Records carry the server-assigned `id`. Creation inputs never carry an id or
//! an owner; the owner of scoped entities is injected from the caller identity.

use time::OffsetDateTime;

/// A message left through the public contact form.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactSubmission {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: Option<String>,
    pub created_at: Option<OffsetDateTime>,
}

/// Data for creating a new contact submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: Option<String>,
    pub created_at: Option<OffsetDateTime>,
}

/// Partial update data for a contact submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContactSubmissionPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<OffsetDateTime>,
}

/// Payment provider credentials owned by a single user.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentSetting {
    pub id: i32,
    pub user_id: String,
    pub provider: String,
    pub public_key: Option<String>,
    pub secret_key: Option<String>,
    pub is_active: Option<bool>,
    pub environment: Option<String>,
    pub created_at: Option<OffsetDateTime>,
    pub updated_at: Option<OffsetDateTime>,
}

/// Data for creating a new payment setting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewPaymentSetting {
    pub provider: String,
    pub public_key: Option<String>,
    pub secret_key: Option<String>,
    pub is_active: Option<bool>,
    pub environment: Option<String>,
    pub created_at: Option<OffsetDateTime>,
    pub updated_at: Option<OffsetDateTime>,
}

/// Partial update data for a payment setting. The owner is not patchable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaymentSettingPatch {
    pub provider: Option<String>,
    pub public_key: Option<String>,
    pub secret_key: Option<String>,
    pub is_active: Option<bool>,
    pub environment: Option<String>,
    pub created_at: Option<OffsetDateTime>,
    pub updated_at: Option<OffsetDateTime>,
}

/// A payment transaction recorded for a user.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i32,
    pub user_id: String,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub payment_method: Option<String>,
    pub external_id: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<OffsetDateTime>,
}

/// Data for creating a new transaction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewTransaction {
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub payment_method: Option<String>,
    pub external_id: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<OffsetDateTime>,
}

/// Partial update data for a transaction. The owner is not patchable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionPatch {
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub external_id: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<OffsetDateTime>,
}
