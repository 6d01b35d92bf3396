//! Conversions between sea-orm models and SDK contract types.

use sea_orm::Value;
use storefront_entities_sdk::{
    ContactSubmission, ContactSubmissionPatch, PaymentSetting, PaymentSettingPatch, Transaction,
    TransactionPatch,
};

use time::OffsetDateTime;

use super::entity::{contact_submission, payment_setting, transaction};
use crate::domain::fields::to_utc;
use crate::domain::resource::Changeset;

impl From<contact_submission::Model> for ContactSubmission {
    fn from(m: contact_submission::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            message: m.message,
            status: m.status,
            created_at: m.created_at,
        }
    }
}

impl From<payment_setting::Model> for PaymentSetting {
    fn from(m: payment_setting::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            provider: m.provider,
            public_key: m.public_key,
            secret_key: m.secret_key,
            is_active: m.is_active,
            environment: m.environment,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<transaction::Model> for Transaction {
    fn from(m: transaction::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            amount: m.amount,
            currency: m.currency,
            status: m.status,
            payment_method: m.payment_method,
            external_id: m.external_id,
            description: m.description,
            created_at: m.created_at,
        }
    }
}

/// Collects the supplied fields of a patch.
#[derive(Default)]
struct Changes(Vec<(&'static str, Value)>);

impl Changes {
    fn put<T: Into<Value>>(mut self, name: &'static str, value: Option<T>) -> Self {
        if let Some(v) = value {
            self.0.push((name, v.into()));
        }
        self
    }

    fn put_at(self, name: &'static str, value: Option<OffsetDateTime>) -> Self {
        self.put(name, value.map(to_utc))
    }
}

impl Changeset for ContactSubmissionPatch {
    fn into_changes(self) -> Vec<(&'static str, Value)> {
        Changes::default()
            .put("name", self.name)
            .put("email", self.email)
            .put("phone", self.phone)
            .put("message", self.message)
            .put("status", self.status)
            .put_at("created_at", self.created_at)
            .0
    }
}

impl Changeset for PaymentSettingPatch {
    fn into_changes(self) -> Vec<(&'static str, Value)> {
        Changes::default()
            .put("provider", self.provider)
            .put("public_key", self.public_key)
            .put("secret_key", self.secret_key)
            .put("is_active", self.is_active)
            .put("environment", self.environment)
            .put_at("created_at", self.created_at)
            .put_at("updated_at", self.updated_at)
            .0
    }
}

impl Changeset for TransactionPatch {
    fn into_changes(self) -> Vec<(&'static str, Value)> {
        Changes::default()
            .put("amount", self.amount)
            .put("currency", self.currency)
            .put("status", self.status)
            .put("payment_method", self.payment_method)
            .put("external_id", self.external_id)
            .put("description", self.description)
            .put_at("created_at", self.created_at)
            .0
    }
}
