//! Resource bindings for the three storefront entities.

use std::sync::LazyLock;

use sea_orm::ActiveValue::{NotSet, Set};
use storefront_entities_sdk::{
    ContactSubmission, ContactSubmissionPatch, NewContactSubmission, NewPaymentSetting,
    NewTransaction, PaymentSetting, PaymentSettingPatch, Transaction, TransactionPatch,
};
use time::OffsetDateTime;

use super::entity::{contact_submission, payment_setting, transaction};
use crate::domain::error::DomainError;
use crate::domain::fields::{Field, FieldKind, FieldMap, to_utc};
use crate::domain::resource::{Resource, require_text};

/// Public contact form submissions. Not owner-scoped.
pub struct ContactSubmissions;

/// Per-user payment provider settings.
pub struct PaymentSettings;

/// Payment transactions.
///
/// Owner-scoped by `user_id` as a choice made for this service: the column is
/// only a reference in the storefront's data model, but here it gates access
/// the same way it does for payment settings.
pub struct Transactions;

static CONTACT_SUBMISSION_FIELDS: LazyLock<FieldMap<contact_submission::Entity>> =
    LazyLock::new(|| {
        use contact_submission::Column;
        FieldMap::new()
            .with("id", Field::required(Column::Id, FieldKind::I32).immutable())
            .with("name", Field::required(Column::Name, FieldKind::String))
            .with("email", Field::required(Column::Email, FieldKind::String))
            .with("phone", Field::optional(Column::Phone, FieldKind::String))
            .with("message", Field::required(Column::Message, FieldKind::String))
            .with("status", Field::optional(Column::Status, FieldKind::String))
            .with(
                "created_at",
                Field::optional(Column::CreatedAt, FieldKind::DateTime),
            )
    });

static PAYMENT_SETTING_FIELDS: LazyLock<FieldMap<payment_setting::Entity>> = LazyLock::new(|| {
    use payment_setting::Column;
    FieldMap::new()
        .with("id", Field::required(Column::Id, FieldKind::I32).immutable())
        .with(
            "user_id",
            Field::required(Column::UserId, FieldKind::String).immutable(),
        )
        .with("provider", Field::required(Column::Provider, FieldKind::String))
        .with(
            "public_key",
            Field::optional(Column::PublicKey, FieldKind::String),
        )
        .with(
            "secret_key",
            Field::optional(Column::SecretKey, FieldKind::String),
        )
        .with("is_active", Field::optional(Column::IsActive, FieldKind::Bool))
        .with(
            "environment",
            Field::optional(Column::Environment, FieldKind::String),
        )
        .with(
            "created_at",
            Field::optional(Column::CreatedAt, FieldKind::DateTime),
        )
        .with(
            "updated_at",
            Field::optional(Column::UpdatedAt, FieldKind::DateTime),
        )
});

static TRANSACTION_FIELDS: LazyLock<FieldMap<transaction::Entity>> = LazyLock::new(|| {
    use transaction::Column;
    FieldMap::new()
        .with("id", Field::required(Column::Id, FieldKind::I32).immutable())
        .with(
            "user_id",
            Field::required(Column::UserId, FieldKind::String).immutable(),
        )
        .with("amount", Field::required(Column::Amount, FieldKind::F64))
        .with("currency", Field::required(Column::Currency, FieldKind::String))
        .with("status", Field::required(Column::Status, FieldKind::String))
        .with(
            "payment_method",
            Field::optional(Column::PaymentMethod, FieldKind::String),
        )
        .with(
            "external_id",
            Field::optional(Column::ExternalId, FieldKind::String),
        )
        .with(
            "description",
            Field::optional(Column::Description, FieldKind::String),
        )
        .with(
            "created_at",
            Field::optional(Column::CreatedAt, FieldKind::DateTime),
        )
});

fn owner_of(owner: Option<&str>) -> String {
    owner.map(str::to_owned).unwrap_or_default()
}

impl Resource for ContactSubmissions {
    const LABEL: &'static str = "ContactSubmission";

    type Entity = contact_submission::Entity;
    type Model = contact_submission::Model;
    type ActiveModel = contact_submission::ActiveModel;
    type Record = ContactSubmission;
    type New = NewContactSubmission;
    type Patch = ContactSubmissionPatch;

    fn fields() -> &'static FieldMap<Self::Entity> {
        &CONTACT_SUBMISSION_FIELDS
    }

    fn id_column() -> contact_submission::Column {
        contact_submission::Column::Id
    }

    fn validate_new(new: &NewContactSubmission) -> Result<(), DomainError> {
        require_text("name", &new.name)?;
        require_text("email", &new.email)?;
        require_text("message", &new.message)
    }

    fn active_model(new: NewContactSubmission, _owner: Option<&str>) -> Self::ActiveModel {
        contact_submission::ActiveModel {
            id: NotSet,
            name: Set(new.name),
            email: Set(new.email),
            phone: Set(new.phone),
            message: Set(new.message),
            status: Set(new.status),
            created_at: Set(Some(new.created_at.map_or_else(OffsetDateTime::now_utc, to_utc))),
        }
    }
}

impl Resource for PaymentSettings {
    const LABEL: &'static str = "PaymentSetting";

    type Entity = payment_setting::Entity;
    type Model = payment_setting::Model;
    type ActiveModel = payment_setting::ActiveModel;
    type Record = PaymentSetting;
    type New = NewPaymentSetting;
    type Patch = PaymentSettingPatch;

    fn fields() -> &'static FieldMap<Self::Entity> {
        &PAYMENT_SETTING_FIELDS
    }

    fn id_column() -> payment_setting::Column {
        payment_setting::Column::Id
    }

    fn owner_column() -> Option<payment_setting::Column> {
        Some(payment_setting::Column::UserId)
    }

    fn validate_new(new: &NewPaymentSetting) -> Result<(), DomainError> {
        require_text("provider", &new.provider)
    }

    fn active_model(new: NewPaymentSetting, owner: Option<&str>) -> Self::ActiveModel {
        let now = OffsetDateTime::now_utc();
        payment_setting::ActiveModel {
            id: NotSet,
            user_id: Set(owner_of(owner)),
            provider: Set(new.provider),
            public_key: Set(new.public_key),
            secret_key: Set(new.secret_key),
            is_active: Set(new.is_active),
            environment: Set(new.environment),
            created_at: Set(Some(new.created_at.map_or(now, to_utc))),
            updated_at: Set(Some(new.updated_at.map_or(now, to_utc))),
        }
    }

    fn touch(am: &mut payment_setting::ActiveModel) {
        if !am.updated_at.is_set() {
            am.updated_at = Set(Some(OffsetDateTime::now_utc()));
        }
    }
}

impl Resource for Transactions {
    const LABEL: &'static str = "Transaction";

    type Entity = transaction::Entity;
    type Model = transaction::Model;
    type ActiveModel = transaction::ActiveModel;
    type Record = Transaction;
    type New = NewTransaction;
    type Patch = TransactionPatch;

    fn fields() -> &'static FieldMap<Self::Entity> {
        &TRANSACTION_FIELDS
    }

    fn id_column() -> transaction::Column {
        transaction::Column::Id
    }

    fn owner_column() -> Option<transaction::Column> {
        Some(transaction::Column::UserId)
    }

    fn validate_new(new: &NewTransaction) -> Result<(), DomainError> {
        if !new.amount.is_finite() {
            return Err(DomainError::validation("amount", "must be a finite number"));
        }
        require_text("currency", &new.currency)?;
        require_text("status", &new.status)
    }

    fn active_model(new: NewTransaction, owner: Option<&str>) -> Self::ActiveModel {
        transaction::ActiveModel {
            id: NotSet,
            user_id: Set(owner_of(owner)),
            amount: Set(new.amount),
            currency: Set(new.currency),
            status: Set(new.status),
            payment_method: Set(new.payment_method),
            external_id: Set(new.external_id),
            description: Set(new.description),
            created_at: Set(Some(new.created_at.map_or_else(OffsetDateTime::now_utc, to_utc))),
        }
    }
}
