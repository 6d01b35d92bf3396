//! REST surface of each resource: URL segment and wire DTOs.

use serde::Serialize;
use serde::de::DeserializeOwned;
use utoipa::ToSchema;

use super::dto::{
    ContactSubmissionDto, CreateContactSubmissionReq, CreatePaymentSettingReq,
    CreateTransactionReq, PaymentSettingDto, TransactionDto, UpdateContactSubmissionReq,
    UpdatePaymentSettingReq, UpdateTransactionReq,
};
use crate::domain::resource::Resource;
use crate::infra::storage::{ContactSubmissions, PaymentSettings, Transactions};

/// A [`Resource`] exposed over REST under `/api/v1/entities/{PATH}`.
pub trait RestResource: Resource {
    const PATH: &'static str;
    /// OpenAPI tag.
    const TAG: &'static str;

    type Dto: From<Self::Record> + Serialize + ToSchema + Send + 'static;
    type CreateReq: Into<Self::New> + DeserializeOwned + ToSchema + Send + 'static;
    type UpdateReq: Into<Self::Patch> + DeserializeOwned + ToSchema + Send + 'static;
}

impl RestResource for ContactSubmissions {
    const PATH: &'static str = "contact_submissions";
    const TAG: &'static str = "Contact Submissions";

    type Dto = ContactSubmissionDto;
    type CreateReq = CreateContactSubmissionReq;
    type UpdateReq = UpdateContactSubmissionReq;
}

impl RestResource for PaymentSettings {
    const PATH: &'static str = "payment_settings";
    const TAG: &'static str = "Payment Settings";

    type Dto = PaymentSettingDto;
    type CreateReq = CreatePaymentSettingReq;
    type UpdateReq = UpdatePaymentSettingReq;
}

impl RestResource for Transactions {
    const PATH: &'static str = "transactions";
    const TAG: &'static str = "Transactions";

    type Dto = TransactionDto;
    type CreateReq = CreateTransactionReq;
    type UpdateReq = UpdateTransactionReq;
}
