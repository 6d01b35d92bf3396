use serde::{Deserialize, Serialize};
use storefront_entities_sdk::{
    ContactSubmission, ContactSubmissionPatch, NewContactSubmission, NewPaymentSetting,
    NewTransaction, Page, PaymentSetting, PaymentSettingPatch, Transaction, TransactionPatch,
};
use time::OffsetDateTime;
use utoipa::{IntoParams, ToSchema};

// ==================== Contact submission DTOs ====================

/// REST DTO for a contact form submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactSubmissionDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

/// REST DTO for creating a contact submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateContactSubmissionReq {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

/// REST DTO for updating a contact submission (partial)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateContactSubmissionReq {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub status: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl From<ContactSubmission> for ContactSubmissionDto {
    fn from(c: ContactSubmission) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            phone: c.phone,
            message: c.message,
            status: c.status,
            created_at: c.created_at,
        }
    }
}

impl From<CreateContactSubmissionReq> for NewContactSubmission {
    fn from(req: CreateContactSubmissionReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            message: req.message,
            status: req.status,
            created_at: req.created_at,
        }
    }
}

impl From<UpdateContactSubmissionReq> for ContactSubmissionPatch {
    fn from(req: UpdateContactSubmissionReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            message: req.message,
            status: req.status,
            created_at: req.created_at,
        }
    }
}

// ==================== Payment setting DTOs ====================

/// REST DTO for a payment provider setting
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentSettingDto {
    pub id: i32,
    pub user_id: String,
    pub provider: String,
    pub public_key: Option<String>,
    pub secret_key: Option<String>,
    pub is_active: Option<bool>,
    pub environment: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

/// REST DTO for creating a payment setting; the owner comes from the caller
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentSettingReq {
    pub provider: String,
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

/// REST DTO for updating a payment setting (partial)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdatePaymentSettingReq {
    pub provider: Option<String>,
    pub public_key: Option<String>,
    pub secret_key: Option<String>,
    pub is_active: Option<bool>,
    pub environment: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl From<PaymentSetting> for PaymentSettingDto {
    fn from(p: PaymentSetting) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            provider: p.provider,
            public_key: p.public_key,
            secret_key: p.secret_key,
            is_active: p.is_active,
            environment: p.environment,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<CreatePaymentSettingReq> for NewPaymentSetting {
    fn from(req: CreatePaymentSettingReq) -> Self {
        Self {
            provider: req.provider,
            public_key: req.public_key,
            secret_key: req.secret_key,
            is_active: req.is_active,
            environment: req.environment,
            created_at: req.created_at,
            updated_at: req.updated_at,
        }
    }
}

impl From<UpdatePaymentSettingReq> for PaymentSettingPatch {
    fn from(req: UpdatePaymentSettingReq) -> Self {
        Self {
            provider: req.provider,
            public_key: req.public_key,
            secret_key: req.secret_key,
            is_active: req.is_active,
            environment: req.environment,
            created_at: req.created_at,
            updated_at: req.updated_at,
        }
    }
}

// ==================== Transaction DTOs ====================

/// REST DTO for a payment transaction
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionDto {
    pub id: i32,
    pub user_id: String,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub payment_method: Option<String>,
    pub external_id: Option<String>,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

/// REST DTO for creating a transaction; the owner comes from the caller
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTransactionReq {
    pub amount: f64,
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

/// REST DTO for updating a transaction (partial)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateTransactionReq {
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub external_id: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl From<Transaction> for TransactionDto {
    fn from(t: Transaction) -> Self {
        Self {
            id: t.id,
            user_id: t.user_id,
            amount: t.amount,
            currency: t.currency,
            status: t.status,
            payment_method: t.payment_method,
            external_id: t.external_id,
            description: t.description,
            created_at: t.created_at,
        }
    }
}

impl From<CreateTransactionReq> for NewTransaction {
    fn from(req: CreateTransactionReq) -> Self {
        Self {
            amount: req.amount,
            currency: req.currency,
            status: req.status,
            payment_method: req.payment_method,
            external_id: req.external_id,
            description: req.description,
            created_at: req.created_at,
        }
    }
}

impl From<UpdateTransactionReq> for TransactionPatch {
    fn from(req: UpdateTransactionReq) -> Self {
        Self {
            amount: req.amount,
            currency: req.currency,
            status: req.status,
            payment_method: req.payment_method,
            external_id: req.external_id,
            description: req.description,
            created_at: req.created_at,
        }
    }
}

// ==================== Shared envelopes ====================

/// List query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// JSON object of field → value equality constraints
    pub query: Option<String>,
    /// Sort field; prefix with `-` for descending
    pub sort: Option<String>,
    /// Rows to skip (default 0)
    pub skip: Option<u64>,
    /// Page size (default 20)
    pub limit: Option<u64>,
    /// Accepted for compatibility; not applied
    pub fields: Option<String>,
}

/// One page of results. Documented per entity as `{Dto}Page`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDto<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

impl<R, T: From<R>> From<Page<R>> for PageDto<T> {
    fn from(page: Page<R>) -> Self {
        let page = page.map_items(T::from);
        Self {
            items: page.items,
            total: page.total,
            skip: page.skip,
            limit: page.limit,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchCreateReq<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchUpdateItem<U> {
    pub id: i32,
    pub updates: U,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchUpdateReq<U> {
    pub items: Vec<BatchUpdateItem<U>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatchDeleteReq {
    pub ids: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
    pub id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatchDeleteResponse {
    pub message: String,
    pub deleted_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthDto {
    pub status: String,
}
