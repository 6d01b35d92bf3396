#![allow(clippy::unwrap_used, clippy::expect_used)]

use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use storefront_entities_sdk::{ListQuery, NewContactSubmission, NewPaymentSetting, NewTransaction};

use crate::domain::resource::Resource;
use crate::domain::service::{EntityService, ServiceConfig};

pub async fn inmem_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    crate::infra::storage::migrations::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn service<R: Resource>() -> EntityService<R> {
    EntityService::new(inmem_db().await, ServiceConfig::default())
}

/// Make the database reject `event` (`INSERT`, `UPDATE` or `DELETE`) on
/// `table` for rows matching `when`, the way a failing disk or constraint would.
pub async fn fail_writes(db: &DatabaseConnection, table: &str, event: &str, when: &str) {
    let sql = format!(
        "CREATE TRIGGER fail_{table}_{event} BEFORE {event} ON {table} \
         WHEN {when} BEGIN SELECT RAISE(ABORT, 'disk I/O error'); END"
    );
    db.execute_unprepared(&sql)
        .await
        .expect("Failed to install trigger");
}

#[must_use]
pub fn page(skip: u64, limit: u64) -> ListQuery {
    ListQuery {
        skip,
        limit,
        ..ListQuery::default()
    }
}

#[must_use]
pub fn new_contact(name: &str) -> NewContactSubmission {
    NewContactSubmission {
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase()),
        message: "Hello there".to_owned(),
        ..NewContactSubmission::default()
    }
}

#[must_use]
pub fn new_setting(provider: &str) -> NewPaymentSetting {
    NewPaymentSetting {
        provider: provider.to_owned(),
        public_key: Some("pk_test".to_owned()),
        secret_key: Some("sk_test".to_owned()),
        is_active: Some(true),
        environment: Some("sandbox".to_owned()),
        ..NewPaymentSetting::default()
    }
}

#[must_use]
pub fn new_transaction(amount: f64) -> NewTransaction {
    NewTransaction {
        amount,
        currency: "USD".to_owned(),
        status: "pending".to_owned(),
        ..NewTransaction::default()
    }
}
