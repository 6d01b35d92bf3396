#![allow(clippy::unwrap_used, clippy::expect_used)]

use storefront_entities_sdk::{PaymentSettingPatch, TransactionPatch};

use crate::infra::storage::{ContactSubmissions, PaymentSettings, Transactions};
use crate::test_support::{new_contact, new_setting, new_transaction, page, service};

#[tokio::test]
async fn owner_is_stamped_from_caller() {
    let svc = service::<PaymentSettings>().await;
    let created = svc.create(Some("alice"), new_setting("stripe")).await.unwrap();
    assert_eq!(created.user_id, "alice");
    assert!(created.created_at.is_some());
    assert!(created.updated_at.is_some());
}

#[tokio::test]
async fn other_owner_sees_nothing() {
    let svc = service::<PaymentSettings>().await;
    let row = svc.create(Some("alice"), new_setting("stripe")).await.unwrap();

    assert!(svc.get(Some("bob"), row.id).await.unwrap().is_none());

    let listed = svc.list(Some("bob"), &page(0, 20)).await.unwrap();
    assert_eq!(listed.total, 0);
    assert!(listed.items.is_empty());

    let patch = PaymentSettingPatch {
        provider: Some("paypal".to_owned()),
        ..PaymentSettingPatch::default()
    };
    assert!(svc.update(Some("bob"), row.id, patch).await.unwrap().is_none());
    assert!(!svc.delete(Some("bob"), row.id).await.unwrap());

    // still intact for the real owner
    let mine = svc.get(Some("alice"), row.id).await.unwrap().unwrap();
    assert_eq!(mine.provider, "stripe");
}

#[tokio::test]
async fn unscoped_listing_sees_every_owner() {
    let svc = service::<Transactions>().await;
    svc.create(Some("alice"), new_transaction(1.0)).await.unwrap();
    svc.create(Some("bob"), new_transaction(2.0)).await.unwrap();

    assert_eq!(svc.list(Some("alice"), &page(0, 20)).await.unwrap().total, 1);
    assert_eq!(svc.list(None, &page(0, 20)).await.unwrap().total, 2);
}

#[tokio::test]
async fn owner_cannot_be_reassigned_by_update() {
    let svc = service::<Transactions>().await;
    let row = svc.create(Some("alice"), new_transaction(9.5)).await.unwrap();

    let updated = svc
        .update(
            Some("alice"),
            row.id,
            TransactionPatch {
                status: Some("settled".to_owned()),
                ..TransactionPatch::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.user_id, "alice");
    assert_eq!(updated.status, "settled");
    assert!((updated.amount - 9.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn update_refreshes_updated_at() {
    let svc = service::<PaymentSettings>().await;
    let row = svc.create(Some("alice"), new_setting("stripe")).await.unwrap();

    let updated = svc
        .update(
            Some("alice"),
            row.id,
            PaymentSettingPatch {
                is_active: Some(false),
                ..PaymentSettingPatch::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.is_active, Some(false));
    assert!(updated.updated_at >= row.updated_at);
    assert_eq!(updated.created_at, row.created_at);
}

#[tokio::test]
async fn batch_operations_respect_ownership() {
    let svc = service::<Transactions>().await;
    let mine = svc.create(Some("alice"), new_transaction(1.0)).await.unwrap();
    let theirs = svc.create(Some("bob"), new_transaction(2.0)).await.unwrap();

    let patch = || TransactionPatch {
        status: Some("refunded".to_owned()),
        ..TransactionPatch::default()
    };
    let updated = svc
        .update_many(Some("alice"), vec![(mine.id, patch()), (theirs.id, patch())])
        .await
        .unwrap();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].id, mine.id);

    let deleted = svc
        .delete_many(Some("alice"), &[mine.id, theirs.id])
        .await
        .unwrap();
    assert_eq!(deleted, 1);
    assert!(svc.get(Some("bob"), theirs.id).await.unwrap().is_some());
}

#[tokio::test]
async fn ownership_check() {
    let svc = service::<PaymentSettings>().await;
    let row = svc.create(Some("alice"), new_setting("stripe")).await.unwrap();

    assert!(svc.is_owned_by(row.id, "alice").await.unwrap());
    assert!(!svc.is_owned_by(row.id, "bob").await.unwrap());
    assert!(!svc.is_owned_by(row.id + 1, "alice").await.unwrap());
}

#[tokio::test]
async fn public_rows_have_no_owner() {
    let svc = service::<ContactSubmissions>().await;
    let row = svc.create(None, new_contact("Ada")).await.unwrap();
    assert!(!svc.is_owned_by(row.id, "alice").await.unwrap());
}
