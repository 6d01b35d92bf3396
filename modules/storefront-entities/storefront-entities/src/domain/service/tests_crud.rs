#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::json;
use storefront_entities_sdk::{ContactSubmissionPatch, NewContactSubmission, TransactionPatch};

use crate::domain::error::DomainError;
use crate::domain::service::{EntityService, ServiceConfig};
use crate::infra::storage::{ContactSubmissions, Transactions};
use crate::test_support::{fail_writes, inmem_db, new_contact, new_transaction, page, service};

#[tokio::test]
async fn create_then_get_round_trips() {
    let svc = service::<ContactSubmissions>().await;

    let created = svc
        .create(
            None,
            NewContactSubmission {
                phone: Some("+1 555 0100".to_owned()),
                ..new_contact("Ada")
            },
        )
        .await
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.name, "Ada");
    assert_eq!(created.email, "ada@example.com");
    assert_eq!(created.phone.as_deref(), Some("+1 555 0100"));
    assert!(created.created_at.is_some());

    let fetched = svc.get(None, created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_rejects_blank_required_fields() {
    let svc = service::<ContactSubmissions>().await;
    let err = svc
        .create(
            None,
            NewContactSubmission {
                message: String::new(),
                ..new_contact("Ada")
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "message"));
}

#[tokio::test]
async fn create_owner_scoped_without_owner_fails() {
    let svc = service::<Transactions>().await;
    let err = svc.create(None, new_transaction(10.0)).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn partial_update_preserves_untouched_fields() {
    let svc = service::<ContactSubmissions>().await;
    let created = svc.create(None, new_contact("Ada")).await.unwrap();

    let updated = svc
        .update(
            None,
            created.id,
            ContactSubmissionPatch {
                status: Some("read".to_owned()),
                ..ContactSubmissionPatch::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.status.as_deref(), Some("read"));
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.message, created.message);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn empty_update_returns_current_row() {
    let svc = service::<ContactSubmissions>().await;
    let created = svc.create(None, new_contact("Ada")).await.unwrap();

    let same = svc
        .update(None, created.id, ContactSubmissionPatch::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(same, created);
}

#[tokio::test]
async fn update_rejects_blanking_required_field() {
    let svc = service::<Transactions>().await;
    let created = svc
        .create(Some("alice"), new_transaction(5.0))
        .await
        .unwrap();

    let err = svc
        .update(
            Some("alice"),
            created.id,
            TransactionPatch {
                currency: Some("  ".to_owned()),
                ..TransactionPatch::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "currency"));

    let unchanged = svc.get(Some("alice"), created.id).await.unwrap().unwrap();
    assert_eq!(unchanged.currency, "USD");
}

#[tokio::test]
async fn update_missing_row_is_none() {
    let svc = service::<ContactSubmissions>().await;
    let res = svc
        .update(None, 999, ContactSubmissionPatch::default())
        .await
        .unwrap();
    assert!(res.is_none());
}

#[tokio::test]
async fn delete_twice() {
    let svc = service::<ContactSubmissions>().await;
    let created = svc.create(None, new_contact("Ada")).await.unwrap();

    assert!(svc.delete(None, created.id).await.unwrap());
    assert!(!svc.delete(None, created.id).await.unwrap());
    assert!(svc.get(None, created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn batch_create_skips_invalid_items() {
    let svc = service::<ContactSubmissions>().await;
    let created = svc
        .create_many(
            None,
            vec![
                new_contact("Ada"),
                NewContactSubmission {
                    name: String::new(),
                    ..new_contact("Nobody")
                },
                new_contact("Grace"),
            ],
        )
        .await
        .unwrap();
    let names: Vec<_> = created.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Ada", "Grace"]);
}

#[tokio::test]
async fn batch_update_skips_missing_ids() {
    let svc = service::<ContactSubmissions>().await;
    let created = svc.create(None, new_contact("Ada")).await.unwrap();

    let patch = || ContactSubmissionPatch {
        status: Some("archived".to_owned()),
        ..ContactSubmissionPatch::default()
    };
    let updated = svc
        .update_many(None, vec![(created.id, patch()), (created.id + 100, patch())])
        .await
        .unwrap();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].id, created.id);
    assert_eq!(updated[0].status.as_deref(), Some("archived"));
}

#[tokio::test]
async fn batch_delete_counts_successes() {
    let svc = service::<ContactSubmissions>().await;
    let a = svc.create(None, new_contact("Ada")).await.unwrap();
    let b = svc.create(None, new_contact("Grace")).await.unwrap();

    let deleted = svc.delete_many(None, &[a.id, b.id, 12345]).await.unwrap();
    assert_eq!(deleted, 2);
}

#[tokio::test]
async fn find_and_list_by_field() {
    let svc = service::<ContactSubmissions>().await;
    let first = svc.create(None, new_contact("Ada")).await.unwrap();
    let second = svc.create(None, new_contact("Ada")).await.unwrap();
    svc.create(None, new_contact("Grace")).await.unwrap();

    let found = svc
        .find_by_field(None, "name", &json!("Ada"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, first.id);

    let listed = svc
        .list_by_field(None, "name", &json!("Ada"), 0, 20)
        .await
        .unwrap();
    let ids: Vec<_> = listed.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    assert!(
        svc.find_by_field(None, "name", &json!("Linus"))
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn lookup_by_unknown_field_is_validation_error() {
    let svc = service::<ContactSubmissions>().await;
    let err = svc
        .find_by_field(None, "nickname", &json!("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));

    let err = svc
        .list_by_field(None, "nickname", &json!("x"), 0, 20)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn storage_failure_aborts_batch_create_and_keeps_earlier_rows() {
    let db = inmem_db().await;
    fail_writes(&db, "contact_submissions", "INSERT", "NEW.name = 'Boom'").await;
    let svc = EntityService::<ContactSubmissions>::new(db, ServiceConfig::default());

    let items = vec![
        new_contact("Ada"),
        // expected failure: skipped
        new_contact(" "),
        new_contact("Grace"),
        new_contact("Boom"),
        new_contact("Linus"),
    ];
    let err = svc.create_many(None, items).await.unwrap_err();
    assert!(matches!(err, DomainError::Database { .. }), "{err}");
    assert!(!err.is_expected());

    let stored = svc.list(None, &page(0, 20)).await.unwrap();
    let mut names: Vec<_> = stored.items.iter().map(|c| c.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["Ada", "Grace"]);
}

#[tokio::test]
async fn storage_failure_rolls_back_the_failing_update() {
    let db = inmem_db().await;
    fail_writes(&db, "transactions", "UPDATE", "NEW.status = 'refunded'").await;
    let svc = EntityService::<Transactions>::new(db, ServiceConfig::default());

    let first = svc.create(Some("alice"), new_transaction(1.0)).await.unwrap();
    let second = svc.create(Some("alice"), new_transaction(2.0)).await.unwrap();
    let third = svc.create(Some("alice"), new_transaction(3.0)).await.unwrap();

    let status = |s: &str| TransactionPatch {
        status: Some(s.to_owned()),
        ..TransactionPatch::default()
    };
    let err = svc
        .update_many(
            Some("alice"),
            vec![
                (first.id, status("paid")),
                (second.id, status("refunded")),
                (third.id, status("paid")),
            ],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Database { .. }), "{err}");

    let get = |id| svc.get(Some("alice"), id);
    assert_eq!(get(first.id).await.unwrap().unwrap().status, "paid");
    assert_eq!(get(second.id).await.unwrap().unwrap().status, "pending");
    assert_eq!(get(third.id).await.unwrap().unwrap().status, "pending");
}

#[tokio::test]
async fn storage_failure_aborts_batch_delete() {
    let db = inmem_db().await;
    let svc = EntityService::<ContactSubmissions>::new(db.clone(), ServiceConfig::default());
    let a = svc.create(None, new_contact("Ada")).await.unwrap();
    let b = svc.create(None, new_contact("Grace")).await.unwrap();
    let c = svc.create(None, new_contact("Linus")).await.unwrap();
    fail_writes(&db, "contact_submissions", "DELETE", &format!("OLD.id = {}", b.id)).await;

    let err = svc.delete_many(None, &[a.id, b.id, c.id]).await.unwrap_err();
    assert!(matches!(err, DomainError::Database { .. }), "{err}");

    assert!(svc.get(None, a.id).await.unwrap().is_none());
    assert!(svc.get(None, b.id).await.unwrap().is_some());
    assert!(svc.get(None, c.id).await.unwrap().is_some());
}
