#![allow(clippy::unwrap_used, clippy::expect_used)]

use storefront_entities_sdk::{ListQuery, NewContactSubmission, SortSpec};
use time::macros::datetime;

use crate::domain::error::DomainError;
use crate::domain::service::{EntityService, ServiceConfig};
use crate::infra::storage::{ContactSubmissions, PaymentSettings, Transactions};
use crate::test_support::{inmem_db, new_contact, new_setting, new_transaction, page, service};

fn filtered(filter: &str) -> ListQuery {
    ListQuery {
        filter: Some(filter.to_owned()),
        ..page(0, 20)
    }
}

fn sorted(token: &str) -> ListQuery {
    ListQuery {
        sort: SortSpec::parse(token),
        ..page(0, 20)
    }
}

#[tokio::test]
async fn pages_cover_every_row_once() {
    let svc = service::<Transactions>().await;
    for i in 0..7_i32 {
        svc.create(Some("alice"), new_transaction(f64::from(i)))
            .await
            .unwrap();
    }

    let mut seen = Vec::new();
    for skip in (0..7).step_by(3) {
        let page = svc.list(Some("alice"), &page(skip, 3)).await.unwrap();
        assert_eq!(page.total, 7);
        assert_eq!(page.skip, skip);
        assert_eq!(page.limit, 3);
        seen.extend(page.items.into_iter().map(|t| t.id));
    }
    assert_eq!(seen.len(), 7);
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 7);
}

#[tokio::test]
async fn default_order_is_id_descending() {
    let svc = service::<ContactSubmissions>().await;
    for name in ["Ada", "Grace", "Linus"] {
        svc.create(None, new_contact(name)).await.unwrap();
    }
    let page = svc.list(None, &page(0, 20)).await.unwrap();
    let ids: Vec<_> = page.items.iter().map(|c| c.id).collect();
    assert!(ids.windows(2).all(|w| w[0] > w[1]), "{ids:?}");

    let unknown = svc.list(None, &sorted("-favourite_colour")).await.unwrap();
    let unknown_ids: Vec<_> = unknown.items.iter().map(|c| c.id).collect();
    assert_eq!(unknown_ids, ids);
}

#[tokio::test]
async fn sort_by_created_at_descending() {
    let svc = service::<ContactSubmissions>().await;
    let stamps = [
        datetime!(2024-03-01 12:00 UTC),
        datetime!(2024-01-01 12:00 UTC),
        datetime!(2024-02-01 12:00 UTC),
    ];
    for (i, at) in stamps.into_iter().enumerate() {
        svc.create(
            None,
            NewContactSubmission {
                created_at: Some(at),
                ..new_contact(&format!("user{i}"))
            },
        )
        .await
        .unwrap();
    }

    let page = svc.list(None, &sorted("-created_at")).await.unwrap();
    let times: Vec<_> = page.items.iter().map(|c| c.created_at.unwrap()).collect();
    assert_eq!(times.len(), 3);
    assert!(times.windows(2).all(|w| w[0] >= w[1]), "{times:?}");

    let page = svc.list(None, &sorted("name")).await.unwrap();
    let names: Vec<_> = page.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["user0", "user1", "user2"]);
}

#[tokio::test]
async fn equality_filter_narrows_total() {
    let svc = service::<PaymentSettings>().await;
    svc.create(Some("alice"), new_setting("stripe")).await.unwrap();
    svc.create(Some("alice"), new_setting("paypal")).await.unwrap();
    svc.create(
        Some("alice"),
        storefront_entities_sdk::NewPaymentSetting {
            is_active: Some(false),
            ..new_setting("stripe")
        },
    )
    .await
    .unwrap();

    let page = svc
        .list(Some("alice"), &filtered(r#"{"provider":"stripe"}"#))
        .await
        .unwrap();
    assert_eq!(page.total, 2);

    let page = svc
        .list(
            Some("alice"),
            &filtered(r#"{"provider":"stripe","is_active":true}"#),
        )
        .await
        .unwrap();
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn unknown_filter_key_is_ignored() {
    let svc = service::<ContactSubmissions>().await;
    svc.create(None, new_contact("Ada")).await.unwrap();
    svc.create(None, new_contact("Grace")).await.unwrap();

    let plain = svc.list(None, &page(0, 20)).await.unwrap();
    let with_junk = svc
        .list(None, &filtered(r#"{"nonexistent_field":1}"#))
        .await
        .unwrap();
    assert_eq!(plain, with_junk);
}

#[tokio::test]
async fn null_filter_matches_missing_values() {
    let svc = service::<ContactSubmissions>().await;
    svc.create(None, new_contact("Ada")).await.unwrap();
    svc.create(
        None,
        NewContactSubmission {
            phone: Some("+44 20 7946 0000".to_owned()),
            ..new_contact("Grace")
        },
    )
    .await
    .unwrap();

    let page = svc.list(None, &filtered(r#"{"phone":null}"#)).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].name, "Ada");
}

#[tokio::test]
async fn bad_filters_and_limits_are_validation_errors() {
    let svc = service::<PaymentSettings>().await;

    for bad in ["{oops", "[]", r#"{"is_active":"yes"}"#] {
        let err = svc.list(Some("alice"), &filtered(bad)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }), "{bad}");
    }

    let err = svc.list(Some("alice"), &page(0, 0)).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "limit"));
    let err = svc.list(Some("alice"), &page(0, 2001)).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn max_page_size_comes_from_config() {
    let svc = EntityService::<ContactSubmissions>::new(
        inmem_db().await,
        ServiceConfig {
            default_page_size: 5,
            max_page_size: 10,
        },
    );
    assert!(svc.list(None, &page(0, 10)).await.is_ok());
    assert!(svc.list(None, &page(0, 11)).await.is_err());
}

#[tokio::test]
async fn skip_beyond_signed_range_is_validation_error() {
    let svc = service::<ContactSubmissions>().await;
    svc.create(None, new_contact("Ada")).await.unwrap();

    let beyond = i64::MAX.unsigned_abs() + 1;
    for skip in [beyond, u64::MAX] {
        let err = svc.list(None, &page(skip, 20)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "skip"));

        let err = svc
            .list_by_field(None, "name", &serde_json::json!("Ada"), skip, 20)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "skip"));
    }

    let far = svc.list(None, &page(i64::MAX.unsigned_abs(), 20)).await.unwrap();
    assert_eq!(far.total, 1);
    assert!(far.items.is_empty());
}

#[tokio::test]
async fn timestamp_filter_matches_same_instant_in_any_offset() {
    let svc = service::<ContactSubmissions>().await;
    let created = svc
        .create(
            None,
            NewContactSubmission {
                created_at: Some(datetime!(2024-05-01 12:00 +02:00)),
                ..new_contact("Ada")
            },
        )
        .await
        .unwrap();
    let stamp = created.created_at.unwrap();
    assert_eq!(stamp, datetime!(2024-05-01 10:00 UTC));
    assert_eq!(stamp.offset(), time::UtcOffset::UTC);

    for filter in [
        r#"{"created_at":"2024-05-01T10:00:00Z"}"#,
        r#"{"created_at":"2024-05-01T12:00:00+02:00"}"#,
        r#"{"created_at":"2024-05-01T05:00:00-05:00"}"#,
    ] {
        let page = svc.list(None, &filtered(filter)).await.unwrap();
        assert_eq!(page.total, 1, "{filter}");
    }
}
