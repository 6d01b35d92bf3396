#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use storefront_entities::ServiceConfig;
use storefront_entities::api::rest::auth::StaticTokenValidator;
use storefront_entities::api::rest::routes::router;
use storefront_entities::infra::storage::migrations::Migrator;
use tower::ServiceExt;

pub const ALICE: &str = "tok-alice";
pub const BOB: &str = "tok-bob";

pub async fn app() -> Router {
    app_with_db().await.0
}

/// The router plus a handle on its database, for tests that tamper with storage.
pub async fn app_with_db() -> (Router, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let validator = StaticTokenValidator::new(HashMap::from([
        (ALICE.to_owned(), "alice".to_owned()),
        (BOB.to_owned(), "bob".to_owned()),
    ]));
    let app = router(&db, &ServiceConfig::default(), Arc::new(validator));
    (app, db)
}

/// Make inserts into `table` fail for rows matching `when`.
pub async fn fail_inserts(db: &DatabaseConnection, table: &str, when: &str) {
    let sql = format!(
        "CREATE TRIGGER fail_{table}_insert BEFORE INSERT ON {table} \
         WHEN {when} BEGIN SELECT RAISE(ABORT, 'disk I/O error'); END"
    );
    db.execute_unprepared(&sql).await.unwrap();
}

pub struct Reply {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Value,
}

pub async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Reply {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(json) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_owned());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    Reply {
        status,
        content_type,
        body,
    }
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> Reply {
    call(app, Method::GET, uri, token, None).await
}

pub async fn post(app: &Router, uri: &str, token: Option<&str>, body: Value) -> Reply {
    call(app, Method::POST, uri, token, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, token: Option<&str>, body: Value) -> Reply {
    call(app, Method::PUT, uri, token, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> Reply {
    call(app, Method::DELETE, uri, token, None).await
}

/// Create a record and return its id.
pub async fn create(app: &Router, entity: &str, token: Option<&str>, body: Value) -> i64 {
    let reply = post(app, &format!("/api/v1/entities/{entity}"), token, body).await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    reply.body["id"].as_i64().unwrap()
}

pub fn ids(page: &Value) -> Vec<i64> {
    page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}
