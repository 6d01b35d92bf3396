use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Json, Router, middleware};
use sea_orm::DatabaseConnection;

use super::auth::{TokenValidator, resolve_caller};
use super::binding::RestResource;
use super::handlers;
use super::openapi::{API_PREFIX, api_doc};
use crate::domain::service::{EntityService, ServiceConfig};
use crate::infra::storage::{ContactSubmissions, PaymentSettings, Transactions};

/// Build the module's HTTP surface: entity routes, `/health` and `/openapi.json`.
///
/// Every request passes through [`resolve_caller`] first.
#[must_use]
pub fn router(
    db: &DatabaseConnection,
    cfg: &ServiceConfig,
    validator: Arc<dyn TokenValidator>,
) -> Router {
    let doc = Arc::new(api_doc());

    let router = Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/openapi.json",
            get(move || {
                let doc = Arc::clone(&doc);
                async move { Json(doc.as_ref().clone()) }
            }),
        );

    let router = mount::<ContactSubmissions>(router, db, cfg);
    let router = mount::<PaymentSettings>(router, db, cfg);
    let router = mount::<Transactions>(router, db, cfg);

    router.layer(middleware::from_fn_with_state(validator, resolve_caller))
}

fn mount<B: RestResource>(router: Router, db: &DatabaseConnection, cfg: &ServiceConfig) -> Router {
    let base = format!("{API_PREFIX}/{}", B::PATH);
    let service = Arc::new(EntityService::<B>::new(db.clone(), cfg.clone()));
    tracing::debug!(path = %base, entity = B::LABEL, "mounting entity routes");

    router
        .route(&base, get(handlers::list::<B>).post(handlers::create::<B>))
        .route(&format!("{base}/all"), get(handlers::list_all::<B>))
        .route(
            &format!("{base}/batch"),
            post(handlers::create_batch::<B>)
                .put(handlers::update_batch::<B>)
                .delete(handlers::delete_batch::<B>),
        )
        .route(
            &format!("{base}/{{id}}"),
            get(handlers::get::<B>)
                .put(handlers::update::<B>)
                .delete(handlers::delete::<B>),
        )
        .layer(Extension(service))
}
