use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Extension, OriginalUri, Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use storefront_entities_sdk::{ListQuery, SortSpec};
use tracing::{field::Empty, info};

use super::auth::{MaybeCaller, owner_for};
use super::binding::RestResource;
use super::dto::{
    BatchCreateReq, BatchDeleteReq, BatchDeleteResponse, BatchUpdateReq, DeleteResponse,
    HealthDto, ListParams, PageDto,
};
use super::error::{ApiResult, bad_request, domain_error_to_problem};
use crate::domain::error::DomainError;
use crate::domain::service::{EntityService, ServiceConfig};

type Svc<B> = Extension<Arc<EntityService<B>>>;

fn list_query(params: ListParams, cfg: &ServiceConfig) -> ListQuery {
    ListQuery {
        filter: params.query,
        sort: params.sort.as_deref().and_then(SortSpec::parse),
        skip: params.skip.unwrap_or(0),
        limit: params.limit.unwrap_or(cfg.default_page_size),
    }
}

/// List rows visible to the caller with filtering, sorting and pagination
#[tracing::instrument(skip_all, fields(entity = B::PATH, user.id = Empty))]
pub async fn list<B: RestResource>(
    Extension(svc): Svc<B>,
    MaybeCaller(caller): MaybeCaller,
    OriginalUri(uri): OriginalUri,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<PageDto<B::Dto>>> {
    let instance = uri.path();
    let Query(params) = params.map_err(|e| bad_request(e.body_text(), instance))?;
    let owner = owner_for::<B>(caller.as_ref(), instance)?;
    if let Some(owner) = owner {
        tracing::Span::current().record("user.id", owner);
    }

    let query = list_query(params, svc.config());
    let page = svc
        .list(owner, &query)
        .await
        .map_err(|e| domain_error_to_problem(&e, instance))?;
    Ok(Json(page.into()))
}

/// List rows across every owner
#[tracing::instrument(skip_all, fields(entity = B::PATH))]
pub async fn list_all<B: RestResource>(
    Extension(svc): Svc<B>,
    OriginalUri(uri): OriginalUri,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<PageDto<B::Dto>>> {
    let instance = uri.path();
    let Query(params) = params.map_err(|e| bad_request(e.body_text(), instance))?;

    let query = list_query(params, svc.config());
    let page = svc
        .list(None, &query)
        .await
        .map_err(|e| domain_error_to_problem(&e, instance))?;
    Ok(Json(page.into()))
}

#[tracing::instrument(skip_all, fields(entity = B::PATH, id = Empty))]
pub async fn get<B: RestResource>(
    Extension(svc): Svc<B>,
    MaybeCaller(caller): MaybeCaller,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<B::Dto>> {
    let instance = uri.path();
    let Path(id) = id.map_err(|e| bad_request(e.body_text(), instance))?;
    tracing::Span::current().record("id", id);
    let owner = owner_for::<B>(caller.as_ref(), instance)?;

    let found = svc
        .get(owner, id)
        .await
        .map_err(|e| domain_error_to_problem(&e, instance))?;
    match found {
        Some(record) => Ok(Json(B::Dto::from(record))),
        None => Err(domain_error_to_problem(
            &DomainError::not_found(B::LABEL, id),
            instance,
        )),
    }
}

#[tracing::instrument(skip_all, fields(entity = B::PATH))]
pub async fn create<B: RestResource>(
    Extension(svc): Svc<B>,
    MaybeCaller(caller): MaybeCaller,
    OriginalUri(uri): OriginalUri,
    body: Result<Json<B::CreateReq>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let instance = uri.path();
    let owner = owner_for::<B>(caller.as_ref(), instance)?;
    let Json(req) = body.map_err(|e| bad_request(e.body_text(), instance))?;

    let record = svc
        .create(owner, req.into())
        .await
        .map_err(|e| domain_error_to_problem(&e, instance))?;
    info!("Created {}", B::LABEL);
    Ok((StatusCode::CREATED, Json(B::Dto::from(record))))
}

#[tracing::instrument(skip_all, fields(entity = B::PATH))]
pub async fn create_batch<B: RestResource>(
    Extension(svc): Svc<B>,
    MaybeCaller(caller): MaybeCaller,
    OriginalUri(uri): OriginalUri,
    body: Result<Json<BatchCreateReq<B::CreateReq>>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let instance = uri.path();
    let owner = owner_for::<B>(caller.as_ref(), instance)?;
    let Json(req) = body.map_err(|e| bad_request(e.body_text(), instance))?;

    let items = req.items.into_iter().map(Into::into).collect();
    let created = svc
        .create_many(owner, items)
        .await
        .map_err(|e| domain_error_to_problem(&e, instance))?;
    let dtos: Vec<B::Dto> = created.into_iter().map(B::Dto::from).collect();
    Ok((StatusCode::CREATED, Json(dtos)))
}

#[tracing::instrument(skip_all, fields(entity = B::PATH, id = Empty))]
pub async fn update<B: RestResource>(
    Extension(svc): Svc<B>,
    MaybeCaller(caller): MaybeCaller,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<B::UpdateReq>, JsonRejection>,
) -> ApiResult<Json<B::Dto>> {
    let instance = uri.path();
    let Path(id) = id.map_err(|e| bad_request(e.body_text(), instance))?;
    tracing::Span::current().record("id", id);
    let owner = owner_for::<B>(caller.as_ref(), instance)?;
    let Json(req) = body.map_err(|e| bad_request(e.body_text(), instance))?;

    let updated = svc
        .update(owner, id, req.into())
        .await
        .map_err(|e| domain_error_to_problem(&e, instance))?;
    match updated {
        Some(record) => Ok(Json(B::Dto::from(record))),
        None => Err(domain_error_to_problem(
            &DomainError::not_found(B::LABEL, id),
            instance,
        )),
    }
}

#[tracing::instrument(skip_all, fields(entity = B::PATH))]
pub async fn update_batch<B: RestResource>(
    Extension(svc): Svc<B>,
    MaybeCaller(caller): MaybeCaller,
    OriginalUri(uri): OriginalUri,
    body: Result<Json<BatchUpdateReq<B::UpdateReq>>, JsonRejection>,
) -> ApiResult<Json<Vec<B::Dto>>> {
    let instance = uri.path();
    let owner = owner_for::<B>(caller.as_ref(), instance)?;
    let Json(req) = body.map_err(|e| bad_request(e.body_text(), instance))?;

    let items = req
        .items
        .into_iter()
        .map(|item| (item.id, item.updates.into()))
        .collect();
    let updated = svc
        .update_many(owner, items)
        .await
        .map_err(|e| domain_error_to_problem(&e, instance))?;
    Ok(Json(updated.into_iter().map(B::Dto::from).collect()))
}

#[tracing::instrument(skip_all, fields(entity = B::PATH, id = Empty))]
pub async fn delete<B: RestResource>(
    Extension(svc): Svc<B>,
    MaybeCaller(caller): MaybeCaller,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<DeleteResponse>> {
    let instance = uri.path();
    let Path(id) = id.map_err(|e| bad_request(e.body_text(), instance))?;
    tracing::Span::current().record("id", id);
    let owner = owner_for::<B>(caller.as_ref(), instance)?;

    let deleted = svc
        .delete(owner, id)
        .await
        .map_err(|e| domain_error_to_problem(&e, instance))?;
    if !deleted {
        return Err(domain_error_to_problem(
            &DomainError::not_found(B::LABEL, id),
            instance,
        ));
    }
    Ok(Json(DeleteResponse {
        message: format!("{} deleted successfully", B::LABEL),
        id,
    }))
}

#[tracing::instrument(skip_all, fields(entity = B::PATH))]
pub async fn delete_batch<B: RestResource>(
    Extension(svc): Svc<B>,
    MaybeCaller(caller): MaybeCaller,
    OriginalUri(uri): OriginalUri,
    body: Result<Json<BatchDeleteReq>, JsonRejection>,
) -> ApiResult<Json<BatchDeleteResponse>> {
    let instance = uri.path();
    let owner = owner_for::<B>(caller.as_ref(), instance)?;
    let Json(req) = body.map_err(|e| bad_request(e.body_text(), instance))?;

    let deleted_count = svc
        .delete_many(owner, &req.ids)
        .await
        .map_err(|e| domain_error_to_problem(&e, instance))?;
    Ok(Json(BatchDeleteResponse {
        message: format!("Successfully deleted {deleted_count} {}", B::PATH),
        deleted_count,
    }))
}

#[allow(clippy::unused_async)] // axum handlers are async fns
pub async fn health() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_owned(),
    })
}
