//! Product routes.
//!
//! ```text
//! GET    /products                      list
//! POST   /products                      create
//! GET    /products/search?priceGt=X     price search
//! GET    /products/total?list=[1,2,3]   total price quote
//! GET    /products/:id                  get
//! PUT    /products/:id                  full update
//! PATCH  /products/:id                  patch
//! DELETE /products/:id                  delete
//! *      /products/code/:code_value     same as /:id, keyed by code value
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use shelf_core::{NewProduct, Product, ProductKey, ProductPatch};
use shelf_service::ProductService;
use shelf_store::ProductStore;

use crate::error::{ApiError, ApiResult};

type Service<S> = State<Arc<ProductService<S>>>;

// ─────────────────────────────────────────────────────────────────────────────
// Response Envelope
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

fn data<T: Serialize>(value: T) -> Json<Data<T>> {
    Json(Data { data: value })
}

// ─────────────────────────────────────────────────────────────────────────────
// Router
// ─────────────────────────────────────────────────────────────────────────────

pub fn router<S: ProductStore + 'static>() -> Router<Arc<ProductService<S>>> {
    Router::new()
        .route("/", get(list::<S>).post(create::<S>))
        .route("/search", get(search::<S>))
        .route("/total", get(total::<S>))
        .route(
            "/:id",
            get(get_by_id::<S>)
                .put(replace_by_id::<S>)
                .patch(patch_by_id::<S>)
                .delete(delete_by_id::<S>),
        )
        .route(
            "/code/:code_value",
            get(get_by_code::<S>)
                .put(replace_by_code::<S>)
                .patch(patch_by_code::<S>)
                .delete(delete_by_code::<S>),
        )
}

// ─────────────────────────────────────────────────────────────────────────────
// Input Parsing
// ─────────────────────────────────────────────────────────────────────────────

fn parse_id(raw: &str) -> ApiResult<u64> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::bad_request(format!("invalid product id '{raw}'")))
}

/// Parses `[1,2,3]`; the brackets are optional and `[]` is an empty list.
pub fn parse_id_list(raw: &str) -> ApiResult<Vec<u64>> {
    let inner = raw.trim().trim_start_matches('[').trim_end_matches(']').trim();
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    inner.split(',').map(parse_id).collect()
}

fn parse_price(raw: &str) -> ApiResult<f64> {
    match raw.trim().parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(price),
        _ => Err(ApiError::bad_request(format!("invalid priceGt '{raw}'"))),
    }
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

fn required_param<'a>(
    params: &'a Result<Query<HashMap<String, String>>, QueryRejection>,
    name: &str,
) -> ApiResult<&'a str> {
    let Query(params) = params
        .as_ref()
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    params
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| ApiError::bad_request(format!("missing query parameter '{name}'")))
}

// ─────────────────────────────────────────────────────────────────────────────
// Collection Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET /products
async fn list<S: ProductStore>(State(service): Service<S>) -> ApiResult<impl IntoResponse> {
    Ok(data(service.list().await?))
}

/// POST /products
async fn create<S: ProductStore>(
    State(service): Service<S>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let candidate = body(payload)?;
    let id = service.create(candidate.clone()).await?;
    Ok((StatusCode::CREATED, data(Product::from_new(id, candidate))))
}

/// GET /products/search?priceGt=X
async fn search<S: ProductStore>(
    State(service): Service<S>,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let min_price = parse_price(required_param(&params, "priceGt")?)?;
    Ok(data(service.search_price_gt(min_price).await?))
}

/// GET /products/total?list=[1,2,3]
async fn total<S: ProductStore>(
    State(service): Service<S>,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let ids = parse_id_list(required_param(&params, "list")?)?;
    Ok(data(service.total_price(&ids).await?))
}

// ─────────────────────────────────────────────────────────────────────────────
// Keyed Handlers
// ─────────────────────────────────────────────────────────────────────────────

async fn get_one<S: ProductStore>(
    service: &ProductService<S>,
    key: ProductKey,
) -> ApiResult<Json<Data<Product>>> {
    let product = match key {
        ProductKey::Id(id) => service.get(id).await?,
        ProductKey::CodeValue(code_value) => service.get_by_code_value(&code_value).await?,
    };
    Ok(data(product))
}

async fn replace<S: ProductStore>(
    service: &ProductService<S>,
    key: ProductKey,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let candidate = body(payload)?;
    Ok(data(service.full_update(&key, candidate).await?))
}

async fn patch<S: ProductStore>(
    service: &ProductService<S>,
    key: ProductKey,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let patch = body(payload)?;
    Ok(data(service.modify(&key, patch).await?))
}

async fn delete<S: ProductStore>(
    service: &ProductService<S>,
    key: ProductKey,
) -> ApiResult<StatusCode> {
    service.delete(&key).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /products/:id
async fn get_by_id<S: ProductStore>(
    State(service): Service<S>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    get_one(&service, ProductKey::Id(parse_id(&id)?)).await
}

/// PUT /products/:id
async fn replace_by_id<S: ProductStore>(
    State(service): Service<S>,
    Path(id): Path<String>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    replace(&service, ProductKey::Id(parse_id(&id)?), payload).await
}

/// PATCH /products/:id
async fn patch_by_id<S: ProductStore>(
    State(service): Service<S>,
    Path(id): Path<String>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    patch(&service, ProductKey::Id(parse_id(&id)?), payload).await
}

/// DELETE /products/:id
async fn delete_by_id<S: ProductStore>(
    State(service): Service<S>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    delete(&service, ProductKey::Id(parse_id(&id)?)).await
}

/// GET /products/code/:code_value
async fn get_by_code<S: ProductStore>(
    State(service): Service<S>,
    Path(code_value): Path<String>,
) -> ApiResult<impl IntoResponse> {
    get_one(&service, ProductKey::CodeValue(code_value)).await
}

/// PUT /products/code/:code_value
async fn replace_by_code<S: ProductStore>(
    State(service): Service<S>,
    Path(code_value): Path<String>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    replace(&service, ProductKey::CodeValue(code_value), payload).await
}

/// PATCH /products/code/:code_value
async fn patch_by_code<S: ProductStore>(
    State(service): Service<S>,
    Path(code_value): Path<String>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    patch(&service, ProductKey::CodeValue(code_value), payload).await
}

/// DELETE /products/code/:code_value
async fn delete_by_code<S: ProductStore>(
    State(service): Service<S>,
    Path(code_value): Path<String>,
) -> ApiResult<StatusCode> {
    delete(&service, ProductKey::CodeValue(code_value)).await
}
