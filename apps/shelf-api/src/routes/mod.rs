use std::sync::Arc;

use axum::{routing::get, Router};

use shelf_service::ProductService;
use shelf_store::ProductStore;

pub mod products;
pub mod system;

/// Router for every endpoint, bound to one product service.
pub fn router<S: ProductStore + 'static>(service: Arc<ProductService<S>>) -> Router {
    Router::new()
        .route("/ping", get(system::ping))
        .nest("/products", products::router::<S>())
        .with_state(service)
}
