use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod categories;
pub mod doc;
pub mod health;
pub mod movements;
pub mod products;
pub mod sales;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/categorias", categories::router())
        .nest("/productos", products::router())
        .nest("/movimientos", movements::router())
        .nest("/ventas", sales::router())
}
