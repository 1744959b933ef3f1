use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::sales::{SaleList, SaleRequest, SaleWithLines},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::sale_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/nueva", post(process_sale))
        .route("/historial", get(sale_history))
}

#[utoipa::path(
    post,
    path = "/ventas/nueva",
    request_body = SaleRequest,
    responses(
        (status = 201, description = "Sale committed", body = ApiResponse<SaleWithLines>),
        (status = 400, description = "Empty sale, bad quantity or unknown metodo_pago"),
        (status = 404, description = "A referenced product is not in the caller's catalog")
    ),
    security(("bearer_auth" = [])),
    tag = "Sales"
)]
pub async fn process_sale(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SaleRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<SaleWithLines>>)> {
    let resp = sale_service::process_sale(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/ventas/historial",
    responses(
        (status = 200, description = "The caller's sales, newest first", body = ApiResponse<SaleList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Sales"
)]
pub async fn sale_history(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<SaleList>>> {
    let resp = sale_service::sale_history(&state, &user).await?;
    Ok(Json(resp))
}
