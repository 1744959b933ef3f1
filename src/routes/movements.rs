use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use uuid::Uuid;

use crate::{
    dto::movements::{CreateMovementRequest, MovementList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Movement,
    response::ApiResponse,
    services::movement_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_movements).post(create_movement))
        .route("/{id}", delete(delete_movement))
}

#[utoipa::path(
    get,
    path = "/movimientos",
    responses(
        (status = 200, description = "List the caller's movements, newest first", body = ApiResponse<MovementList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Movements"
)]
pub async fn list_movements(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<MovementList>>> {
    let resp = movement_service::list_movements(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/movimientos",
    request_body = CreateMovementRequest,
    responses(
        (status = 201, description = "Record movement", body = ApiResponse<Movement>),
        (status = 400, description = "Non-positive monto"),
        (status = 404, description = "Unknown categoria")
    ),
    security(("bearer_auth" = [])),
    tag = "Movements"
)]
pub async fn create_movement(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateMovementRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Movement>>)> {
    let resp = movement_service::create_movement(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    delete,
    path = "/movimientos/{id}",
    params(
        ("id" = Uuid, Path, description = "Movement ID")
    ),
    responses(
        (status = 204, description = "Deleted movement"),
        (status = 404, description = "Movement not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Movements"
)]
pub async fn delete_movement(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    movement_service::delete_movement(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
