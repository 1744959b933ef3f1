use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::movements::{CreateMovementRequest, MovementList},
    entity::{
        categories::{Column as CategoryCol, Entity as Categories},
        movements::{ActiveModel, Column, Entity as Movements, Model as MovementModel},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Movement,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_movements(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<MovementList>> {
    let items: Vec<Movement> = Movements::find()
        .filter(Column::UserId.eq(user.user_id))
        .order_by_desc(Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(movement_from_entity)
        .collect();

    let total = items.len() as i64;
    let meta = Meta::new(1, total, total);
    Ok(ApiResponse::success(
        "Movements",
        MovementList { items },
        Some(meta),
    ))
}

pub async fn create_movement(
    state: &AppState,
    user: &AuthUser,
    payload: CreateMovementRequest,
) -> AppResult<ApiResponse<Movement>> {
    if payload.amount <= Decimal::ZERO {
        return Err(AppError::Validation(
            "monto must be greater than 0".to_string(),
        ));
    }

    // A movement may reference one of the caller's own categories, or none.
    if let Some(category_id) = payload.category_id {
        let owned = Categories::find()
            .filter(
                Condition::all()
                    .add(CategoryCol::Id.eq(category_id))
                    .add(CategoryCol::UserId.eq(user.user_id)),
            )
            .one(&state.orm)
            .await?;
        if owned.is_none() {
            return Err(AppError::NotFound);
        }
    }

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        category_id: Set(payload.category_id),
        amount: Set(payload.amount),
        description: Set(payload.description),
        is_expense: Set(payload.is_expense.unwrap_or(true)),
        created_at: NotSet,
    };
    let movement = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "movement_create",
        Some("movements"),
        Some(serde_json::json!({ "movement_id": movement.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Movement recorded",
        movement_from_entity(movement),
        Some(Meta::empty()),
    ))
}

pub async fn delete_movement(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    // Combined (id, owner) filter: another user's row is a plain 404.
    let result = Movements::delete_many()
        .filter(
            Condition::all()
                .add(Column::Id.eq(id))
                .add(Column::UserId.eq(user.user_id)),
        )
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "movement_delete",
        Some("movements"),
        Some(serde_json::json!({ "movement_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(())
}

fn movement_from_entity(model: MovementModel) -> Movement {
    Movement {
        id: model.id,
        user_id: model.user_id,
        category_id: model.category_id,
        amount: model.amount,
        description: model.description,
        is_expense: model.is_expense,
        created_at: model.created_at.with_timezone(&chrono::Utc),
    }
}
