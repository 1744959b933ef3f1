use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::sales::{SaleList, SaleRequest, SaleWithLines},
    entity::{
        products::{Column as ProductCol, Entity as Products},
        sale_lines::{
            ActiveModel as SaleLineActive, Column as SaleLineCol, Entity as SaleLines,
            Model as SaleLineModel,
        },
        sales::{ActiveModel as SaleActive, Column as SaleCol, Entity as Sales, Model as SaleModel},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{PaymentMethod, Sale, SaleLine},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Process a sale atomically: header, per-line price snapshots, computed
/// total. Any failure before commit rolls everything back, so no header or
/// line is ever visible from a failed request.
pub async fn process_sale(
    state: &AppState,
    user: &AuthUser,
    payload: SaleRequest,
) -> AppResult<ApiResponse<SaleWithLines>> {
    if payload.lines.is_empty() {
        return Err(AppError::Validation(
            "Sale must contain at least one product".to_string(),
        ));
    }

    let method = match payload.payment_method.as_deref() {
        None => PaymentMethod::default(),
        Some(raw) => PaymentMethod::parse(raw).ok_or_else(|| {
            AppError::Validation(format!(
                "metodo_pago must be EFECTIVO, TARJETA or TRANSFERENCIA, got {raw}"
            ))
        })?,
    };

    for line in &payload.lines {
        if line.quantity < 1 {
            return Err(AppError::Validation(
                "cantidad must be at least 1".to_string(),
            ));
        }
    }

    let txn = state.orm.begin().await?;

    let sale = SaleActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        total: Set(Decimal::ZERO),
        payment_method: Set(method.as_str().to_string()),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let mut total = Decimal::ZERO;
    let mut lines: Vec<SaleLine> = Vec::with_capacity(payload.lines.len());

    for (idx, line) in payload.lines.iter().enumerate() {
        // Resolved within the caller's own catalog; a miss aborts the whole
        // transaction, never a partial sale.
        let product = Products::find()
            .filter(
                Condition::all()
                    .add(ProductCol::Id.eq(line.id))
                    .add(ProductCol::UserId.eq(user.user_id)),
            )
            .one(&txn)
            .await?;
        let product = match product {
            Some(p) => p,
            None => return Err(AppError::NotFound),
        };

        // Snapshot the current price; later product edits never touch it.
        let unit_price = product.sale_price;
        let subtotal = unit_price * Decimal::from(line.quantity);

        let stored = SaleLineActive {
            id: Set(Uuid::new_v4()),
            sale_id: Set(sale.id),
            product_id: Set(product.id),
            line_no: Set(idx as i32),
            quantity: Set(line.quantity),
            unit_price: Set(unit_price),
            subtotal: Set(subtotal),
        }
        .insert(&txn)
        .await?;

        lines.push(sale_line_from_entity(stored));
        total += subtotal;
    }

    let mut active: SaleActive = sale.into();
    active.total = Set(total);
    let sale = active.update(&txn).await?;

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "sale_create",
        Some("sales"),
        Some(serde_json::json!({ "sale_id": sale.id, "total": sale.total })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Sale recorded",
        SaleWithLines {
            sale: sale_from_entity(sale),
            lines,
        },
        Some(Meta::empty()),
    ))
}

pub async fn sale_history(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<SaleList>> {
    let sales = Sales::find()
        .filter(SaleCol::UserId.eq(user.user_id))
        .order_by_desc(SaleCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let mut items: Vec<SaleWithLines> = Vec::with_capacity(sales.len());
    for sale in sales {
        let lines = load_lines(&state.orm, sale.id).await?;
        items.push(SaleWithLines {
            sale: sale_from_entity(sale),
            lines,
        });
    }

    let total = items.len() as i64;
    let meta = Meta::new(1, total, total);
    Ok(ApiResponse::success(
        "Sale history",
        SaleList { items },
        Some(meta),
    ))
}

async fn load_lines<C: ConnectionTrait>(conn: &C, sale_id: Uuid) -> AppResult<Vec<SaleLine>> {
    let lines = SaleLines::find()
        .filter(SaleLineCol::SaleId.eq(sale_id))
        .order_by_asc(SaleLineCol::LineNo)
        .all(conn)
        .await?
        .into_iter()
        .map(sale_line_from_entity)
        .collect();
    Ok(lines)
}

fn sale_from_entity(model: SaleModel) -> Sale {
    Sale {
        id: model.id,
        user_id: model.user_id,
        total: model.total,
        payment_method: model.payment_method,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn sale_line_from_entity(model: SaleLineModel) -> SaleLine {
    SaleLine {
        id: model.id,
        sale_id: model.sale_id,
        product_id: model.product_id,
        quantity: model.quantity,
        unit_price: model.unit_price,
        subtotal: model.subtotal,
    }
}
