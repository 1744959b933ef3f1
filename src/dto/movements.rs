use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Movement;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMovementRequest {
    #[serde(rename = "monto")]
    #[schema(value_type = String)]
    pub amount: Decimal,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "es_gasto")]
    pub is_expense: Option<bool>,
    #[serde(rename = "categoria")]
    pub category_id: Option<Uuid>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct MovementList {
    #[schema(value_type = Vec<Movement>)]
    pub items: Vec<Movement>,
}
