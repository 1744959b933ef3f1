use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Sale, SaleLine};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaleLineRequest {
    pub id: Uuid,
    #[serde(rename = "cantidad")]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaleRequest {
    #[serde(rename = "metodo_pago")]
    pub payment_method: Option<String>,
    #[serde(rename = "productos")]
    pub lines: Vec<SaleLineRequest>,
}

/// A sale header with its lines inlined under `detalles`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SaleWithLines {
    #[serde(flatten)]
    pub sale: Sale,
    #[serde(rename = "detalles")]
    pub lines: Vec<SaleLine>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct SaleList {
    #[schema(value_type = Vec<SaleWithLines>)]
    pub items: Vec<SaleWithLines>,
}
