use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Product;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio_venta")]
    #[schema(value_type = String)]
    pub sale_price: Decimal,
    #[serde(rename = "costo_aprox")]
    #[schema(value_type = Option<String>)]
    pub approx_cost: Option<Decimal>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "precio_venta")]
    #[schema(value_type = Option<String>)]
    pub sale_price: Option<Decimal>,
    #[serde(rename = "costo_aprox")]
    #[schema(value_type = Option<String>)]
    pub approx_cost: Option<Decimal>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
