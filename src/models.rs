use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Category kinds as stored and served on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Income,
    Expense,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Income => "INGRESO",
            CategoryKind::Expense => "GASTO",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "INGRESO" => Some(CategoryKind::Income),
            "GASTO" => Some(CategoryKind::Expense),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Transfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "EFECTIVO",
            PaymentMethod::Card => "TARJETA",
            PaymentMethod::Transfer => "TRANSFERENCIA",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "EFECTIVO" => Some(PaymentMethod::Cash),
            "TARJETA" => Some(PaymentMethod::Card),
            "TRANSFERENCIA" => Some(PaymentMethod::Transfer),
            _ => None,
        }
    }
}

// Row models keep English identifiers; the JSON field names stay Spanish,
// the contract the existing clients speak.

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    #[serde(rename = "usuario")]
    pub user_id: Uuid,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    #[serde(rename = "usuario")]
    pub user_id: Uuid,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio_venta")]
    #[schema(value_type = String)]
    pub sale_price: Decimal,
    #[serde(rename = "costo_aprox")]
    #[schema(value_type = String)]
    pub approx_cost: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Movement {
    pub id: Uuid,
    #[serde(rename = "usuario")]
    pub user_id: Uuid,
    #[serde(rename = "categoria")]
    pub category_id: Option<Uuid>,
    #[serde(rename = "monto")]
    #[schema(value_type = String)]
    pub amount: Decimal,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "es_gasto")]
    pub is_expense: bool,
    #[serde(rename = "fecha")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Sale {
    pub id: Uuid,
    #[serde(rename = "usuario")]
    pub user_id: Uuid,
    #[schema(value_type = String)]
    pub total: Decimal,
    #[serde(rename = "metodo_pago")]
    pub payment_method: String,
    #[serde(rename = "fecha")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaleLine {
    pub id: Uuid,
    #[serde(rename = "venta")]
    pub sale_id: Uuid,
    #[serde(rename = "producto")]
    pub product_id: Uuid,
    #[serde(rename = "cantidad")]
    pub quantity: i32,
    #[serde(rename = "precio_unitario")]
    #[schema(value_type = String)]
    pub unit_price: Decimal,
    #[schema(value_type = String)]
    pub subtotal: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_kind_round_trips() {
        assert_eq!(CategoryKind::parse("INGRESO"), Some(CategoryKind::Income));
        assert_eq!(CategoryKind::parse("GASTO"), Some(CategoryKind::Expense));
        assert_eq!(CategoryKind::Expense.as_str(), "GASTO");
        assert_eq!(CategoryKind::parse("OTRO"), None);
    }

    #[test]
    fn payment_method_defaults_to_cash() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
        assert_eq!(PaymentMethod::default().as_str(), "EFECTIVO");
    }

    #[test]
    fn payment_method_rejects_unknown_values() {
        assert_eq!(PaymentMethod::parse("TARJETA"), Some(PaymentMethod::Card));
        assert_eq!(
            PaymentMethod::parse("TRANSFERENCIA"),
            Some(PaymentMethod::Transfer)
        );
        assert_eq!(PaymentMethod::parse("BITCOIN"), None);
        assert_eq!(PaymentMethod::parse("efectivo"), None);
    }
}
