use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use super::Product;
use crate::enums::{OrderStatus, PaymentMethod};

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// The backend sends this as a decimal string; plain numbers are accepted too.
    #[serde(deserialize_with = "amount_from_number_or_string")]
    pub total_amount: f64,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub phone: String,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A product line frozen into an order at checkout price.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    pub quantity: u32,
    #[serde(deserialize_with = "amount_from_number_or_string")]
    pub price: f64,
}

fn amount_from_number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(value) => Ok(value),
        Amount::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid amount '{text}': {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_json(total: &serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "id": "o-1",
            "userId": "u-1",
            "items": [],
            "totalAmount": total,
            "status": "pending",
            "shippingAddress": "1 Main St",
            "phone": "+100",
            "paymentMethod": "cash"
        })
    }

    #[test]
    fn total_amount_accepts_decimal_string() {
        let order: Order = serde_json::from_value(order_json(&"1499.50".into())).unwrap();
        assert!((order.total_amount - 1499.5).abs() < f64::EPSILON);
    }

    #[test]
    fn total_amount_accepts_number() {
        let order: Order = serde_json::from_value(order_json(&serde_json::json!(20))).unwrap();
        assert!((order.total_amount - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn total_amount_rejects_garbage() {
        let err = serde_json::from_value::<Order>(order_json(&"twenty".into())).unwrap_err();
        assert!(err.to_string().contains("invalid amount"));
    }
}
