use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    entity::{Entity, Reference},
    resource::Resource,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product: Reference,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub customer: Option<Reference>,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub items: Vec<OrderLine>,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub total_amount: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Order {
    const RESOURCE: Resource = Resource::Orders;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.order_number.clone().unwrap_or_else(|| self.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_order_from_server_shape() {
        let order: Order = serde_json::from_value(json!({
            "_id": "o1",
            "orderNumber": "ORD-1001",
            "customer": { "_id": "cu1", "name": "Ada Lovelace" },
            "items": [
                { "product": { "_id": "p1", "name": "Desk Lamp" }, "quantity": 2, "price": 19.99 },
                { "product": "p2", "quantity": 1, "price": null }
            ],
            "totalAmount": 39.98,
            "status": "shipped",
            "paymentStatus": "paid",
            "createdAt": "2024-05-03T12:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(order.display_name(), "ORD-1001");
        assert_eq!(order.customer.as_ref().map(Reference::label), Some("Ada Lovelace"));
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.items[1].product.id(), "p2");
        assert_eq!(order.items[1].price, 0.0);
        assert_eq!(order.payment_status.as_deref(), Some("paid"));
    }

    #[test]
    fn test_order_with_nulls_falls_back_to_id() {
        let order: Order = serde_json::from_value(json!({
            "_id": "o2",
            "orderNumber": null,
            "items": null,
            "totalAmount": null,
            "status": null
        }))
        .unwrap();

        assert_eq!(order.display_name(), "o2");
        assert!(order.items.is_empty());
        assert_eq!(order.total_amount, 0.0);
        assert!(order.customer.is_none());
        assert!(order.created_at.is_none());
    }
}
