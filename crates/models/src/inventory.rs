use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    entity::{Entity, Reference},
    resource::Resource,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub product: Reference,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub quantity: i64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub low_stock_threshold: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl InventoryItem {
    pub fn is_low_stock(&self) -> bool {
        self.low_stock_threshold
            .is_some_and(|threshold| self.quantity <= threshold)
    }
}

impl Entity for InventoryItem {
    const RESOURCE: Resource = Resource::Inventory;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.product.label().to_string()
    }
}
