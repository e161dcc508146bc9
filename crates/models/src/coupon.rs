use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{entity::Entity, resource::Resource};

/// Eligibility rules, nested under `conditions` on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_order_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_discount_amount: Option<f64>,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub applicable_categories: Vec<String>,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub first_order_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(rename = "_id")]
    pub id: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub discount_type: Option<String>,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub discount_value: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub usage_limit: Option<u32>,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub used_count: u32,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub conditions: CouponConditions,
}

impl Entity for Coupon {
    const RESOURCE: Resource = Resource::Coupons;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.code.clone()
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.clone().unwrap_or_default()),
            "discountType" => Some(self.discount_type.clone().unwrap_or_default()),
            _ => None,
        }
    }
}
