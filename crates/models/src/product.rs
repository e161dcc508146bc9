use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    entity::{Entity, Reference},
    resource::Resource,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// Search-engine metadata, nested under `seo` on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub price: f64,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub category: Option<Reference>,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub seo: Option<Seo>,
    #[serde(default = "default_true", deserialize_with = "crate::de::null_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub is_deleted: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl Entity for Product {
    const RESOURCE: Resource = Resource::Products;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "category" => self.category.as_ref().map(|c| c.id().to_string()),
            "status" => Some(if self.is_active { "active" } else { "inactive" }.to_string()),
            _ => None,
        }
    }
}
