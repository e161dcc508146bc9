use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    entity::{Entity, Reference},
    resource::Resource,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub order: Option<Reference>,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
}

impl Entity for Payment {
    const RESOURCE: Resource = Resource::Payments;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        format!("payment {}", self.id)
    }
}
