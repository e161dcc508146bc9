use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::{
    entity::{Entity, Reference},
    resource::Resource,
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    /// Approved and rejected reviews are final.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Body of the moderation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationPayload {
    pub status: ReviewStatus,
    pub moderator_notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub product: Option<Reference>,
    #[serde(default)]
    pub customer: Option<Reference>,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub rating: u8,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub status: ReviewStatus,
    #[serde(default)]
    pub moderated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub moderated_by: Option<Reference>,
    #[serde(default)]
    pub moderator_notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Review {
    const RESOURCE: Resource = Resource::Reviews;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.title.clone().unwrap_or_else(|| format!("review {}", self.id))
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.to_string()),
            _ => None,
        }
    }
}
