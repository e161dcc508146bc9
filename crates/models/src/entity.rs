use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::resource::Resource;

/// A server-owned record the console can list, show, edit and delete.
///
/// Identity is always the server-assigned `_id`; the client never mints ids.
pub trait Entity: DeserializeOwned + Clone + Send + Sync + 'static {
    const RESOURCE: Resource;

    fn id(&self) -> &str;

    /// Short name used in confirmations and notifications.
    fn display_name(&self) -> String;

    /// Value of a filterable field, used when the list is filtered locally.
    ///
    /// Returns `None` for keys the entity does not expose; such filters are left
    /// to the server.
    fn filter_value(&self, _key: &str) -> Option<String> {
        None
    }
}

/// A link to another record: either a bare id or a populated `{ _id, name }` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    Id(String),
    Populated {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl Reference {
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Populated { id, .. } => id,
        }
    }

    /// Populated name if the server expanded the reference, otherwise the id.
    pub fn label(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Populated { name: Some(name), .. } => name,
            Self::Populated { id, .. } => id,
        }
    }
}
