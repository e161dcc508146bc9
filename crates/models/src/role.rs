use serde::{Deserialize, Serialize};

use crate::{
    entity::{Entity, Reference},
    resource::Resource,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Entity for Permission {
    const RESOURCE: Resource = Resource::Permissions;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub permissions: Vec<Reference>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl Entity for Role {
    const RESOURCE: Resource = Resource::Roles;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_permission_from_server_shape() {
        let permission: Permission = serde_json::from_value(json!({
            "_id": "perm1",
            "name": "products:write",
            "resource": "products",
            "action": "write",
            "description": null
        }))
        .unwrap();

        assert_eq!(permission.display_name(), "products:write");
        assert_eq!(permission.resource.as_deref(), Some("products"));
        assert_eq!(permission.action.as_deref(), Some("write"));
        assert!(permission.description.is_none());
    }

    #[test]
    fn test_role_with_mixed_permission_references() {
        let role: Role = serde_json::from_value(json!({
            "_id": "r1",
            "name": "Editor",
            "permissions": ["perm1", { "_id": "perm2", "name": "orders:read" }],
            "isActive": true
        }))
        .unwrap();

        assert_eq!(role.display_name(), "Editor");
        let labels: Vec<&str> = role.permissions.iter().map(Reference::label).collect();
        assert_eq!(labels, vec!["perm1", "orders:read"]);
        assert_eq!(role.is_active, Some(true));
    }

    #[test]
    fn test_role_with_null_permissions() {
        let role: Role = serde_json::from_value(json!({
            "_id": "r2",
            "name": "Viewer",
            "permissions": null,
            "isActive": null
        }))
        .unwrap();

        assert!(role.permissions.is_empty());
        assert!(role.is_active.is_none());
        assert!(role.description.is_none());
    }
}
