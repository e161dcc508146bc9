use serde::{Deserialize, Serialize};

use crate::{
    entity::{Entity, Reference},
    resource::Resource,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<Reference>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl Entity for StaffMember {
    const RESOURCE: Resource = Resource::Staff;

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
    fn test_staff_member_from_server_shape() {
        let member: StaffMember = serde_json::from_value(json!({
            "_id": "s1",
            "name": "Grace Hopper",
            "email": "grace@example.com",
            "role": { "_id": "r1", "name": "Editor" },
            "isActive": false
        }))
        .unwrap();

        assert_eq!(member.display_name(), "Grace Hopper");
        assert_eq!(member.role.as_ref().map(Reference::label), Some("Editor"));
        assert_eq!(member.is_active, Some(false));
    }

    #[test]
    fn test_staff_member_optional_fields() {
        let member: StaffMember = serde_json::from_value(json!({
            "_id": "s2",
            "name": "Alan Turing",
            "email": "alan@example.com",
            "role": null
        }))
        .unwrap();

        assert!(member.role.is_none());
        assert!(member.is_active.is_none());

        let missing_email = serde_json::from_value::<StaffMember>(json!({ "_id": "s3", "name": "X" }));
        assert!(missing_email.is_err());
    }
}
