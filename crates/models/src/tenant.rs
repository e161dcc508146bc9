use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{entity::Entity, resource::Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub property: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub lease_end: Option<DateTime<Utc>>,
}

impl Entity for Tenant {
    const RESOURCE: Resource = Resource::Tenants;

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
    fn test_tenant_from_server_shape() {
        let tenant: Tenant = serde_json::from_value(json!({
            "_id": "t1",
            "name": "Acme Ltd",
            "email": "office@acme.test",
            "phone": "+44 20 7946 0000",
            "property": "Unit 4",
            "status": "active",
            "leaseEnd": "2025-12-31T00:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(tenant.display_name(), "Acme Ltd");
        assert_eq!(tenant.property.as_deref(), Some("Unit 4"));
        assert_eq!(
            tenant.lease_end.map(|d| d.to_rfc3339()),
            Some("2025-12-31T00:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_tenant_with_nulls() {
        let tenant: Tenant = serde_json::from_value(json!({
            "_id": "t2",
            "name": "Globex",
            "email": null,
            "leaseEnd": null
        }))
        .unwrap();

        assert!(tenant.email.is_none());
        assert!(tenant.phone.is_none());
        assert!(tenant.lease_end.is_none());
    }
}
