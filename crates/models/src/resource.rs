use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Where list filtering happens for a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// The server applies `search` and `filter`; the fetched page is shown as is.
    Server,
    /// The parameters are still sent, but the fetched page is re-filtered locally
    /// because the endpoint does not honour them.
    Client,
}

/// Every remote collection the console manages.
///
/// The string form doubles as the REST path segment (`GET /products`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Resource {
    Products,
    Categories,
    Inventory,
    Orders,
    Campaigns,
    Coupons,
    Reviews,
    Roles,
    Permissions,
    Staff,
    Tenants,
    Customers,
    Payments,
}

impl Resource {
    /// REST path segment, relative to the API base URL.
    pub fn path(&self) -> String {
        self.to_string()
    }

    /// Key under which list endpoints nest their paginated payload.
    pub fn plural_key(&self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Categories => "categories",
            Self::Inventory => "inventory",
            Self::Orders => "orders",
            Self::Campaigns => "campaigns",
            Self::Coupons => "coupons",
            Self::Reviews => "reviews",
            Self::Roles => "roles",
            Self::Permissions => "permissions",
            Self::Staff => "staff",
            Self::Tenants => "tenants",
            Self::Customers => "customers",
            Self::Payments => "payments",
        }
    }

    /// Key under which single-entity endpoints wrap their payload.
    pub fn singular_key(&self) -> &'static str {
        match self {
            Self::Products => "product",
            Self::Categories => "category",
            Self::Inventory => "inventory",
            Self::Orders => "order",
            Self::Campaigns => "campaign",
            Self::Coupons => "coupon",
            Self::Reviews => "review",
            Self::Roles => "role",
            Self::Permissions => "permission",
            Self::Staff => "staff",
            Self::Tenants => "tenant",
            Self::Customers => "customer",
            Self::Payments => "payment",
        }
    }

    /// Human label used in page titles and messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Categories => "categories",
            Self::Inventory => "inventory",
            Self::Orders => "orders",
            Self::Campaigns => "campaigns",
            Self::Coupons => "coupons",
            Self::Reviews => "reviews",
            Self::Roles => "roles",
            Self::Permissions => "permissions",
            Self::Staff => "staff members",
            Self::Tenants => "tenants",
            Self::Customers => "customers",
            Self::Payments => "payments",
        }
    }

    /// Capitalised singular noun for notifications ("Product deleted successfully").
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Products => "Product",
            Self::Categories => "Category",
            Self::Inventory => "Inventory item",
            Self::Orders => "Order",
            Self::Campaigns => "Campaign",
            Self::Coupons => "Coupon",
            Self::Reviews => "Review",
            Self::Roles => "Role",
            Self::Permissions => "Permission",
            Self::Staff => "Staff member",
            Self::Tenants => "Tenant",
            Self::Customers => "Customer",
            Self::Payments => "Payment",
        }
    }

    pub fn filter_mode(&self) -> FilterMode {
        match self {
            Self::Campaigns | Self::Coupons => FilterMode::Client,
            _ => FilterMode::Server,
        }
    }
}
