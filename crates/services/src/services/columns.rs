//! Column layouts for every list screen.

use models::{
    Reference,
    campaign::Campaign,
    category::Category,
    coupon::Coupon,
    customer::Customer,
    inventory::InventoryItem,
    order::Order,
    payment::Payment,
    product::Product,
    review::Review,
    role::{Permission, Role},
    staff::StaffMember,
    tenant::Tenant,
};

use super::table::{Tabular, date, flag, money, text};

fn reference(value: Option<&Reference>) -> String {
    text(value.map(Reference::label))
}

fn active(value: Option<bool>) -> String {
    flag(value, "Active", "Inactive")
}

impl Tabular for Product {
    fn headers() -> &'static [&'static str] {
        &["Name", "SKU", "Category", "Price", "Stock", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            text(self.sku.as_deref()),
            reference(self.category.as_ref()),
            money(self.price),
            self.stock.map(|s| s.to_string()).unwrap_or_else(|| text(None)),
            active(Some(self.is_active)),
        ]
    }
}

impl Tabular for Category {
    fn headers() -> &'static [&'static str] {
        &["Name", "Slug", "Parent", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            text(self.slug.as_deref()),
            reference(self.parent.as_ref()),
            active(self.is_active),
        ]
    }
}

impl Tabular for InventoryItem {
    fn headers() -> &'static [&'static str] {
        &["Product", "Quantity", "Location", "Stock level", "Updated"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.product.label().to_string(),
            self.quantity.to_string(),
            text(self.location.as_deref()),
            if self.is_low_stock() { "Low" } else { "OK" }.to_string(),
            date(self.updated_at),
        ]
    }
}

impl Tabular for Order {
    fn headers() -> &'static [&'static str] {
        &["Order", "Customer", "Items", "Total", "Status", "Payment", "Placed"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.order_number.clone().unwrap_or_else(|| self.id.clone()),
            reference(self.customer.as_ref()),
            self.items.len().to_string(),
            money(self.total_amount),
            text(self.status.as_deref()),
            text(self.payment_status.as_deref()),
            date(self.created_at),
        ]
    }
}

impl Tabular for Campaign {
    fn headers() -> &'static [&'static str] {
        &["Name", "Type", "Status", "Discount", "Starts", "Ends"]
    }

    fn cells(&self) -> Vec<String> {
        let discount = match (self.discount_value, self.discount_type.as_deref()) {
            (Some(value), Some("percentage")) => format!("{value}%"),
            (Some(value), _) => money(value),
            (None, _) => text(None),
        };
        vec![
            self.name.clone(),
            text(self.campaign_type.as_deref()),
            text(self.status.as_deref()),
            discount,
            date(self.start_date),
            date(self.end_date),
        ]
    }
}

impl Tabular for Coupon {
    fn headers() -> &'static [&'static str] {
        &["Code", "Discount", "Status", "Used", "Valid from", "Valid until"]
    }

    fn cells(&self) -> Vec<String> {
        let discount = match self.discount_type.as_deref() {
            Some("percentage") => format!("{}%", self.discount_value),
            _ => money(self.discount_value),
        };
        let used = match self.usage_limit {
            Some(limit) => format!("{}/{limit}", self.used_count),
            None => self.used_count.to_string(),
        };
        vec![
            self.code.clone(),
            discount,
            text(self.status.as_deref()),
            used,
            date(self.valid_from),
            date(self.valid_until),
        ]
    }
}

impl Tabular for Review {
    fn headers() -> &'static [&'static str] {
        &["Product", "Customer", "Rating", "Title", "Status", "Submitted"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            reference(self.product.as_ref()),
            reference(self.customer.as_ref()),
            format!("{}/5", self.rating),
            text(self.title.as_deref()),
            self.status.to_string(),
            date(self.created_at),
        ]
    }
}

impl Tabular for Role {
    fn headers() -> &'static [&'static str] {
        &["Name", "Description", "Permissions", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            text(self.description.as_deref()),
            self.permissions.len().to_string(),
            active(self.is_active),
        ]
    }
}

impl Tabular for Permission {
    fn headers() -> &'static [&'static str] {
        &["Name", "Resource", "Action", "Description"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            text(self.resource.as_deref()),
            text(self.action.as_deref()),
            text(self.description.as_deref()),
        ]
    }
}

impl Tabular for StaffMember {
    fn headers() -> &'static [&'static str] {
        &["Name", "Email", "Role", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            reference(self.role.as_ref()),
            active(self.is_active),
        ]
    }
}

impl Tabular for Tenant {
    fn headers() -> &'static [&'static str] {
        &["Name", "Email", "Phone", "Property", "Status", "Lease ends"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            text(self.email.as_deref()),
            text(self.phone.as_deref()),
            text(self.property.as_deref()),
            text(self.status.as_deref()),
            date(self.lease_end),
        ]
    }
}

impl Tabular for Customer {
    fn headers() -> &'static [&'static str] {
        &["Name", "Email", "Phone", "Status", "Joined"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            text(self.phone.as_deref()),
            active(self.is_active),
            date(self.created_at),
        ]
    }
}

impl Tabular for Payment {
    fn headers() -> &'static [&'static str] {
        &["Order", "Amount", "Method", "Status", "Paid"]
    }

    fn cells(&self) -> Vec<String> {
        let amount = match self.currency.as_deref() {
            Some(currency) => format!("{} {currency}", money(self.amount)),
            None => money(self.amount),
        };
        vec![
            reference(self.order.as_ref()),
            amount,
            text(self.method.as_deref()),
            text(self.status.as_deref()),
            date(self.paid_at),
        ]
    }
}
