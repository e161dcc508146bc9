use client::RequestBody;
use models::coupon::{Coupon, CouponConditions};
use serde_json::{Value, json};

use super::{
    FormState, ValidationErrors, date_input, non_empty, number_input, parse_number, split_list,
    to_timestamp,
};

pub const DISCOUNT_TYPES: [&str; 2] = ["percentage", "fixed"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponForm {
    pub code: String,
    pub description: String,
    pub discount_type: String,
    pub discount_value: String,
    pub status: String,
    pub valid_from: String,
    pub valid_until: String,
    pub usage_limit: String,
    pub min_order_amount: String,
    pub max_discount_amount: String,
    /// Comma-separated category ids.
    pub applicable_categories: String,
    pub first_order_only: bool,
}

impl Default for CouponForm {
    fn default() -> Self {
        Self {
            code: String::new(),
            description: String::new(),
            discount_type: "percentage".to_string(),
            discount_value: String::new(),
            status: "active".to_string(),
            valid_from: String::new(),
            valid_until: String::new(),
            usage_limit: String::new(),
            min_order_amount: String::new(),
            max_discount_amount: String::new(),
            applicable_categories: String::new(),
            first_order_only: false,
        }
    }
}

impl CouponForm {
    fn conditions(&self) -> CouponConditions {
        CouponConditions {
            min_order_amount: parse_number(&self.min_order_amount),
            max_discount_amount: parse_number(&self.max_discount_amount),
            applicable_categories: split_list(&self.applicable_categories),
            first_order_only: self.first_order_only,
        }
    }
}

impl FormState for CouponForm {
    type Entity = Coupon;

    fn from_entity(coupon: &Coupon) -> Self {
        let conditions = &coupon.conditions;
        Self {
            code: coupon.code.clone(),
            description: coupon.description.clone().unwrap_or_default(),
            discount_type: coupon.discount_type.clone().unwrap_or_default(),
            discount_value: coupon.discount_value.to_string(),
            status: coupon.status.clone().unwrap_or_default(),
            valid_from: date_input(coupon.valid_from),
            valid_until: date_input(coupon.valid_until),
            usage_limit: number_input(coupon.usage_limit),
            min_order_amount: number_input(conditions.min_order_amount),
            max_discount_amount: number_input(conditions.max_discount_amount),
            applicable_categories: conditions.applicable_categories.join(", "),
            first_order_only: conditions.first_order_only,
        }
    }

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require("code", &self.code);
        if !DISCOUNT_TYPES.iter().any(|t| *t == self.discount_type.trim()) {
            errors.add("discountType", "Choose percentage or fixed");
        }
        if let Some(value) = errors.number::<f64>("discountValue", &self.discount_value, true) {
            if value <= 0.0 {
                errors.add("discountValue", "Discount must be greater than zero");
            } else if self.discount_type.trim() == "percentage" && value > 100.0 {
                errors.add("discountValue", "Percentage cannot exceed 100");
            }
        }
        let from = errors.date("validFrom", &self.valid_from, true);
        let until = errors.date("validUntil", &self.valid_until, true);
        if let (Some(from), Some(until)) = (from, until)
            && until <= from
        {
            errors.add("validUntil", "End date must be after start date");
        }
        errors.number::<u32>("usageLimit", &self.usage_limit, false);
        errors.number::<f64>("minOrderAmount", &self.min_order_amount, false);
        errors.number::<f64>("maxDiscountAmount", &self.max_discount_amount, false);
        errors
    }

    fn to_payload(&self) -> Result<RequestBody, ValidationErrors> {
        self.validate().into_result()?;

        let mut body = json!({
            "code": self.code.trim().to_uppercase(),
            "description": self.description.trim(),
            "discountType": self.discount_type.trim(),
            "discountValue": parse_number::<f64>(&self.discount_value),
            "validFrom": to_timestamp(&self.valid_from),
            "validUntil": to_timestamp(&self.valid_until),
            "conditions": serde_json::to_value(self.conditions()).unwrap_or(Value::Null),
        });
        if let Some(status) = non_empty(&self.status) {
            body["status"] = Value::String(status);
        }
        if let Some(limit) = parse_number::<u32>(&self.usage_limit) {
            body["usageLimit"] = json!(limit);
        }
        Ok(RequestBody::Json(body))
    }
}
