use client::RequestBody;
use models::campaign::Campaign;
use serde_json::{Value, json};

use super::{
    FormState, ValidationErrors, date_input, non_empty, number_input, parse_number, to_timestamp,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CampaignForm {
    pub name: String,
    pub description: String,
    pub campaign_type: String,
    pub status: String,
    pub discount_type: String,
    pub discount_value: String,
    pub start_date: String,
    pub end_date: String,
}

impl FormState for CampaignForm {
    type Entity = Campaign;

    fn from_entity(campaign: &Campaign) -> Self {
        Self {
            name: campaign.name.clone(),
            description: campaign.description.clone().unwrap_or_default(),
            campaign_type: campaign.campaign_type.clone().unwrap_or_default(),
            status: campaign.status.clone().unwrap_or_default(),
            discount_type: campaign.discount_type.clone().unwrap_or_default(),
            discount_value: number_input(campaign.discount_value),
            start_date: date_input(campaign.start_date),
            end_date: date_input(campaign.end_date),
        }
    }

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        errors.require("type", &self.campaign_type);
        if let Some(value) = errors.number::<f64>("discountValue", &self.discount_value, false)
            && value < 0.0
        {
            errors.add("discountValue", "Discount cannot be negative");
        }
        let start = errors.date("startDate", &self.start_date, true);
        let end = errors.date("endDate", &self.end_date, true);
        if let (Some(start), Some(end)) = (start, end)
            && end < start
        {
            errors.add("endDate", "End date must not be before start date");
        }
        errors
    }

    fn to_payload(&self) -> Result<RequestBody, ValidationErrors> {
        self.validate().into_result()?;

        let mut body = json!({
            "name": self.name.trim(),
            "description": self.description.trim(),
            "type": self.campaign_type.trim(),
            "startDate": to_timestamp(&self.start_date),
            "endDate": to_timestamp(&self.end_date),
        });
        if let Some(status) = non_empty(&self.status) {
            body["status"] = Value::String(status);
        }
        if let Some(discount_type) = non_empty(&self.discount_type) {
            body["discountType"] = Value::String(discount_type);
        }
        if let Some(value) = parse_number::<f64>(&self.discount_value) {
            body["discountValue"] = json!(value);
        }
        Ok(RequestBody::Json(body))
    }
}
