//! Create / edit forms.
//!
//! Form fields hold what the user typed. A form turns into a request body only
//! through [`FormState::to_payload`], which validates first, so an invalid form
//! never reaches the network.

pub mod campaign;
pub mod category;
pub mod coupon;
pub mod product;
pub mod screen;

use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use client::RequestBody;
use models::Entity;

pub trait FormState: Sized {
    type Entity: Entity;

    /// Pre-fill every field from a fetched record.
    fn from_entity(entity: &Self::Entity) -> Self;

    fn validate(&self) -> ValidationErrors;

    fn to_payload(&self) -> Result<RequestBody, ValidationErrors>;
}

/// Field name to message, sorted by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.errors.keys().map(String::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Record `message` for `field`; the first message per field wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn require(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "This field is required");
        }
    }

    /// Check that `value` parses as `T`; blank is an error only when `required`.
    pub fn number<T: FromStr>(&mut self, field: &str, value: &str, required: bool) -> Option<T> {
        if value.trim().is_empty() {
            if required {
                self.add(field, "This field is required");
            }
            return None;
        }
        let parsed = parse_number(value);
        if parsed.is_none() {
            self.add(field, "Must be a valid number");
        }
        parsed
    }

    pub fn date(&mut self, field: &str, value: &str, required: bool) -> Option<DateTime<Utc>> {
        if value.trim().is_empty() {
            if required {
                self.add(field, "This field is required");
            }
            return None;
        }
        let parsed = parse_date(value);
        if parsed.is_none() {
            self.add(field, "Must be a valid date");
        }
        parsed
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

pub fn parse_number<T: FromStr>(value: &str) -> Option<T> {
    value.trim().parse().ok()
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Wire form of a date: `2024-05-01T00:00:00.000Z`.
pub fn to_timestamp(value: &str) -> Option<String> {
    parse_date(value).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Date input contents for a stored timestamp.
pub fn date_input(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Trimmed text, or `None` when blank.
pub fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Comma-separated input split into trimmed, non-empty items.
pub fn split_list(value: &str) -> Vec<String> {
    value.split(',').filter_map(non_empty).collect()
}

pub fn number_input<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_timestamp_formats() {
        assert_eq!(
            to_timestamp("2024-05-01").as_deref(),
            Some("2024-05-01T00:00:00.000Z")
        );
        assert_eq!(
            to_timestamp("2024-05-01T10:30:00+02:00").as_deref(),
            Some("2024-05-01T08:30:00.000Z")
        );
        assert!(to_timestamp("01/05/2024").is_none());
    }

    #[test]
    fn test_validation_helpers() {
        let mut errors = ValidationErrors::new();
        errors.require("name", "  ");
        assert_eq!(errors.number::<f64>("price", "12.5", true), Some(12.5));
        assert_eq!(errors.number::<f64>("stock", "", false), None);
        assert_eq!(errors.number::<u32>("limit", "ten", false), None);
        assert!(errors.date("validFrom", "2024-13-01", true).is_none());

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("name"), Some("This field is required"));
        assert_eq!(errors.get("limit"), Some("Must be a valid number"));
        assert_eq!(errors.to_string(), "invalid fields: limit, name, validFrom");
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" lamp, , desk ,"), vec!["lamp", "desk"]);
        assert!(split_list("").is_empty());
    }
}
