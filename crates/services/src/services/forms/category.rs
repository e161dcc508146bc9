use client::RequestBody;
use models::category::Category;
use serde_json::{Value, json};

use super::{FormState, ValidationErrors, non_empty};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    /// Generated from the name when left blank.
    pub slug: String,
    pub description: String,
    /// Parent category id, empty for a top-level category.
    pub parent: String,
    pub is_active: bool,
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            slug: String::new(),
            description: String::new(),
            parent: String::new(),
            is_active: true,
        }
    }
}

/// `"Desk & Floor Lamps"` -> `"desk-floor-lamps"`.
pub fn slugify(value: &str) -> String {
    value
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

impl FormState for CategoryForm {
    type Entity = Category;

    fn from_entity(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            slug: category.slug.clone().unwrap_or_default(),
            description: category.description.clone().unwrap_or_default(),
            parent: category
                .parent
                .as_ref()
                .map(|p| p.id().to_string())
                .unwrap_or_default(),
            is_active: category.is_active.unwrap_or(true),
        }
    }

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        if let Some(slug) = non_empty(&self.slug)
            && slugify(&slug) != slug
        {
            errors.add("slug", "Use lowercase letters, numbers and dashes");
        }
        errors
    }

    fn to_payload(&self) -> Result<RequestBody, ValidationErrors> {
        self.validate().into_result()?;
        let slug = non_empty(&self.slug).unwrap_or_else(|| slugify(&self.name));
        let parent = non_empty(&self.parent).map_or(Value::Null, Value::String);

        Ok(RequestBody::Json(json!({
            "name": self.name.trim(),
            "slug": slug,
            "description": self.description.trim(),
            "parent": parent,
            "isActive": self.is_active,
        })))
    }
}
