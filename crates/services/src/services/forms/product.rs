use client::{FilePart, MultipartBody, RequestBody};
use models::product::{Product, ProductImage, Seo};
use serde_json::{Value, json};

use super::{FormState, ValidationErrors, non_empty, number_input, parse_number, split_list};
use crate::services::preview::{PreviewHandle, PreviewRegistry};

const IMAGE_FIELD: &str = "images";

/// A picked image waiting to be uploaded, with its local preview.
#[derive(Debug)]
pub struct ImageUpload {
    pub file: FilePart,
    preview: PreviewHandle,
}

impl ImageUpload {
    pub fn preview_url(&self) -> String {
        self.preview.url()
    }
}

#[derive(Debug)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub sku: String,
    pub stock: String,
    /// Category id.
    pub category: String,
    pub meta_title: String,
    pub meta_description: String,
    /// Comma separated.
    pub keywords: String,
    pub is_active: bool,
    pub existing_images: Vec<ProductImage>,
    uploads: Vec<ImageUpload>,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            sku: String::new(),
            stock: String::new(),
            category: String::new(),
            meta_title: String::new(),
            meta_description: String::new(),
            keywords: String::new(),
            is_active: true,
            existing_images: Vec::new(),
            uploads: Vec::new(),
        }
    }
}

impl ProductForm {
    /// Attach a new image; returns its preview url.
    pub fn attach_image(&mut self, registry: &PreviewRegistry, mut file: FilePart) -> String {
        file.field = IMAGE_FIELD.to_string();
        let preview = registry.acquire(&file);
        let url = preview.url();
        self.uploads.push(ImageUpload { file, preview });
        url
    }

    pub fn uploads(&self) -> &[ImageUpload] {
        &self.uploads
    }

    /// Drop a not-yet-uploaded image, releasing its preview.
    pub fn remove_upload(&mut self, index: usize) -> Option<FilePart> {
        (index < self.uploads.len()).then(|| self.uploads.remove(index).file)
    }

    pub fn remove_existing_image(&mut self, index: usize) -> Option<ProductImage> {
        (index < self.existing_images.len()).then(|| self.existing_images.remove(index))
    }

    fn seo(&self) -> Seo {
        Seo {
            meta_title: non_empty(&self.meta_title),
            meta_description: non_empty(&self.meta_description),
            keywords: split_list(&self.keywords),
        }
    }
}

impl FormState for ProductForm {
    type Entity = Product;

    fn from_entity(product: &Product) -> Self {
        let seo = product.seo.clone().unwrap_or_default();
        Self {
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.to_string(),
            sku: product.sku.clone().unwrap_or_default(),
            stock: number_input(product.stock),
            category: product
                .category
                .as_ref()
                .map(|c| c.id().to_string())
                .unwrap_or_default(),
            meta_title: seo.meta_title.unwrap_or_default(),
            meta_description: seo.meta_description.unwrap_or_default(),
            keywords: seo.keywords.join(", "),
            is_active: product.is_active,
            existing_images: product.images.clone(),
            uploads: Vec::new(),
        }
    }

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        if let Some(price) = errors.number::<f64>("price", &self.price, true)
            && price < 0.0
        {
            errors.add("price", "Price cannot be negative");
        }
        if let Some(stock) = errors.number::<i64>("stock", &self.stock, false)
            && stock < 0
        {
            errors.add("stock", "Stock cannot be negative");
        }
        errors.require("category", &self.category);
        errors
    }

    /// JSON, or multipart once at least one new image is attached.
    fn to_payload(&self) -> Result<RequestBody, ValidationErrors> {
        self.validate().into_result()?;

        let price: f64 = parse_number(&self.price).unwrap_or_default();
        let stock: Option<i64> = parse_number(&self.stock);
        let seo = serde_json::to_value(self.seo()).unwrap_or(Value::Null);
        let images = serde_json::to_value(&self.existing_images).unwrap_or(Value::Null);

        if self.uploads.is_empty() {
            let mut body = json!({
                "name": self.name.trim(),
                "description": self.description.trim(),
                "price": price,
                "category": self.category.trim(),
                "isActive": self.is_active,
                "images": images,
                "seo": seo,
            });
            if let Some(sku) = non_empty(&self.sku) {
                body["sku"] = Value::String(sku);
            }
            if let Some(stock) = stock {
                body["stock"] = json!(stock);
            }
            return Ok(RequestBody::Json(body));
        }

        let mut form = MultipartBody::default()
            .text("name", self.name.trim())
            .text("description", self.description.trim())
            .text("price", price.to_string())
            .text("category", self.category.trim())
            .text("isActive", self.is_active.to_string())
            .text("existingImages", images.to_string())
            .text("seo", seo.to_string());
        if let Some(sku) = non_empty(&self.sku) {
            form = form.text("sku", sku);
        }
        if let Some(stock) = stock {
            form = form.text("stock", stock.to_string());
        }
        for upload in &self.uploads {
            form = form.file(upload.file.clone());
        }
        Ok(RequestBody::Multipart(form))
    }
}
