//! Create and edit flows wrapped around a [`FormState`].

use std::sync::Arc;

use models::{
    Entity,
    envelope::{decode_created_id, decode_entity, decode_message},
};
use thiserror::Error;
use tracing::{info, warn};

use super::{FormState, ValidationErrors};
use crate::services::{
    notification::Notifier,
    query::{QueryClient, QueryError, QueryKey},
};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    #[error(transparent)]
    Request(#[from] QueryError),
    #[error("the record has not been loaded")]
    NotReady,
}

/// Validate and POST `form`. Returns the new record's id when the server sends one.
pub async fn create<F: FormState>(
    query: &QueryClient,
    notifier: &dyn Notifier,
    form: &F,
) -> Result<Option<String>, SubmitError> {
    let resource = F::Entity::RESOURCE;
    let body = form.to_payload()?;

    match query.create(resource, body).await {
        Ok(res) => {
            let id = decode_created_id(resource, &res);
            info!(%resource, id = ?id, "record created");
            notifier.success(
                &decode_message(&res)
                    .unwrap_or_else(|| format!("{} created successfully", resource.noun())),
            );
            Ok(id)
        }
        Err(e) => {
            warn!(%resource, error = %e, "create failed");
            notifier.error(&e.user_message());
            Err(e.into())
        }
    }
}

#[derive(Debug)]
pub enum ScreenState<F> {
    Loading,
    Ready(F),
    Failed { message: String },
}

/// Edit screen for one record: fetch, pre-fill once, then submit changes.
pub struct EditScreen<F: FormState> {
    query: QueryClient,
    notifier: Arc<dyn Notifier>,
    id: String,
    state: ScreenState<F>,
}

impl<F: FormState> EditScreen<F> {
    pub fn new(query: QueryClient, notifier: Arc<dyn Notifier>, id: impl Into<String>) -> Self {
        Self {
            query,
            notifier,
            id: id.into(),
            state: ScreenState::Loading,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &ScreenState<F> {
        &self.state
    }

    /// Fetch the record and build the form from it. A form that is already
    /// loaded is kept, so user edits survive repeated calls.
    pub async fn load(&mut self) -> &ScreenState<F> {
        if matches!(self.state, ScreenState::Ready(_)) {
            return &self.state;
        }

        let resource = F::Entity::RESOURCE;
        let loaded = match self.query.read(QueryKey::detail(resource, &self.id)).await {
            Ok(body) => decode_entity::<F::Entity>(resource, &body).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        self.state = match loaded {
            Ok(entity) => ScreenState::Ready(F::from_entity(&entity)),
            Err(error) => {
                warn!(%resource, id = %self.id, %error, "could not load record for editing");
                ScreenState::Failed {
                    message: format!("Failed to load {}", resource.noun().to_lowercase()),
                }
            }
        };
        &self.state
    }

    /// `None` until the record has loaded.
    pub fn form(&self) -> Option<&F> {
        match &self.state {
            ScreenState::Ready(form) => Some(form),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut F> {
        match &mut self.state {
            ScreenState::Ready(form) => Some(form),
            _ => None,
        }
    }

    pub async fn submit(&self) -> Result<(), SubmitError> {
        let resource = F::Entity::RESOURCE;
        let form = self.form().ok_or(SubmitError::NotReady)?;
        let body = form.to_payload()?;

        match self.query.update(resource, &self.id, body).await {
            Ok(res) => {
                info!(%resource, id = %self.id, "record updated");
                self.notifier.success(
                    &decode_message(&res)
                        .unwrap_or_else(|| format!("{} updated successfully", resource.noun())),
                );
                Ok(())
            }
            Err(e) => {
                warn!(%resource, id = %self.id, error = %e, "update failed");
                self.notifier.error(&e.user_message());
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use client::{ClientError, RequestBody};
    use models::{ListParams, Resource};
    use serde_json::json;

    use super::*;
    use crate::services::{
        forms::{category::CategoryForm, product::ProductForm},
        notification::{MemoryNotifier, NoticeLevel},
        test_support::FakeApi,
    };

    fn setup() -> (Arc<FakeApi>, MemoryNotifier, QueryClient) {
        let api = Arc::new(FakeApi::new());
        api.seed(
            Resource::Products,
            vec![json!({
                "_id": "p1",
                "name": "Desk Lamp",
                "description": "Brass",
                "price": 49.5,
                "stock": 3,
                "category": { "_id": "c1", "name": "Lighting" },
                "seo": { "metaTitle": "Lamp", "keywords": ["lamp", "desk"] },
                "images": [{ "url": "https://cdn.example.com/p1.png" }],
                "isActive": false
            })],
        );
        let notifier = MemoryNotifier::new();
        let query = QueryClient::new(api.clone());
        (api, notifier, query)
    }

    #[tokio::test]
    async fn test_loaded_form_matches_record() {
        let (_, notifier, query) = setup();
        let mut screen: EditScreen<ProductForm> =
            EditScreen::new(query, Arc::new(notifier), "p1");
        assert!(screen.form().is_none());

        screen.load().await;
        let form = screen.form().unwrap();
        assert_eq!(form.name, "Desk Lamp");
        assert_eq!(form.description, "Brass");
        assert_eq!(form.price, "49.5");
        assert_eq!(form.stock, "3");
        assert_eq!(form.category, "c1");
        assert_eq!(form.meta_title, "Lamp");
        assert_eq!(form.keywords, "lamp, desk");
        assert!(!form.is_active);
        assert_eq!(form.existing_images.len(), 1);
    }

    #[tokio::test]
    async fn test_reload_keeps_user_edits() {
        let (api, notifier, query) = setup();
        let mut screen: EditScreen<ProductForm> =
            EditScreen::new(query, Arc::new(notifier), "p1");
        screen.load().await;
        screen.form_mut().unwrap().name = "Brass Desk Lamp".to_string();

        screen.load().await;
        assert_eq!(screen.form().unwrap().name, "Brass Desk Lamp");
        assert_eq!(api.detail_calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_record_fails_screen() {
        let (_, notifier, query) = setup();
        let mut screen: EditScreen<ProductForm> =
            EditScreen::new(query, Arc::new(notifier), "nope");

        let state = screen.load().await;
        assert!(matches!(state, ScreenState::Failed { message } if message == "Failed to load product"));
        assert!(matches!(screen.submit().await, Err(SubmitError::NotReady)));
    }

    #[tokio::test]
    async fn test_submit_updates_and_invalidates() {
        let (api, notifier, query) = setup();
        let list = QueryKey::list(Resource::Products, ListParams::new(0, 10));
        query.read(list.clone()).await.unwrap();

        let mut screen: EditScreen<ProductForm> =
            EditScreen::new(query.clone(), Arc::new(notifier.clone()), "p1");
        screen.load().await;
        screen.form_mut().unwrap().price = "55".to_string();
        screen.submit().await.unwrap();

        assert_eq!(api.records(Resource::Products)[0]["price"], 55.0);
        assert!(query.cached(list).await.is_none());
        assert_eq!(notifier.notices()[0].text, "Product updated successfully");
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_sent() {
        let (api, notifier, query) = setup();
        let mut screen: EditScreen<ProductForm> =
            EditScreen::new(query, Arc::new(notifier.clone()), "p1");
        screen.load().await;
        screen.form_mut().unwrap().name.clear();

        let err = screen.submit().await.unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(ref e) if e.get("name").is_some()));
        assert_eq!(api.mutation_calls(), 0);
        assert!(notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn test_create_returns_new_id() {
        let (api, notifier, query) = setup();
        let form = CategoryForm {
            name: "Outdoor Lighting".to_string(),
            ..Default::default()
        };

        let id = create(&query, &notifier, &form).await.unwrap();
        assert_eq!(id.as_deref(), Some("new-1"));
        assert_eq!(api.records(Resource::Categories)[0]["slug"], "outdoor-lighting");
        assert_eq!(notifier.notices()[0].level, NoticeLevel::Success);
        assert!(matches!(api.last_body(), Some(RequestBody::Json(_))));
    }

    #[tokio::test]
    async fn test_create_failure_notifies() {
        let (api, notifier, query) = setup();
        api.fail_next(ClientError::Http {
            status: 422,
            body: r#"{"message":"Category name already exists"}"#.to_string(),
        });
        let form = CategoryForm {
            name: "Lighting".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            create(&query, &notifier, &form).await,
            Err(SubmitError::Request(_))
        ));
        assert_eq!(notifier.notices()[0].text, "Category name already exists");
    }
}
