//! In-memory stand-in for the admin API.

use std::{
    collections::BTreeMap,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use client::{ClientError, RequestBody, ResourceApi};
use models::{FilterMode, ListParams, Resource, review::ModerationPayload};
use serde_json::{Value, json};

#[derive(Default)]
pub struct FakeApi {
    records: Mutex<BTreeMap<Resource, Vec<Value>>>,
    fail_next: Mutex<Option<ClientError>>,
    list_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    mutation_calls: AtomicUsize,
    next_id: AtomicUsize,
    last_body: Mutex<Option<RequestBody>>,
    raw_list: Mutex<Option<Value>>,
    stall_mutations: AtomicBool,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, resource: Resource, records: Vec<Value>) {
        self.records.lock().unwrap().insert(resource, records);
    }

    pub fn records(&self, resource: Resource) -> Vec<Value> {
        self.records
            .lock()
            .unwrap()
            .get(&resource)
            .cloned()
            .unwrap_or_default()
    }

    /// Make the next call fail with `error`.
    pub fn fail_next(&self, error: ClientError) {
        *self.fail_next.lock().unwrap() = Some(error);
    }

    /// Answer list calls with `body` verbatim.
    pub fn respond_with(&self, body: Value) {
        *self.raw_list.lock().unwrap() = Some(body);
    }

    /// Make every later write hang without answering.
    pub fn stall_mutations(&self) {
        self.stall_mutations.store(true, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn mutation_calls(&self) -> usize {
        self.mutation_calls.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Option<RequestBody> {
        self.last_body.lock().unwrap().clone()
    }

    async fn begin_mutation(&self) -> Result<(), ClientError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        if self.stall_mutations.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        self.check_failure()
    }

    fn check_failure(&self) -> Result<(), ClientError> {
        match self.fail_next.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn matches_server_side(resource: Resource, record: &Value, params: &ListParams) -> bool {
        if resource.filter_mode() == FilterMode::Client {
            // endpoint ignores search and filter
            return true;
        }
        let search_ok = params.search.as_deref().is_none_or(|term| {
            record["name"]
                .as_str()
                .is_some_and(|name| name.to_lowercase().contains(&term.to_lowercase()))
        });
        let filters_ok = params
            .filters
            .iter()
            .all(|(key, value)| record[key.as_str()].as_str() == Some(value.as_str()));
        search_ok && filters_ok
    }
}

#[async_trait]
impl ResourceApi for FakeApi {
    async fn fetch_list(&self, resource: Resource, params: &ListParams) -> Result<Value, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        if let Some(body) = self.raw_list.lock().unwrap().clone() {
            return Ok(body);
        }

        let matching: Vec<Value> = self
            .records(resource)
            .into_iter()
            .filter(|record| Self::matches_server_side(resource, record, params))
            .collect();
        let limit = params.limit.max(1) as usize;
        let total_count = matching.len();
        let total_pages = total_count.div_ceil(limit);
        let results: Vec<Value> = matching
            .into_iter()
            .skip(params.page as usize * limit)
            .take(limit)
            .collect();

        Ok(json!({
            resource.plural_key(): {
                "results": results,
                "totalCount": total_count,
                "totalPages": total_pages,
                "currentPage": params.page.saturating_add(1),
            }
        }))
    }

    async fn fetch_one(&self, resource: Resource, id: &str) -> Result<Value, ClientError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.records(resource)
            .into_iter()
            .find(|record| record["_id"] == id)
            .map(|record| json!({ resource.singular_key(): record }))
            .ok_or(ClientError::NotFound)
    }

    async fn create(&self, resource: Resource, body: RequestBody) -> Result<Value, ClientError> {
        self.begin_mutation().await?;
        *self.last_body.lock().unwrap() = Some(body.clone());

        let id = format!("new-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let mut record = body.as_json().cloned().unwrap_or_else(|| json!({}));
        record["_id"] = Value::String(id);
        self.records
            .lock()
            .unwrap()
            .entry(resource)
            .or_default()
            .push(record.clone());

        Ok(json!({
            "message": format!("{} created successfully", resource.noun()),
            resource.singular_key(): record,
        }))
    }

    async fn update(
        &self,
        resource: Resource,
        id: &str,
        body: RequestBody,
    ) -> Result<Value, ClientError> {
        self.begin_mutation().await?;
        *self.last_body.lock().unwrap() = Some(body.clone());

        let mut records = self.records.lock().unwrap();
        let record = records
            .entry(resource)
            .or_default()
            .iter_mut()
            .find(|record| record["_id"] == id)
            .ok_or(ClientError::NotFound)?;
        if let (Some(target), Some(Value::Object(patch))) = (record.as_object_mut(), body.as_json()) {
            for (key, value) in patch {
                target.insert(key.clone(), value.clone());
            }
        }
        Ok(json!({ resource.singular_key(): record.clone() }))
    }

    async fn delete(&self, resource: Resource, id: &str) -> Result<Value, ClientError> {
        self.begin_mutation().await?;

        let mut records = self.records.lock().unwrap();
        let list = records.entry(resource).or_default();
        let before = list.len();
        list.retain(|record| record["_id"] != id);
        if list.len() == before {
            return Err(ClientError::NotFound);
        }
        Ok(json!({ "message": format!("{} deleted successfully", resource.noun()) }))
    }

    async fn moderate_review(
        &self,
        id: &str,
        payload: &ModerationPayload,
    ) -> Result<Value, ClientError> {
        let patch = json!({
            "status": payload.status,
            "moderatorNotes": payload.moderator_notes,
            "moderatedAt": "2024-06-01T12:00:00.000Z",
        });
        self.update(Resource::Reviews, id, RequestBody::Json(patch)).await
    }
}
