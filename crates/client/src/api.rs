use async_trait::async_trait;
use models::{ListParams, Resource, review::ModerationPayload};
use serde_json::Value;

use crate::{
    body::RequestBody,
    error::ClientError,
    rest::{Auth, RestClient},
};

/// Resource-level operations of the admin API.
///
/// Responses are returned as raw JSON; envelope decoding happens above this seam
/// so the query layer can cache the server's answer as-is.
#[async_trait]
pub trait ResourceApi: Send + Sync {
    async fn fetch_list(&self, resource: Resource, params: &ListParams) -> Result<Value, ClientError>;

    async fn fetch_one(&self, resource: Resource, id: &str) -> Result<Value, ClientError>;

    async fn create(&self, resource: Resource, body: RequestBody) -> Result<Value, ClientError>;

    async fn update(
        &self,
        resource: Resource,
        id: &str,
        body: RequestBody,
    ) -> Result<Value, ClientError>;

    async fn delete(&self, resource: Resource, id: &str) -> Result<Value, ClientError>;

    async fn moderate_review(
        &self,
        id: &str,
        payload: &ModerationPayload,
    ) -> Result<Value, ClientError>;
}

/// `<resource>/<id>` with the id escaped as a single path segment.
fn record_path(resource: Resource, id: &str) -> Result<String, ClientError> {
    // dot segments survive escaping and would be resolved away by the URL parser
    if matches!(id, "" | "." | "..") {
        return Err(ClientError::InvalidUrl(format!("invalid {resource} id {id:?}")));
    }
    Ok(format!("{}/{}", resource.path(), urlencoding::encode(id)))
}

#[async_trait]
impl ResourceApi for RestClient {
    async fn fetch_list(&self, resource: Resource, params: &ListParams) -> Result<Value, ClientError> {
        self.get(&resource.path(), &params.to_query(), Auth::WithToken)
            .await
    }

    async fn fetch_one(&self, resource: Resource, id: &str) -> Result<Value, ClientError> {
        self.get(&record_path(resource, id)?, &[], Auth::WithToken)
            .await
    }

    async fn create(&self, resource: Resource, body: RequestBody) -> Result<Value, ClientError> {
        self.post(&resource.path(), body, Auth::WithToken).await
    }

    async fn update(
        &self,
        resource: Resource,
        id: &str,
        body: RequestBody,
    ) -> Result<Value, ClientError> {
        self.put(&record_path(resource, id)?, body, Auth::WithToken)
            .await
    }

    async fn delete(&self, resource: Resource, id: &str) -> Result<Value, ClientError> {
        RestClient::delete(self, &record_path(resource, id)?, Auth::WithToken).await
    }

    async fn moderate_review(
        &self,
        id: &str,
        payload: &ModerationPayload,
    ) -> Result<Value, ClientError> {
        let body = serde_json::to_value(payload).map_err(|e| ClientError::Serde(e.to_string()))?;
        self.put(
            &format!("{}/moderate", record_path(Resource::Reviews, id)?),
            RequestBody::Json(body),
            Auth::WithToken,
        )
        .await
    }
}
