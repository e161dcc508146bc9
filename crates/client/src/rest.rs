use reqwest::{Client, Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{
    body::RequestBody,
    config::ClientConfig,
    error::{ClientError, map_reqwest_error},
};

/// Whether a call carries the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    WithToken,
    Anonymous,
}

/// Thin JSON-over-HTTP client for the admin API.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl RestClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("admin-console/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url,
            token: config.token,
        })
    }

    /// Create a client from `ADMIN_API_URL` / `ADMIN_API_TOKEN`.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::InvalidUrl(format!("{path}: {e}")))
    }

    fn request(&self, method: Method, path: &str, auth: Auth) -> Result<RequestBuilder, ClientError> {
        let builder = self.http.request(method, self.url(path)?);
        match auth {
            Auth::Anonymous => Ok(builder),
            Auth::WithToken => {
                let token = self.token.as_ref().ok_or(ClientError::MissingToken)?;
                Ok(builder.bearer_auth(token.expose_secret()))
            }
        }
    }

    #[tracing::instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
        auth: Auth,
    ) -> Result<Value, ClientError> {
        let builder = self.request(Method::GET, path, auth)?.query(query);
        send(builder).await
    }

    #[tracing::instrument(skip(self, body), fields(multipart = body.is_multipart()))]
    pub async fn post(&self, path: &str, body: RequestBody, auth: Auth) -> Result<Value, ClientError> {
        let builder = with_body(self.request(Method::POST, path, auth)?, body)?;
        send(builder).await
    }

    #[tracing::instrument(skip(self, body), fields(multipart = body.is_multipart()))]
    pub async fn put(&self, path: &str, body: RequestBody, auth: Auth) -> Result<Value, ClientError> {
        let builder = with_body(self.request(Method::PUT, path, auth)?, body)?;
        send(builder).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str, auth: Auth) -> Result<Value, ClientError> {
        send(self.request(Method::DELETE, path, auth)?).await
    }
}

fn with_body(builder: RequestBuilder, body: RequestBody) -> Result<RequestBuilder, ClientError> {
    Ok(match body {
        RequestBody::Json(value) => builder.json(&value),
        RequestBody::Multipart(multipart) => builder.multipart(multipart.into_form()?),
    })
}

async fn send(builder: RequestBuilder) -> Result<Value, ClientError> {
    let res = builder.send().await.map_err(map_reqwest_error)?;
    read_json(res).await
}

async fn read_json(res: Response) -> Result<Value, ClientError> {
    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), "request failed");
        return Err(ClientError::from_status(status, body));
    }

    let text = res.text().await.map_err(map_reqwest_error)?;
    if text.trim().is_empty() {
        // 204 and friends
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| ClientError::Serde(e.to_string()))
}
