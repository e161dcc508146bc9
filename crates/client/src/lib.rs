//! HTTP access to the admin REST API.

pub mod api;
pub mod body;
pub mod config;
pub mod error;
pub mod rest;

pub use api::ResourceApi;
pub use body::{FilePart, MultipartBody, RequestBody};
pub use config::ClientConfig;
pub use error::ClientError;
pub use rest::{Auth, RestClient};
