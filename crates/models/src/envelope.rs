//! Typed decoding of the server's response envelopes.
//!
//! List endpoints are inconsistent about where they nest the paginated
//! payload (`products.results`, `data.results`, bare `results`). Decoding
//! looks in each place in turn and degrades to an empty page when none is
//! present. A record that does not decode is skipped with a warning.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use utils::value::{get_text, get_value, lookup};

use crate::resource::Resource;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("{resource} record is malformed: {source}")]
    Entity {
        resource: Resource,
        #[source]
        source: serde_json::Error,
    },
    #[error("{resource} response has no record")]
    MissingEntity { resource: Resource },
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub results: Vec<T>,
    pub total_count: u64,
    pub total_pages: u64,
    /// One-based, as reported by the server.
    pub current_page: u64,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            total_count: 0,
            total_pages: 0,
            current_page: 1,
        }
    }
}

/// Find the object that holds `results` for this resource, if any.
fn page_container<'a>(resource: Resource, body: &'a Value) -> Option<&'a Value> {
    [resource.plural_key(), "data"]
        .into_iter()
        .filter_map(|key| lookup(body, key))
        .chain(std::iter::once(body))
        .find(|candidate| lookup(candidate, "results").is_some())
}

/// Decode a list response into a typed page.
pub fn decode_page<T: DeserializeOwned>(resource: Resource, body: &Value) -> Page<T> {
    let Some(container) = page_container(resource, body) else {
        debug!(%resource, "list response has no results; treating as empty");
        return Page::empty();
    };

    let items: &[Value] = match lookup(container, "results") {
        Some(Value::Array(items)) => items.as_slice(),
        _ => {
            warn!(%resource, "list response `results` is not an array; treating as empty");
            &[]
        }
    };

    let results: Vec<T> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(%resource, index, %error, "skipping malformed record");
                None
            }
        })
        .collect();

    let total_count = get_value(container, "totalCount", results.len() as u64);
    let total_pages = get_value(container, "totalPages", u64::from(total_count > 0));
    let current_page = get_value(container, "currentPage", 1u64);

    Page {
        results,
        total_count,
        total_pages,
        current_page,
    }
}

/// Decode a single-record response, wrapped as `{ <entity>: {...} }`,
/// `{ data: {...} }`, or bare.
pub fn decode_entity<T: DeserializeOwned>(
    resource: Resource,
    body: &Value,
) -> Result<T, DecodeError> {
    let record = [resource.singular_key(), "data"]
        .into_iter()
        .filter_map(|key| lookup(body, key))
        .find(|candidate| candidate.is_object())
        .or_else(|| body.get("_id").map(|_| body))
        .ok_or(DecodeError::MissingEntity { resource })?;

    T::deserialize(record).map_err(|source| DecodeError::Entity { resource, source })
}

/// Server-supplied `message`, if any.
pub fn decode_message(body: &Value) -> Option<String> {
    let message = get_text(body, "message", "");
    (!message.is_empty()).then_some(message)
}

/// Id of the record returned by a create call (`{ message, <entity>: { _id } }`).
pub fn decode_created_id(resource: Resource, body: &Value) -> Option<String> {
    [
        format!("{}._id", resource.singular_key()),
        "data._id".to_string(),
        "_id".to_string(),
    ]
    .iter()
    .find_map(|path| lookup(body, path).and_then(Value::as_str))
    .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        #[serde(rename = "_id")]
        id: String,
    }

    #[test]
    fn test_decode_page_under_plural_key() {
        let body = json!({
            "products": {
                "results": [{ "_id": "p1" }, { "_id": "p2" }],
                "totalCount": 12,
                "totalPages": 6,
                "currentPage": 2
            }
        });
        let page: Page<Row> = decode_page(Resource::Products, &body);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.total_count, 12);
        assert_eq!(page.total_pages, 6);
        assert_eq!(page.current_page, 2);
    }

    #[test]
    fn test_decode_page_falls_back_to_data_then_bare_results() {
        let data = json!({ "data": { "results": [{ "_id": "c1" }] } });
        let page: Page<Row> = decode_page(Resource::Categories, &data);
        assert_eq!(page.results, vec![Row { id: "c1".into() }]);
        assert_eq!(page.total_count, 1);
        assert_eq!(page.total_pages, 1);

        let bare = json!({ "results": [{ "_id": "c2" }], "totalCount": 1 });
        let page: Page<Row> = decode_page(Resource::Categories, &bare);
        assert_eq!(page.results, vec![Row { id: "c2".into() }]);
    }

    #[test]
    fn test_decode_page_missing_results_is_empty() {
        let body = json!({ "products": { "totalCount": 3 } });
        let page: Page<Row> = decode_page(Resource::Products, &body);
        assert!(page.results.is_empty());
        assert_eq!(page.total_pages, 0);

        let page: Page<Row> = decode_page(Resource::Products, &Value::Null);
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_decode_page_skips_malformed_record() {
        let body = json!({
            "results": [{ "_id": "ok" }, { "name": "no id" }, { "_id": 7 }, { "_id": "also-ok" }],
            "totalCount": 4
        });
        let page = decode_page::<Row>(Resource::Orders, &body);
        assert_eq!(
            page.results,
            vec![Row { id: "ok".into() }, Row { id: "also-ok".into() }]
        );
        assert_eq!(page.total_count, 4);
    }

    #[test]
    fn test_decode_entity_wrapped_and_bare() {
        let wrapped = json!({ "coupon": { "_id": "k1" } });
        let row: Row = decode_entity(Resource::Coupons, &wrapped).unwrap();
        assert_eq!(row.id, "k1");

        let bare = json!({ "_id": "k2" });
        let row: Row = decode_entity(Resource::Coupons, &bare).unwrap();
        assert_eq!(row.id, "k2");

        let err = decode_entity::<Row>(Resource::Coupons, &json!({ "message": "gone" }))
            .unwrap_err();
        assert!(matches!(err, DecodeError::MissingEntity { .. }));
    }

    #[test]
    fn test_decode_created_id_and_message() {
        let body = json!({ "message": "Role created", "role": { "_id": "r9" } });
        assert_eq!(decode_created_id(Resource::Roles, &body).as_deref(), Some("r9"));
        assert_eq!(decode_message(&body).as_deref(), Some("Role created"));
        assert_eq!(decode_message(&json!({})), None);
    }
}
