use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Parameters of one list read. Doubles as part of the cache key, so two equal
/// values always address the same cached page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ListParams {
    /// Zero-based page index.
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub filters: BTreeMap<String, String>,
}

impl ListParams {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            ..Default::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        let trimmed = search.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Query string pairs as sent on the wire.
    ///
    /// `page` is one-based on the wire; `search` and `filter` are omitted when
    /// empty; `filter` is a JSON object (URL encoding is left to the HTTP client).
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("page".to_string(), self.page.saturating_add(1).to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(search) = &self.search {
            query.push(("search".to_string(), search.clone()));
        }
        if !self.filters.is_empty() {
            let filter = serde_json::to_string(&self.filters).unwrap_or_else(|_| "{}".to_string());
            query.push(("filter".to_string(), filter));
        }
        query
    }
}
