//! Local previews for images picked in a form but not yet uploaded.
//!
//! Each preview is owned by a [`PreviewHandle`]; the preview is released when
//! its handle is dropped, so removing an image or discarding the form never
//! leaks one.

use std::sync::Arc;

use bytes::Bytes;
use client::FilePart;
use dashmap::DashMap;
use tracing::trace;
use uuid::Uuid;

const URL_PREFIX: &str = "blob:preview/";

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewEntry {
    pub file_name: String,
    pub mime: String,
    pub data: Bytes,
}

#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    entries: Arc<DashMap<Uuid, PreviewEntry>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self, file: &FilePart) -> PreviewHandle {
        let id = Uuid::new_v4();
        self.entries.insert(
            id,
            PreviewEntry {
                file_name: file.file_name.clone(),
                mime: file.mime.clone(),
                data: file.data.clone(),
            },
        );
        trace!(%id, file = %file.file_name, "preview acquired");
        PreviewHandle {
            id,
            entries: Arc::clone(&self.entries),
        }
    }

    pub fn resolve(&self, url: &str) -> Option<PreviewEntry> {
        let id = Uuid::parse_str(url.strip_prefix(URL_PREFIX)?).ok()?;
        self.entries.get(&id).map(|entry| entry.clone())
    }

    pub fn live_count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug)]
pub struct PreviewHandle {
    id: Uuid,
    entries: Arc<DashMap<Uuid, PreviewEntry>>,
}

impl PreviewHandle {
    pub fn url(&self) -> String {
        format!("{URL_PREFIX}{}", self.id)
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.entries.remove(&self.id);
        trace!(id = %self.id, "preview released");
    }
}
