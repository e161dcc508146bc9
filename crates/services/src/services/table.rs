//! View models for list screens: table rows and pagination.

use chrono::{DateTime, Utc};
use models::Entity;
use serde::Serialize;

use super::list_view::ListPage;

/// Placeholder for values the server did not send.
pub const MISSING: &str = "N/A";

/// Column layout of an entity's list table.
pub trait Tabular {
    fn headers() -> &'static [&'static str];

    /// One cell per header, in header order.
    fn cells(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Zero-based.
    pub current_page: u32,
    pub total_pages: u64,
    pub total_count: u64,
    pub page_size: u32,
}

impl Pagination {
    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.current_page) + 1 < self.total_pages
    }

    /// Up to `window` zero-based page numbers around the current page.
    pub fn page_numbers(&self, window: u32) -> Vec<u32> {
        let total = u32::try_from(self.total_pages).unwrap_or(u32::MAX);
        if total == 0 || window == 0 {
            return Vec::new();
        }
        let window = window.min(total);
        let start = self
            .current_page
            .saturating_sub(window / 2)
            .min(total - window);
        (start..start + window).collect()
    }

    /// "Showing 11-20 of 42" for a page holding `rows` rows.
    pub fn summary(&self, rows: usize) -> String {
        if rows == 0 {
            return format!("Showing 0 of {}", self.total_count);
        }
        let first = u64::from(self.current_page) * u64::from(self.page_size) + 1;
        let last = first + rows as u64 - 1;
        format!("Showing {first}-{last} of {}", self.total_count)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub id: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
    pub empty_message: String,
    pub pagination: Pagination,
}

impl TableView {
    pub fn from_page<T: Entity + Tabular>(page: &ListPage<T>) -> Self {
        Self {
            headers: T::headers().iter().map(|h| h.to_string()).collect(),
            rows: page
                .rows
                .iter()
                .map(|row| TableRow {
                    id: row.id().to_string(),
                    cells: row.cells(),
                })
                .collect(),
            empty_message: format!("No {} found", T::RESOURCE.label()),
            pagination: page.pagination,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn text(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(MISSING)
        .to_string()
}

pub fn money(value: f64) -> String {
    format!("{value:.2}")
}

pub fn date(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

pub fn flag(value: Option<bool>, yes: &str, no: &str) -> String {
    match value {
        Some(true) => yes.to_string(),
        Some(false) => no.to_string(),
        None => MISSING.to_string(),
    }
}
