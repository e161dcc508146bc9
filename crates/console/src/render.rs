use std::fmt::Write;

use services::services::table::{Pagination, TableView};

const PAGE_WINDOW: u32 = 5;

fn width(cell: &str) -> usize {
    cell.chars().count()
}

fn pad(cell: &str, to: usize) -> String {
    format!("{cell}{}", " ".repeat(to.saturating_sub(width(cell))))
}

/// Left-aligned columns separated by two spaces, header underlined with dashes.
pub fn table(view: &TableView) -> String {
    if view.is_empty() {
        return format!("{}\n", view.empty_message);
    }

    let mut widths: Vec<usize> = view.headers.iter().map(|h| width(h)).collect();
    for row in &view.rows {
        for (i, cell) in row.cells.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(width(cell));
            }
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad(cell, *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", line(&view.headers));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));
    for row in &view.rows {
        let _ = writeln!(out, "{}", line(&row.cells));
    }
    out
}

/// `Showing 11-20 of 42   < 1 [2] 3 4 5 >`, pages shown one-based.
pub fn pager(pagination: &Pagination, rows: usize) -> String {
    let mut out = pagination.summary(rows);
    if pagination.total_pages <= 1 {
        return out;
    }

    out.push_str("   ");
    out.push(if pagination.has_previous() { '<' } else { ' ' });
    for page in pagination.page_numbers(PAGE_WINDOW) {
        if page == pagination.current_page {
            let _ = write!(out, " [{}]", page.saturating_add(1));
        } else {
            let _ = write!(out, " {}", page.saturating_add(1));
        }
    }
    out.push(' ');
    out.push(if pagination.has_next() { '>' } else { ' ' });
    out.trim_end().to_string()
}
