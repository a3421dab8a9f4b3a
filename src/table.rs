//! HTML table parsing and primary-table selection.
//!
//! The portal page can contain several tables (summaries, footnote grids,
//! layout scaffolding). The performance grid is assumed to be the largest
//! qualifying table by rows × columns, after discarding anything narrower
//! than [`TABLE_MIN_COLUMNS`].

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ScraperError;

/// Tables narrower than this are never the performance grid.
pub const TABLE_MIN_COLUMNS: usize = 3;

/// One table lifted out of the page markup. Rows are padded to the widest
/// row so the value is rectangular; the header row is kept separate from the
/// data rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExtractedTable {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Data rows only; the header row is not counted.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn area(&self) -> usize {
        self.row_count() * self.column_count()
    }
}

fn nearest_ancestor<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name() == name)
}

/// Parse every `<table>` in the markup into an [`ExtractedTable`].
///
/// The first row becomes the header. Cell text is whitespace-collapsed and
/// `colspan` cells are expanded so column counts line up. Rows and cells
/// belonging to a nested `<table>` stay with the inner table; each table is
/// parsed as its own candidate.
pub fn parse_tables(html: &str) -> Vec<ExtractedTable> {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse("table").unwrap();
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("th, td").unwrap();

    let mut tables = Vec::new();

    for table in document.select(&table_selector) {
        let mut rows: Vec<Vec<String>> = Vec::new();

        for tr in table.select(&row_selector) {
            if nearest_ancestor(tr, "table").map(|t| t.id()) != Some(table.id()) {
                continue;
            }
            let mut cells: Vec<String> = Vec::new();
            for cell in tr.select(&cell_selector) {
                if nearest_ancestor(cell, "tr").map(|r| r.id()) != Some(tr.id()) {
                    continue;
                }
                let text = cell
                    .text()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ");
                let colspan = cell
                    .value()
                    .attr("colspan")
                    .and_then(|v| v.parse::<usize>().ok())
                    .unwrap_or(1)
                    .max(1);
                for _ in 0..colspan {
                    cells.push(text.clone());
                }
            }
            if !cells.is_empty() {
                rows.push(cells);
            }
        }

        if rows.is_empty() {
            continue;
        }

        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut iter = rows.into_iter();
        let mut headers = iter.next().unwrap_or_default();
        headers.resize(width, String::new());
        let body: Vec<Vec<String>> = iter
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        tables.push(ExtractedTable { headers, rows: body });
    }

    tables
}

/// Pick the primary data grid: drop tables below the column threshold, then
/// take the one with the largest rows × columns. Ties resolve to the table
/// encountered first in document order.
pub fn select_largest(html: &str) -> Result<ExtractedTable, ScraperError> {
    let tables = parse_tables(html);
    if tables.is_empty() {
        return Err(ScraperError::Extraction(
            "no HTML tables were detected on the page".to_string(),
        ));
    }
    debug!("Found {} tables in page markup", tables.len());

    let mut selected: Option<ExtractedTable> = None;
    for table in tables {
        if table.column_count() < TABLE_MIN_COLUMNS {
            continue;
        }
        match &selected {
            Some(best) if table.area() <= best.area() => {}
            _ => selected = Some(table),
        }
    }

    let table = selected.ok_or_else(|| {
        ScraperError::Extraction("no tables met the minimum column requirement".to_string())
    })?;
    info!(
        "Selected table with {} rows and {} columns",
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}
