//! CSV persistence for the extracted table.

use std::fs::File;
use std::path::Path;

use csv::Writer;
use tracing::info;

use crate::error::ScraperError;
use crate::table::ExtractedTable;

/// Write the table to `output_path` as UTF-8 CSV with a header row, creating
/// missing parent directories first.
pub fn write_csv(table: &ExtractedTable, output_path: &Path) -> Result<(), ScraperError> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(output_path)?;
    let mut wtr = Writer::from_writer(file);

    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;

    info!(
        "Wrote {} rows x {} columns to {}",
        table.row_count(),
        table.column_count(),
        output_path.display()
    );
    Ok(())
}
