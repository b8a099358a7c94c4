//! Process-wide dataset memoization
//!
//! The reference spreadsheet is read-only for the life of the process, so
//! repeated loads return the same in-memory records instead of re-reading
//! the file. Purely a performance optimization; `invalidate` forces a
//! re-read on the next load.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use comps_core::Transaction;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::DatasetError;
use crate::loader::load_dataset;

/// Memoized dataset loader keyed by spreadsheet path
#[derive(Default)]
pub struct DatasetCache {
    datasets: RwLock<HashMap<PathBuf, Arc<Vec<Transaction>>>>,
}

impl DatasetCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the dataset at `path`, reusing the cached copy when present
    pub fn load(&self, path: &Path) -> Result<Arc<Vec<Transaction>>, DatasetError> {
        if let Some(records) = self.datasets.read().get(path) {
            debug!("Dataset cache hit for {}", path.display());
            return Ok(Arc::clone(records));
        }

        let records = Arc::new(load_dataset(path)?);
        self.datasets
            .write()
            .insert(path.to_path_buf(), Arc::clone(&records));
        Ok(records)
    }

    /// Drop the cached copy for `path` so the next load re-reads the file
    pub fn invalidate(&self, path: &Path) {
        self.datasets.write().remove(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::NamedTempFile;

    const HEADERS: [&str; 6] = [
        "  Target/Issuer Name ",
        "MI Transaction ID",
        "Implied Enterprise Value/ EBITDA (x)",
        "Business Description\n(Target/Issuer)",
        "Primary Industry\n(Target/Issuer)",
        "Web page",
    ];

    fn write_fixture(rows: &[[&str; 6]]) -> NamedTempFile {
        let file = tempfile::Builder::new()
            .suffix(".xlsx")
            .tempfile()
            .expect("create temp file");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in HEADERS.iter().enumerate() {
            sheet
                .write_string(0, col as u16, *header)
                .expect("write header");
        }
        for (r, row) in rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                if col == 2 {
                    if let Ok(number) = value.parse::<f64>() {
                        sheet
                            .write_number((r + 1) as u32, col as u16, number)
                            .expect("write number");
                        continue;
                    }
                }
                if !value.is_empty() {
                    sheet
                        .write_string((r + 1) as u32, col as u16, *value)
                        .expect("write cell");
                }
            }
        }
        workbook.save(file.path()).expect("save workbook");
        file
    }

    fn fixture_rows() -> Vec<[&'static str; 6]> {
        vec![
            [
                " Acme Software ",
                "MI-1",
                "12.5",
                "Cloud software vendor",
                "Application Software",
                "acme.example",
            ],
            [
                "Steelworks AG",
                "MI-2",
                "6.1",
                "Steel manufacturer",
                "Steel",
                "",
            ],
            // Incomplete: no business description, must be dropped
            ["Mystery Co", "MI-3", "8.0", "", "Industrials", ""],
        ]
    }

    #[test]
    fn test_load_normalizes_and_drops_incomplete_rows() {
        let file = write_fixture(&fixture_rows());
        let cache = DatasetCache::new();

        let records = cache.load(file.path()).expect("load fixture");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].issuer_name, "Acme Software");
        assert_eq!(records[0].business_description, "Cloud software vendor");
        assert_eq!(records[1].ev_ebitda, 6.1);
        assert!(records[1].web_page.is_empty());

        for record in records.iter() {
            assert!(!record.issuer_name.is_empty());
            assert!(!record.transaction_id.is_empty());
            assert!(!record.business_description.is_empty());
            assert!(!record.primary_industry.is_empty());
        }
    }

    #[test]
    fn test_repeated_loads_share_one_copy() {
        let file = write_fixture(&fixture_rows());
        let cache = DatasetCache::new();

        let first = cache.load(file.path()).expect("first load");
        let second = cache.load(file.path()).expect("second load");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let file = write_fixture(&fixture_rows());
        let cache = DatasetCache::new();

        let before = cache.load(file.path()).expect("initial load");
        assert_eq!(before.len(), 2);

        // Rewrite the spreadsheet with a single row; the cached copy must
        // survive until invalidation.
        let replacement = vec![[
            "Acme Software",
            "MI-1",
            "12.5",
            "Cloud software vendor",
            "Application Software",
            "",
        ]];
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in HEADERS.iter().enumerate() {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        for (col, value) in replacement[0].iter().enumerate() {
            if col == 2 {
                sheet.write_number(1, col as u16, 12.5).unwrap();
            } else if !value.is_empty() {
                sheet.write_string(1, col as u16, *value).unwrap();
            }
        }
        workbook.save(file.path()).unwrap();

        let cached = cache.load(file.path()).expect("cached load");
        assert_eq!(cached.len(), 2);

        cache.invalidate(file.path());
        let reloaded = cache.load(file.path()).expect("reload");
        assert_eq!(reloaded.len(), 1);
    }
}
