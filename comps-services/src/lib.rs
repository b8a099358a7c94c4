//! Service layer for the Comps Terminal
//!
//! Wires the dataset cache, site scraper, and embedding client into the
//! match pipeline, and serializes ranked results to a spreadsheet.

pub mod export;
pub mod match_service;

pub use export::{write_matches_workbook, EXPORT_SHEET_NAME, XLSX_CONTENT_TYPE};
pub use match_service::{MatchService, DEFAULT_TOP_N};
