//! Website text enrichment for the Comps Terminal
//!
//! Fetches a company's web page (with a web-archive fallback) and extracts
//! its visible text. Every failure degrades to the empty string; enrichment
//! never fails a match request.

pub mod fetcher;

pub use fetcher::{extract_visible_text, SiteTextFetcher};
