//! Core types for the Comps Terminal
//!
//! This crate defines the shared data structures used across the terminal,
//! including reference transactions, match results, and the common error type.

pub mod error;
pub mod matching;
pub mod transaction;

pub use error::{CompsError, CompsResult};
pub use matching::{MatchReport, MatchRow, REASON_FOR_MATCH, RESULT_COLUMNS};
pub use transaction::Transaction;
