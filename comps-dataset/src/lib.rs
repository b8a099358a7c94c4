//! Reference dataset loading for the Comps Terminal
//!
//! Reads the transaction spreadsheet, normalizes headers and cells, drops
//! incomplete rows, and memoizes the result per path for the life of the
//! process.

pub mod cache;
pub mod error;
pub mod loader;

pub use cache::DatasetCache;
pub use error::DatasetError;
pub use loader::{
    load_dataset, COL_BUSINESS_DESCRIPTION, COL_EV_EBITDA, COL_ISSUER_NAME, COL_PRIMARY_INDUSTRY,
    COL_TRANSACTION_ID, COL_WEB_PAGE,
};
