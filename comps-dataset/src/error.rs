//! Error types for dataset loading

use comps_core::CompsError;
use thiserror::Error;

/// Errors raised while loading the reference spreadsheet
///
/// All of these are fatal for the session: no partial dataset is ever
/// returned.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Unable to read the workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("The workbook does not contain any worksheets")]
    NoWorksheet,

    #[error("The worksheet '{0}' is empty")]
    EmptySheet(String),

    #[error("Required column missing after normalization: {0}")]
    MissingColumn(&'static str),
}

impl From<DatasetError> for CompsError {
    fn from(err: DatasetError) -> Self {
        CompsError::dataset(err.to_string())
    }
}
