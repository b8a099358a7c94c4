//! Spreadsheet loading and normalization

use std::path::Path;

use calamine::{open_workbook_auto, DataType, Reader};
use comps_core::Transaction;
use tracing::{debug, info};

use crate::error::DatasetError;

/// Canonical column names after header normalization
pub const COL_ISSUER_NAME: &str = "Target/Issuer Name";
pub const COL_TRANSACTION_ID: &str = "MI Transaction ID";
pub const COL_EV_EBITDA: &str = "Implied Enterprise Value/ EBITDA (x)";
pub const COL_BUSINESS_DESCRIPTION: &str = "Business Description";
pub const COL_PRIMARY_INDUSTRY: &str = "Primary Industry";
pub const COL_WEB_PAGE: &str = "Web page";

/// Multi-line header variants that get renamed to their short forms
const BUSINESS_DESCRIPTION_LONG: &str = "Business Description\n(Target/Issuer)";
const PRIMARY_INDUSTRY_LONG: &str = "Primary Industry\n(Target/Issuer)";

/// Column indices of the recognized columns within one workbook
struct Columns {
    issuer_name: usize,
    transaction_id: usize,
    ev_ebitda: usize,
    business_description: usize,
    primary_industry: usize,
    web_page: Option<usize>,
}

impl Columns {
    fn resolve(headers: &[String]) -> Result<Self, DatasetError> {
        Ok(Self {
            issuer_name: find_column(headers, COL_ISSUER_NAME)?,
            transaction_id: find_column(headers, COL_TRANSACTION_ID)?,
            ev_ebitda: find_column(headers, COL_EV_EBITDA)?,
            business_description: find_column(headers, COL_BUSINESS_DESCRIPTION)?,
            primary_industry: find_column(headers, COL_PRIMARY_INDUSTRY)?,
            web_page: headers.iter().position(|h| h == COL_WEB_PAGE),
        })
    }
}

/// Load the reference dataset from a spreadsheet
///
/// Opens the first worksheet, normalizes headers, trims every string cell,
/// and drops rows missing any of the five required fields. A missing or
/// unreadable file is a hard error; no partial dataset is returned.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<Transaction>, DatasetError> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(DatasetError::NoWorksheet)?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .ok_or(DatasetError::NoWorksheet)?
        .map_err(DatasetError::Workbook)?;

    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| DatasetError::EmptySheet(sheet_name.clone()))?;

    let headers: Vec<String> = header_row.iter().map(canonical_header).collect();
    let columns = Columns::resolve(&headers)?;

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in rows {
        match record_from_row(row, &columns) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    info!(
        "Loaded {} reference transactions from {} ({} incomplete rows dropped)",
        records.len(),
        path.display(),
        dropped
    );

    Ok(records)
}

/// Trim a header cell and rename the known multi-line variants
fn canonical_header(cell: &DataType) -> String {
    let header = cell_to_string(cell);
    match header.as_str() {
        BUSINESS_DESCRIPTION_LONG => COL_BUSINESS_DESCRIPTION.to_string(),
        PRIMARY_INDUSTRY_LONG => COL_PRIMARY_INDUSTRY.to_string(),
        _ => header,
    }
}

fn find_column(headers: &[String], name: &'static str) -> Result<usize, DatasetError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(DatasetError::MissingColumn(name))
}

/// Build a transaction from one data row
///
/// Returns `None` when any required field is missing, which drops the row.
fn record_from_row(row: &[DataType], columns: &Columns) -> Option<Transaction> {
    let issuer_name = required_string(row, columns.issuer_name)?;
    let transaction_id = required_string(row, columns.transaction_id)?;
    let ev_ebitda = cell_to_number(cell_at(row, columns.ev_ebitda))?;
    let business_description = required_string(row, columns.business_description)?;
    let primary_industry = required_string(row, columns.primary_industry)?;

    let web_page = columns
        .web_page
        .map(|idx| cell_to_string(cell_at(row, idx)))
        .unwrap_or_default();

    Some(Transaction {
        issuer_name,
        transaction_id,
        ev_ebitda,
        business_description,
        primary_industry,
        web_page,
    })
}

fn cell_at(row: &[DataType], idx: usize) -> &DataType {
    row.get(idx).unwrap_or(&DataType::Empty)
}

fn required_string(row: &[DataType], idx: usize) -> Option<String> {
    let value = cell_to_string(cell_at(row, idx));
    if value.is_empty() {
        debug!("Dropping row with empty required cell at column {}", idx);
        None
    } else {
        Some(value)
    }
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        DataType::String(s) => s.trim().to_string(),
        _ => cell.to_string().trim().to_string(),
    }
}

fn cell_to_number(cell: &DataType) -> Option<f64> {
    match cell {
        DataType::Float(f) => Some(*f),
        DataType::Int(i) => Some(*i as f64),
        DataType::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
