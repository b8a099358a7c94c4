//! Spreadsheet export of match results

use comps_core::{CompsError, MatchRow, RESULT_COLUMNS};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

/// Name of the single worksheet in the exported workbook
pub const EXPORT_SHEET_NAME: &str = "Top Matches";

/// MIME type for the Office Open XML spreadsheet format
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Serialize match rows to an in-memory `.xlsx` workbook
///
/// Single sheet, bold header row, one row per match, columns in
/// presentation order. No other styling.
pub fn write_matches_workbook(matches: &[MatchRow]) -> Result<Vec<u8>, CompsError> {
    build_workbook(matches)
        .map_err(|e| CompsError::internal(format!("Failed to build workbook: {}", e)))
}

fn build_workbook(matches: &[MatchRow]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(EXPORT_SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (col, header) in RESULT_COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, row) in matches.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_string(r, 0, row.issuer_name.as_str())?;
        sheet.write_string(r, 1, row.transaction_id.as_str())?;
        sheet.write_number(r, 2, row.ev_ebitda)?;
        sheet.write_string(r, 3, row.business_description.as_str())?;
        sheet.write_string(r, 4, row.primary_industry.as_str())?;
        sheet.write_string(r, 5, row.web_page.as_str())?;
        sheet.write_number(r, 6, row.similarity_score)?;
        sheet.write_string(r, 7, row.reason.as_str())?;
    }

    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{DataType, Reader, Xlsx};
    use comps_core::REASON_FOR_MATCH;
    use std::io::Cursor;

    fn sample_rows() -> Vec<MatchRow> {
        vec![
            MatchRow {
                issuer_name: "Acme Software".to_string(),
                transaction_id: "MI-1".to_string(),
                ev_ebitda: 12.5,
                business_description: "Cloud software vendor".to_string(),
                primary_industry: "Application Software".to_string(),
                web_page: "acme.example".to_string(),
                similarity_score: 0.91,
                reason: REASON_FOR_MATCH.to_string(),
            },
            MatchRow {
                issuer_name: "Steelworks AG".to_string(),
                transaction_id: "MI-2".to_string(),
                ev_ebitda: 6.1,
                business_description: "Steel manufacturer".to_string(),
                primary_industry: "Steel".to_string(),
                web_page: String::new(),
                similarity_score: 0.35,
                reason: REASON_FOR_MATCH.to_string(),
            },
        ]
    }

    #[test]
    fn test_workbook_has_expected_sheet_and_columns() {
        let buffer = write_matches_workbook(&sample_rows()).expect("build workbook");

        let mut workbook = Xlsx::new(Cursor::new(buffer)).expect("reopen workbook");
        assert_eq!(workbook.sheet_names(), &[EXPORT_SHEET_NAME.to_string()]);

        let range = workbook
            .worksheet_range(EXPORT_SHEET_NAME)
            .expect("sheet present")
            .expect("readable range");

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .expect("header row")
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(headers, RESULT_COLUMNS);

        let first = rows.next().expect("first data row");
        assert_eq!(first[0], DataType::String("Acme Software".to_string()));
        assert_eq!(first[2], DataType::Float(12.5));
        assert_eq!(first[6], DataType::Float(0.91));
        assert_eq!(
            first[7],
            DataType::String(REASON_FOR_MATCH.to_string())
        );

        let second = rows.next().expect("second data row");
        assert_eq!(second[0], DataType::String("Steelworks AG".to_string()));
        assert!(rows.next().is_none());
    }

    #[test]
    fn test_empty_result_set_still_writes_headers() {
        let buffer = write_matches_workbook(&[]).expect("build workbook");

        let mut workbook = Xlsx::new(Cursor::new(buffer)).expect("reopen workbook");
        let range = workbook
            .worksheet_range(EXPORT_SHEET_NAME)
            .expect("sheet present")
            .expect("readable range");
        assert_eq!(range.rows().count(), 1);
    }
}
