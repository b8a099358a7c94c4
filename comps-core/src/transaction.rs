//! Reference transaction data structures

use serde::{Deserialize, Serialize};

/// A past M&A transaction from the reference dataset
///
/// One row of the reference spreadsheet after normalization. All string
/// fields are trimmed; records missing any required field never make it
/// past the loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Target/issuer company name
    pub issuer_name: String,

    /// MI transaction identifier
    pub transaction_id: String,

    /// Implied Enterprise Value / EBITDA multiple
    pub ev_ebitda: f64,

    /// Business description of the target
    pub business_description: String,

    /// Primary industry of the target
    pub primary_industry: String,

    /// Web domain of the target (empty when the dataset has none)
    #[serde(default)]
    pub web_page: String,
}

impl Transaction {
    /// Build the composite text that gets embedded for this transaction
    ///
    /// Space-joins the business description, primary industry, and scraped
    /// website text, skipping empty parts.
    pub fn composite_text(&self, site_text: &str) -> String {
        let parts = [
            self.business_description.as_str(),
            self.primary_industry.as_str(),
            site_text,
        ];

        parts
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check whether this transaction has a domain to scrape
    pub fn has_web_page(&self) -> bool {
        !self.web_page.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transaction() -> Transaction {
        Transaction {
            issuer_name: "Acme Software".to_string(),
            transaction_id: "MI-1".to_string(),
            ev_ebitda: 12.5,
            business_description: "Cloud software vendor".to_string(),
            primary_industry: "Application Software".to_string(),
            web_page: "acme.example".to_string(),
        }
    }

    #[test]
    fn test_composite_text_joins_all_parts() {
        let tx = transaction();
        assert_eq!(
            tx.composite_text("Acme builds billing software"),
            "Cloud software vendor Application Software Acme builds billing software"
        );
    }

    #[test]
    fn test_composite_text_skips_empty_site_text() {
        let tx = transaction();
        assert_eq!(
            tx.composite_text(""),
            "Cloud software vendor Application Software"
        );
    }
}
