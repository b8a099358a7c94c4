//! Match result data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::transaction::Transaction;

/// Explanation attached to every match row
///
/// The ranking computes no per-factor attribution, so the label is a
/// constant rather than a derived string.
pub const REASON_FOR_MATCH: &str = "High semantic + content + industry similarity";

/// Result columns, in presentation order (table and spreadsheet export)
pub const RESULT_COLUMNS: [&str; 8] = [
    "Target/Issuer Name",
    "MI Transaction ID",
    "Implied Enterprise Value/ EBITDA (x)",
    "Business Description",
    "Primary Industry",
    "Web page",
    "Similarity Score",
    "Reason for Match",
];

/// One ranked comparable transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRow {
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

    /// Web domain of the target
    pub web_page: String,

    /// Cosine similarity against the query profile (-1.0 to 1.0)
    pub similarity_score: f64,

    /// Why this row matched
    pub reason: String,
}

impl MatchRow {
    /// Build a match row from a reference transaction and its score
    pub fn from_transaction(tx: &Transaction, similarity_score: f64) -> Self {
        Self {
            issuer_name: tx.issuer_name.clone(),
            transaction_id: tx.transaction_id.clone(),
            ev_ebitda: tx.ev_ebitda,
            business_description: tx.business_description.clone(),
            primary_industry: tx.primary_industry.clone(),
            web_page: tx.web_page.clone(),
            similarity_score,
            reason: REASON_FOR_MATCH.to_string(),
        }
    }
}

/// The ranked result set for one query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    /// The company profile that was matched
    pub query: String,

    /// When the ranking was produced
    pub generated_at: DateTime<Utc>,

    /// Top comparable transactions, best first
    pub matches: Vec<MatchRow>,
}

impl MatchReport {
    /// Create a report for a query from ranked rows
    pub fn new(query: impl Into<String>, matches: Vec<MatchRow>) -> Self {
        Self {
            query: query.into(),
            generated_at: Utc::now(),
            matches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transaction_attaches_constant_reason() {
        let tx = Transaction {
            issuer_name: "Acme Software".to_string(),
            transaction_id: "MI-1".to_string(),
            ev_ebitda: 9.1,
            business_description: "Cloud software vendor".to_string(),
            primary_industry: "Application Software".to_string(),
            web_page: String::new(),
        };

        let row = MatchRow::from_transaction(&tx, 0.87);
        assert_eq!(row.issuer_name, "Acme Software");
        assert_eq!(row.similarity_score, 0.87);
        assert_eq!(row.reason, REASON_FOR_MATCH);
    }
}
