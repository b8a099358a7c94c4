//! Match pipeline orchestration

use std::path::PathBuf;

use comps_core::{CompsError, MatchReport, MatchRow, Transaction};
use comps_dataset::DatasetCache;
use comps_embedding::{rank_by_similarity, EmbeddingClient, ScoredIndex};
use comps_scrape::SiteTextFetcher;
use tracing::{info, instrument};

/// Default number of comparable transactions returned per query
pub const DEFAULT_TOP_N: usize = 10;

/// Finds comparable transactions for a company profile
///
/// One call to [`MatchService::find_matches`] runs the whole pipeline:
/// load the (cached) reference dataset, scrape each record's website,
/// embed the composite texts and the query, and rank by cosine similarity.
/// Scraping and embeddings are recomputed per request; only the normalized
/// dataset is cached across requests.
pub struct MatchService {
    dataset_path: PathBuf,
    datasets: DatasetCache,
    fetcher: SiteTextFetcher,
    embedder: EmbeddingClient,
}

impl MatchService {
    /// Create a new match service
    ///
    /// `api_key` is the OpenAI credential, passed through explicitly to the
    /// embedding client.
    pub fn new(dataset_path: impl Into<PathBuf>, api_key: String) -> Result<Self, CompsError> {
        Ok(Self {
            dataset_path: dataset_path.into(),
            datasets: DatasetCache::new(),
            fetcher: SiteTextFetcher::new()?,
            embedder: EmbeddingClient::new(api_key),
        })
    }

    /// Drop the cached dataset so the next request re-reads the spreadsheet
    pub fn reload_dataset(&self) {
        self.datasets.invalidate(&self.dataset_path);
    }

    /// Find the top comparable transactions for a query profile
    #[instrument(skip(self, query))]
    pub async fn find_matches(
        &self,
        query: &str,
        top_n: usize,
    ) -> Result<MatchReport, CompsError> {
        let records = self.datasets.load(&self.dataset_path)?;
        info!(
            "Matching query against {} reference transactions",
            records.len()
        );

        // Enrich sequentially; scrape failures degrade to empty site text
        let mut composites = Vec::with_capacity(records.len());
        for record in records.iter() {
            let site_text = self.fetcher.fetch_site_text(&record.web_page).await;
            composites.push(record.composite_text(&site_text));
        }

        let reference = self.embedder.embed_texts(&composites).await?;
        let query_embedding = self.embedder.embed_query(query).await?;

        let ranked = rank_by_similarity(&reference, &query_embedding, top_n);
        let rows = build_match_rows(&records, &ranked);
        info!("Returning {} matches", rows.len());

        Ok(MatchReport::new(query, rows))
    }
}

/// Turn a ranking into presentation rows, preserving ranked order
fn build_match_rows(records: &[Transaction], ranked: &[ScoredIndex]) -> Vec<MatchRow> {
    ranked
        .iter()
        .filter_map(|entry| {
            records
                .get(entry.index)
                .map(|tx| MatchRow::from_transaction(tx, entry.score))
        })
        .collect()
}
