//! OpenAI embedding client

use std::future::Future;
use std::time::Duration;

use async_openai::{
    Client,
    config::OpenAIConfig,
    types::embeddings::{CreateEmbeddingRequest, EmbeddingInput},
};
use tracing::{debug, info, instrument};

use crate::error::{EmbeddingError, Result};
use crate::types::EmbeddingVector;

/// Embedding model used for both the reference set and queries
pub const EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// Maximum number of texts submitted per API request
pub const BATCH_SIZE: usize = 100;

/// Pause inserted after each batch request (simple rate limiting)
const BATCH_PAUSE: Duration = Duration::from_secs(1);

/// OpenAI embedding client
pub struct EmbeddingClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl EmbeddingClient {
    /// Create a new embedding client
    ///
    /// Uses the text-embedding-ada-002 model (1536 dimensions). The API key
    /// is supplied explicitly; the client never reads it from the
    /// environment itself.
    pub fn new(api_key: String) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Client::with_config(config),
            model: EMBEDDING_MODEL.to_string(),
        }
    }

    /// Generate embeddings for an ordered sequence of texts
    ///
    /// Texts are partitioned into batches of 100 and submitted one request
    /// per batch, pausing one second after each. The output has exactly one
    /// vector per input, in input order. Any API failure aborts the whole
    /// call with the failing batch index; no partial list is returned.
    #[instrument(skip(self, texts), fields(count = texts.len()))]
    pub async fn embed_texts(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>> {
        let embeddings = embed_in_batches(texts, BATCH_SIZE, BATCH_PAUSE, |index, batch| {
            self.request_batch(index, batch)
        })
        .await?;

        info!(
            "Generated {} embeddings with model {}",
            embeddings.len(),
            self.model
        );
        Ok(embeddings)
    }

    /// Generate the embedding for a single query profile
    ///
    /// Goes through the same batch path as the reference set, as a
    /// single-item batch.
    pub async fn embed_query(&self, text: &str) -> Result<EmbeddingVector> {
        let mut vectors = self.embed_texts(&[text.to_string()]).await?;
        vectors.pop().ok_or(EmbeddingError::BatchShape {
            index: 0,
            expected: 1,
            actual: 0,
        })
    }

    /// Submit one batch to the embeddings endpoint
    async fn request_batch(&self, index: usize, batch: Vec<String>) -> Result<Vec<EmbeddingVector>> {
        debug!("Submitting embedding batch {} ({} texts)", index, batch.len());

        let request = CreateEmbeddingRequest {
            model: self.model.clone(),
            input: EmbeddingInput::StringArray(batch),
            encoding_format: None,
            dimensions: None,
            user: None,
        };

        let response = self
            .client
            .embeddings()
            .create(request)
            .await
            .map_err(|source| EmbeddingError::Batch { index, source })?;

        let mut data = response.data;
        data.sort_by_key(|item| item.index);
        Ok(data.into_iter().map(|item| item.embedding).collect())
    }

    /// Get the embedding model name
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Drive an embedding function over fixed-size batches
///
/// Concatenates per-batch outputs in batch order and verifies every batch
/// returns one vector per input. The first failing batch aborts the call.
pub(crate) async fn embed_in_batches<F, Fut>(
    texts: &[String],
    batch_size: usize,
    pause: Duration,
    mut embed_batch: F,
) -> Result<Vec<EmbeddingVector>>
where
    F: FnMut(usize, Vec<String>) -> Fut,
    Fut: Future<Output = Result<Vec<EmbeddingVector>>>,
{
    let mut embeddings = Vec::with_capacity(texts.len());

    for (index, chunk) in texts.chunks(batch_size.max(1)).enumerate() {
        let vectors = embed_batch(index, chunk.to_vec()).await?;
        if vectors.len() != chunk.len() {
            return Err(EmbeddingError::BatchShape {
                index,
                expected: chunk.len(),
                actual: vectors.len(),
            });
        }
        embeddings.extend(vectors);

        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }
    }

    Ok(embeddings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("text {}", i)).collect()
    }

    /// Deterministic fake embedding derived from the text itself
    fn fake_vector(text: &str) -> EmbeddingVector {
        vec![text.len() as f32, text.bytes().map(f32::from).sum()]
    }

    #[tokio::test]
    async fn test_batch_boundaries_preserve_order() {
        let inputs = texts(7);

        let wide = embed_in_batches(&inputs, 100, Duration::ZERO, |_, batch| async move {
            Ok(batch.iter().map(|t| fake_vector(t)).collect())
        })
        .await
        .expect("single batch");

        let narrow = embed_in_batches(&inputs, 1, Duration::ZERO, |_, batch| async move {
            Ok(batch.iter().map(|t| fake_vector(t)).collect())
        })
        .await
        .expect("one text per batch");

        assert_eq!(wide.len(), inputs.len());
        assert_eq!(wide, narrow);
        for (text, vector) in inputs.iter().zip(&wide) {
            assert_eq!(vector, &fake_vector(text));
        }
    }

    #[tokio::test]
    async fn test_failing_batch_aborts_with_its_index() {
        let inputs = texts(10);
        let mut calls = Vec::new();

        let result = embed_in_batches(&inputs, 2, Duration::ZERO, |index, batch| {
            calls.push(index);
            async move {
                if index == 2 {
                    // Wrong shape on batch 2 of 5
                    Ok(Vec::new())
                } else {
                    Ok(batch.iter().map(|t| fake_vector(t)).collect())
                }
            }
        })
        .await;

        let err = result.expect_err("batch 2 must fail");
        assert_eq!(err.batch_index(), 2);
        // Batches after the failure are never submitted
        assert_eq!(calls, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_empty_input_yields_empty_output() {
        let result = embed_in_batches(&[], 100, Duration::ZERO, |_, _| async {
            panic!("no batch expected")
        })
        .await
        .expect("empty input");
        assert!(result.is_empty());
    }

    #[tokio::test]
    #[ignore] // Requires API key
    async fn test_embed_query_live() {
        let api_key = std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY not set");
        let client = EmbeddingClient::new(api_key);

        let embedding = client
            .embed_query("Cloud billing software for mid-market manufacturers")
            .await
            .expect("Failed to generate embedding");

        assert_eq!(embedding.len(), 1536);
    }
}
