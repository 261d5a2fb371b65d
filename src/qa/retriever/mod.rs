#[cfg(test)]
mod tests;

use std::path::PathBuf;

use tracing::debug;

use crate::embeddings::gemini::GeminiClient;
use crate::index::VectorStore;
use crate::{PdfChatError, Result};

/// Number of context chunks retrieved per question by default
pub const DEFAULT_TOP_K: usize = 4;

/// Fetches the chunks most similar to a question from a persisted index
pub struct Retriever {
    client: GeminiClient,
    store: VectorStore,
}

impl Retriever {
    #[inline]
    pub fn new(client: GeminiClient, index_location: impl Into<PathBuf>) -> Self {
        Self {
            client,
            store: VectorStore::new(index_location),
        }
    }

    /// Embed the question and return the `k` most similar chunk texts,
    /// best match first.
    ///
    /// The index is opened before the question is embedded, so a missing
    /// index surfaces its error without spending an embedding call.
    #[inline]
    pub async fn retrieve(&self, question: &str, k: usize) -> Result<Vec<String>> {
        let handle = self.store.open().await?;

        let client = self.client.clone();
        let question = question.to_string();
        let query = tokio::task::spawn_blocking(move || client.embed(&question))
            .await
            .map_err(|e| PdfChatError::Embedding(format!("Embedding task failed: {e}")))??;

        let results = handle.search(&query, k).await?;
        debug!("Retrieved {} context chunks", results.len());

        Ok(results.into_iter().map(|r| r.content).collect())
    }
}
