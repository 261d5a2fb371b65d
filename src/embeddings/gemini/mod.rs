#[cfg(test)]
mod tests;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::config::GeminiConfig;
use crate::{PdfChatError, Result};

pub const DEFAULT_EMBEDDING_DIMENSION: u32 = 768;

const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Blocking client for the Google Generative Language API.
///
/// Callers on the async runtime bridge through `tokio::task::spawn_blocking`;
/// the agent carries a global request timeout, and failures propagate without
/// automatic retries.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    base_url: Url,
    api_key: String,
    embedding_model: String,
    generation_model: String,
    batch_size: u32,
    agent: ureq::Agent,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct EmbedContentRequest {
    model: String,
    content: Content,
}

#[derive(Debug, Serialize)]
struct BatchEmbedRequest {
    requests: Vec<EmbedContentRequest>,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Debug, Deserialize)]
struct BatchEmbedResponse {
    embeddings: Vec<ContentEmbedding>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GeminiClient {
    /// Create a client from the service configuration.
    ///
    /// The API credential must already be present in the config; it is never
    /// read from the environment here.
    #[inline]
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            PdfChatError::Config(
                "no API key configured; set GOOGLE_API_KEY in the environment".to_string(),
            )
        })?;

        let base_url = config
            .api_base_url()
            .map_err(|e| PdfChatError::Config(e.to_string()))?;

        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS)))
            .build()
            .into();

        Ok(Self {
            base_url,
            api_key,
            embedding_model: config.embedding_model.clone(),
            generation_model: config.generation_model.clone(),
            batch_size: config.batch_size,
            agent,
        })
    }

    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        self
    }

    /// Generate an embedding vector for a single text input
    #[inline]
    pub fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!("Generating embedding for text (length: {})", text.len());

        let request = EmbedContentRequest {
            model: self.embedding_model.clone(),
            content: Content {
                parts: vec![Part {
                    text: text.to_string(),
                }],
            },
        };

        let url = self.endpoint(&self.embedding_model, "embedContent")?;
        let body = serde_json::to_string(&request)
            .map_err(|e| PdfChatError::Embedding(format!("Failed to serialize request: {e}")))?;

        let response_text = self
            .post_json(&url, &body)
            .map_err(|e| PdfChatError::Embedding(format!("embedContent request failed: {e}")))?;

        let response: EmbedContentResponse = serde_json::from_str(&response_text)
            .map_err(|e| PdfChatError::Embedding(format!("Malformed embedding response: {e}")))?;

        if response.embedding.values.is_empty() {
            return Err(PdfChatError::Embedding(
                "Embedding response contained no values".to_string(),
            ));
        }

        debug!(
            "Generated embedding with {} dimensions",
            response.embedding.values.len()
        );
        Ok(response.embedding.values)
    }

    /// Generate embeddings for multiple texts, batching requests to the
    /// configured batch size. Vectors are returned in input order.
    #[inline]
    pub fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Generating embeddings for {} texts", texts.len());

        let mut results = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.batch_size as usize) {
            let vectors = self.embed_single_batch(batch)?;
            results.extend(vectors);
        }

        // The index requires one fixed dimension across its lifetime.
        if let Some(first) = results.first() {
            let dimension = first.len();
            if let Some(bad) = results.iter().find(|v| v.len() != dimension) {
                return Err(PdfChatError::Embedding(format!(
                    "Inconsistent embedding dimensions in response: {} vs {}",
                    dimension,
                    bad.len()
                )));
            }
        }

        debug!("Generated {} embeddings total", results.len());
        Ok(results)
    }

    fn embed_single_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.len() == 1 {
            return Ok(vec![self.embed(&texts[0])?]);
        }

        let request = BatchEmbedRequest {
            requests: texts
                .iter()
                .map(|text| EmbedContentRequest {
                    model: self.embedding_model.clone(),
                    content: Content {
                        parts: vec![Part { text: text.clone() }],
                    },
                })
                .collect(),
        };

        let url = self.endpoint(&self.embedding_model, "batchEmbedContents")?;
        let body = serde_json::to_string(&request)
            .map_err(|e| PdfChatError::Embedding(format!("Failed to serialize request: {e}")))?;

        let response_text = self.post_json(&url, &body).map_err(|e| {
            PdfChatError::Embedding(format!("batchEmbedContents request failed: {e}"))
        })?;

        let response: BatchEmbedResponse = serde_json::from_str(&response_text)
            .map_err(|e| PdfChatError::Embedding(format!("Malformed batch response: {e}")))?;

        if response.embeddings.len() != texts.len() {
            return Err(PdfChatError::Embedding(format!(
                "Mismatch between request and response counts: {} vs {}",
                texts.len(),
                response.embeddings.len()
            )));
        }

        Ok(response.embeddings.into_iter().map(|e| e.values).collect())
    }

    /// Invoke the generative model with the given prompt and temperature,
    /// returning the model's text output unmodified.
    #[inline]
    pub fn generate(&self, prompt: &str, temperature: f32) -> Result<String> {
        debug!(
            "Generating completion (prompt length: {}, temperature: {})",
            prompt.len(),
            temperature
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig { temperature },
        };

        let url = self.endpoint(&self.generation_model, "generateContent")?;
        let body = serde_json::to_string(&request)
            .map_err(|e| PdfChatError::Generation(format!("Failed to serialize request: {e}")))?;

        let response_text = self
            .post_json(&url, &body)
            .map_err(|e| PdfChatError::Generation(format!("generateContent request failed: {e}")))?;

        let response: GenerateContentResponse = serde_json::from_str(&response_text)
            .map_err(|e| PdfChatError::Generation(format!("Malformed generation response: {e}")))?;

        let answer = response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<String>()
            })
            .ok_or_else(|| {
                PdfChatError::Generation("Generation response contained no candidates".to_string())
            })?;

        debug!("Generated answer ({} chars)", answer.len());
        Ok(answer)
    }

    fn endpoint(&self, model: &str, method: &str) -> Result<Url> {
        let raw = format!(
            "{}/{}:{}",
            self.base_url.as_str().trim_end_matches('/'),
            model,
            method
        );
        Url::parse(&raw)
            .map_err(|e| PdfChatError::Config(format!("Invalid endpoint URL {raw}: {e}")))
    }

    // The key travels in a header so the URL stays safe to log.
    fn post_json(&self, url: &Url, body: &str) -> std::result::Result<String, ureq::Error> {
        self.agent
            .post(url.as_str())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .send(body)
            .and_then(|mut resp| resp.body_mut().read_to_string())
    }
}
