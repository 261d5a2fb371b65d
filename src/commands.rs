use std::path::PathBuf;

use console::style;
use indicatif::ProgressBar;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::embeddings::chunking::chunk_text;
use crate::embeddings::gemini::GeminiClient;
use crate::extract::extract_documents;
use crate::index::{ChunkMetadata, EmbeddingRecord, VectorStore};
use crate::qa::{Retriever, synthesize};
use crate::{PdfChatError, Result};

/// Extract, chunk, embed, and index a set of PDF documents, replacing any
/// previously persisted index at the configured location
#[inline]
pub async fn process_documents(config: &Config, pdfs: &[PathBuf]) -> Result<()> {
    if pdfs.is_empty() {
        return Err(PdfChatError::EmptyInput(
            "no documents provided".to_string(),
        ));
    }

    println!("Extracting text from {} document(s)...", pdfs.len());
    let text = extract_documents(pdfs)?;

    let chunks = chunk_text(&text, &config.chunking)?;
    if chunks.is_empty() {
        return Err(PdfChatError::EmptyInput(
            "documents contained no extractable text".to_string(),
        ));
    }
    info!("Split documents into {} chunks", chunks.len());

    let client = GeminiClient::new(&config.gemini)?;

    // Every vector is buffered here; the index location is only touched once
    // all chunks have embedded successfully.
    let progress = ProgressBar::new(chunks.len() as u64);
    let batch_size = config.gemini.batch_size as usize;
    let embed_client = client.clone();
    let texts = chunks.clone();
    let embed_progress = progress.clone();
    let vectors = tokio::task::spawn_blocking(move || -> Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for batch in texts.chunks(batch_size) {
            out.extend(embed_client.embed_batch(batch)?);
            embed_progress.inc(batch.len() as u64);
        }
        Ok(out)
    })
    .await
    .map_err(|e| PdfChatError::Embedding(format!("Embedding task failed: {e}")))??;
    progress.finish_and_clear();

    let created_at = chrono::Utc::now().to_rfc3339();
    let records: Vec<EmbeddingRecord> = chunks
        .into_iter()
        .zip(vectors)
        .enumerate()
        .map(|(i, (content, vector))| EmbeddingRecord {
            id: Uuid::new_v4().to_string(),
            vector,
            metadata: ChunkMetadata {
                content,
                chunk_index: i as u32,
                created_at: created_at.clone(),
            },
        })
        .collect();

    let count = records.len();
    let store = VectorStore::new(config.index_path());
    store.build(records).await?;

    println!(
        "{} Indexed {} chunks at {}",
        style("✓").green(),
        count,
        store.location().display()
    );

    Ok(())
}

/// Answer a question from the indexed documents
#[inline]
pub async fn ask(config: &Config, question: &str, top_k: usize) -> Result<String> {
    let client = GeminiClient::new(&config.gemini)?;
    let retriever = Retriever::new(client.clone(), config.index_path());

    let context = retriever.retrieve(question, top_k).await?;
    info!("Retrieved {} context chunks", context.len());

    synthesize(&client, question, &context, config.gemini.temperature).await
}

/// Show configuration and index status
#[inline]
pub async fn show_status(config: &Config) -> Result<()> {
    println!("{}", style("PDF Chat Status").bold());
    println!("{}", "=".repeat(40));

    println!("Gemini:");
    println!("   Embedding Model: {}", config.gemini.embedding_model);
    println!("   Generation Model: {}", config.gemini.generation_model);
    if config.gemini.api_key.is_some() {
        println!("   API Key: {}", style("configured").green());
    } else {
        println!(
            "   API Key: {}",
            style("missing (export GOOGLE_API_KEY)").red()
        );
    }

    println!("Chunking:");
    println!("   Max Chunk Size: {}", config.chunking.max_chunk_size);
    println!("   Overlap Size: {}", config.chunking.overlap_size);

    println!("Index:");
    println!("   Location: {}", config.index_path().display());
    match VectorStore::new(config.index_path()).open().await {
        Ok(handle) => {
            println!("   Indexed Chunks: {}", handle.count().await?);
            println!("   Embedding Dimension: {}", handle.dimension());
        }
        Err(PdfChatError::IndexNotFound(_)) => {
            println!(
                "   {}",
                style("No index built yet; run 'pdf-chat process <pdfs>' first").yellow()
            );
        }
        Err(e) => {
            println!("   {} {}", style("Error:").red(), e);
        }
    }

    Ok(())
}
