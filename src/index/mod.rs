// Vector index module
// Persists (chunk text, embedding) pairs with LanceDB and answers
// nearest-neighbor queries against a loaded index

pub mod vector_store;

use serde::{Deserialize, Serialize};

pub use vector_store::{IndexHandle, SearchResult, VectorStore};

/// Embedding record stored in the index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    /// Unique identifier for this embedding
    pub id: String,
    /// The embedding vector; every record in one index has the same dimension
    pub vector: Vec<f32>,
    /// Metadata about the chunk this embedding represents
    pub metadata: ChunkMetadata,
}

/// Metadata stored alongside each embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// The chunk text
    pub content: String,
    /// Position of this chunk in the source document stream (for ordering)
    pub chunk_index: u32,
    /// Timestamp when this embedding was created
    pub created_at: String,
}
