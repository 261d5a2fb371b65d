// Embeddings module
// Handles Gemini API integration and document text chunking

pub mod chunking;
pub mod gemini;

pub use chunking::{ChunkingConfig, chunk_text};
pub use gemini::GeminiClient;
