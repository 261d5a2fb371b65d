// Question answering module
// Retrieves the chunks most relevant to a question and synthesizes a
// grounded answer from them

pub mod retriever;
pub mod synthesizer;

pub use retriever::{DEFAULT_TOP_K, Retriever};
pub use synthesizer::synthesize;
