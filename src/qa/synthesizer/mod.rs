#[cfg(test)]
mod tests;

use tracing::debug;

use crate::embeddings::gemini::GeminiClient;
use crate::{PdfChatError, Result};

/// The model is instructed to answer from the supplied context alone and to
/// emit this exact sentence when the context does not contain the answer.
pub const FALLBACK_ANSWER: &str = "answer is not available in the context";

const PROMPT_TEMPLATE: &str = "\
Answer the question as detailed as possible from the provided context, make sure to provide all \
the details, if the answer is not in provided context just say, \"answer is not available in the \
context\", don't provide the wrong answer.

Context:
{context}

Question:
{question}

Answer:
";

/// Render the grounding prompt: every context chunk verbatim in ranked
/// order, followed by the question.
#[inline]
pub fn build_prompt(question: &str, context: &[String]) -> String {
    PROMPT_TEMPLATE
        .replace("{context}", &context.join("\n\n"))
        .replace("{question}", question)
}

/// Ask the generative model for an answer grounded in the retrieved context.
///
/// Returns the model's text output unmodified; a failed or empty generation
/// is an error, never a silent empty answer.
#[inline]
pub async fn synthesize(
    client: &GeminiClient,
    question: &str,
    context: &[String],
    temperature: f32,
) -> Result<String> {
    let prompt = build_prompt(question, context);
    debug!(
        "Synthesizing answer ({} context chunks, prompt {} chars)",
        context.len(),
        prompt.chars().count()
    );

    let client = client.clone();
    tokio::task::spawn_blocking(move || client.generate(&prompt, temperature))
        .await
        .map_err(|e| PdfChatError::Generation(format!("Generation task failed: {e}")))?
}
