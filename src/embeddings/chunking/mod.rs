
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{PdfChatError, Result};

/// Configuration for splitting document text into overlapping chunks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum chunk size in characters
    pub max_chunk_size: usize,
    /// Number of characters shared between consecutive chunks
    pub overlap_size: usize,
    /// How far before the nominal cut point to search for a natural boundary
    pub boundary_lookback: usize,
}

impl Default for ChunkingConfig {
    #[inline]
    fn default() -> Self {
        Self {
            max_chunk_size: 10000,
            overlap_size: 1000,
            boundary_lookback: 500,
        }
    }
}

/// Split document text into chunks of at most `max_chunk_size` characters.
///
/// Consecutive chunks share exactly `overlap_size` characters: each chunk
/// starts that many characters before the previous chunk's actual end. Cut
/// points prefer a paragraph break, then a sentence end, then a word boundary
/// within `boundary_lookback` characters of the nominal cut, falling back to
/// a hard character cut when the window contains none. Sizes are counted in
/// Unicode scalar values, so a cut never lands inside a code point.
#[inline]
pub fn chunk_text(text: &str, config: &ChunkingConfig) -> Result<Vec<String>> {
    if config.overlap_size >= config.max_chunk_size {
        return Err(PdfChatError::Config(format!(
            "overlap size ({}) must be smaller than max chunk size ({})",
            config.overlap_size, config.max_chunk_size
        )));
    }

    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Ok(Vec::new());
    }

    // Every step must advance by at least one character past the overlap
    // region, so the lookback is clamped below the hard-cut stride.
    let lookback = config
        .boundary_lookback
        .min(config.max_chunk_size - config.overlap_size - 1);

    let mut chunks = Vec::new();
    let mut start = 0usize;
    loop {
        let hard_end = (start + config.max_chunk_size).min(chars.len());
        let end = if hard_end == chars.len() {
            hard_end
        } else {
            find_cut(&chars, hard_end, lookback)
        };
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start = end - config.overlap_size;
    }

    debug!(
        "Split {} characters into {} chunks (max {}, overlap {})",
        chars.len(),
        chunks.len(),
        config.max_chunk_size,
        config.overlap_size
    );
    Ok(chunks)
}

/// Find the cut position for a chunk whose nominal end is `hard_end`.
///
/// Scans the window right to left. A paragraph break wins outright; otherwise
/// the rightmost sentence end, then the rightmost word boundary. Returns
/// `hard_end` itself when the window contains no boundary at all.
fn find_cut(chars: &[char], hard_end: usize, lookback: usize) -> usize {
    let window_start = hard_end - lookback;

    let mut sentence_cut = None;
    let mut word_cut = None;

    let mut pos = hard_end;
    while pos > window_start {
        let i = pos - 1;
        if i + 2 <= hard_end && chars[i] == '\n' && chars[i + 1] == '\n' {
            return i + 2;
        }
        if sentence_cut.is_none()
            && i + 2 <= hard_end
            && matches!(chars[i], '.' | '!' | '?')
            && chars[i + 1].is_whitespace()
        {
            sentence_cut = Some(i + 2);
        }
        if word_cut.is_none() && chars[i].is_whitespace() {
            word_cut = Some(i + 1);
        }
        pos -= 1;
    }

    sentence_cut.or(word_cut).unwrap_or(hard_end)
}
